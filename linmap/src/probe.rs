//! Linear probe sequence.
//!
//! A key's walk starts at its home slot `hash & mask` and advances one slot
//! at a time, wrapping at the end of the array. The walk is bounded: it
//! yields every slot of the table exactly once and then stops.

/// Bounded linear probe walk over a power-of-two slot array.
#[derive(Debug, Clone)]
pub(crate) struct ProbeSeq {
    /// Next index to yield.
    pos: usize,
    /// Number of indices yielded so far.
    len: usize,
    mask: usize,
}

impl ProbeSeq {
    /// Starts a walk for `hash` over a table of `capacity` slots.
    ///
    /// `capacity` must be a power of two.
    #[inline]
    pub(crate) fn new(hash: u64, capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        let mask = capacity - 1;
        Self {
            pos: home_slot(hash, mask),
            len: 0,
            mask,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.len > self.mask {
            return None;
        }
        let idx = self.pos;
        self.len += 1;
        self.pos = (self.pos + 1) & self.mask;
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.mask + 1 - self.len;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}

/// Home slot of `hash` in a table whose length is `mask + 1`.
#[inline(always)]
pub(crate) fn home_slot(hash: u64, mask: usize) -> usize {
    (hash as usize) & mask
}

/// Distance from the home slot of `hash` to `idx`, walking forward with wrap.
#[inline]
pub(crate) fn probe_distance(hash: u64, idx: usize, mask: usize) -> usize {
    idx.wrapping_sub(home_slot(hash, mask)) & mask
}
