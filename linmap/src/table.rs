//! Slot table: the flat slot array behind [`HashMap`](crate::HashMap).
//!
//! # Layout
//!
//! - **Slots**: `Vec<Slot<K, V>>` of power-of-two length, never below
//!   [`MIN_CAPACITY`](crate::MIN_CAPACITY).
//! - **Entries**: stored inline in their slot together with the cached key
//!   hash, so probe walks compare hashes before touching keys.
//! - **Tombstones**: a deleted slot stays `Tombstone` so later walks keep
//!   scanning past it. Only a rebuild turns tombstones back into `Empty`.

use alloc::vec::Vec;
use core::mem;

use log::{debug, trace, warn};

use crate::error::{MapError, Result};
use crate::probe::ProbeSeq;
use crate::MIN_CAPACITY;

/// A key-value pair with its cached hash.
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) hash: u64,
    pub(crate) key: K,
    pub(crate) value: V,
}

/// One cell of the slot array.
#[derive(Debug, Clone)]
pub(crate) enum Slot<K, V> {
    /// Never used since the last rebuild or clear.
    Empty,
    Occupied(Entry<K, V>),
    /// Deleted; keeps probe chains intact until the next rebuild.
    Tombstone,
}

/// Outcome of a walk looking for a key or a place to put it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lookup {
    /// The key lives at this index.
    Found(usize),
    /// The key is absent; this is the first tombstone or empty slot on its walk.
    Vacant(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct RawTable<K, V> {
    slots: Vec<Slot<K, V>>,
    mask: usize,
    live: usize,
    tombstones: usize,
}

/// Allocates `capacity` empty slots, failing instead of aborting when the
/// array is too large to represent or allocate.
fn empty_slots<K, V>(capacity: usize) -> Result<Vec<Slot<K, V>>> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(capacity).map_err(|err| {
        warn!("cannot allocate {capacity} slots: {err}");
        MapError::CapacityOverflow
    })?;
    slots.resize_with(capacity, || Slot::Empty);
    Ok(slots)
}

impl<K, V> RawTable<K, V> {
    /// Creates a table of [`MIN_CAPACITY`] empty slots.
    pub(crate) fn new() -> Self {
        Self {
            slots: (0..MIN_CAPACITY).map(|_| Slot::Empty).collect(),
            mask: MIN_CAPACITY - 1,
            live: 0,
            tombstones: 0,
        }
    }

    /// Creates a table of `capacity` empty slots; `capacity` must be a power of two.
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self> {
        debug_assert!(capacity.is_power_of_two());
        Ok(Self {
            slots: empty_slots(capacity)?,
            mask: capacity - 1,
            live: 0,
            tombstones: 0,
        })
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn mask(&self) -> usize {
        self.mask
    }

    /// Number of live entries.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub(crate) fn tombstones(&self) -> usize {
        self.tombstones
    }

    #[inline]
    pub(crate) fn slots(&self) -> &[Slot<K, V>] {
        &self.slots
    }

    #[inline]
    pub(crate) fn slots_mut(&mut self) -> &mut [Slot<K, V>] {
        &mut self.slots
    }

    pub(crate) fn into_slots(self) -> Vec<Slot<K, V>> {
        self.slots
    }

    fn saturated(&self, hash: u64) {
        warn!(
            "probe walk for hash {:#018x} wrapped all {} slots ({} live, {} tombstones)",
            hash,
            self.capacity(),
            self.live,
            self.tombstones
        );
    }

    /// Finds the index of the live entry with `hash` whose key satisfies `eq`.
    pub(crate) fn find(&self, hash: u64, mut eq: impl FnMut(&K) -> bool) -> Option<usize> {
        for idx in ProbeSeq::new(hash, self.capacity()) {
            match &self.slots[idx] {
                Slot::Empty => return None,
                Slot::Occupied(entry) if entry.hash == hash && eq(&entry.key) => return Some(idx),
                Slot::Occupied(_) | Slot::Tombstone => {}
            }
        }
        // Every slot is live or tombstoned and none matched.
        self.saturated(hash);
        None
    }

    /// Walks the whole chain of `hash` looking for a key match before
    /// settling for the first vacant slot, so an update never lands in an
    /// earlier tombstone while the key still lives further down the chain.
    pub(crate) fn find_or_vacant(&self, hash: u64, mut eq: impl FnMut(&K) -> bool) -> Result<Lookup> {
        let mut first_tombstone = None;
        for idx in ProbeSeq::new(hash, self.capacity()) {
            match &self.slots[idx] {
                Slot::Empty => return Ok(Lookup::Vacant(first_tombstone.unwrap_or(idx))),
                Slot::Occupied(entry) if entry.hash == hash && eq(&entry.key) => {
                    return Ok(Lookup::Found(idx));
                }
                Slot::Occupied(_) => {}
                Slot::Tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(idx);
                    }
                }
            }
        }
        self.saturated(hash);
        first_tombstone
            .map(Lookup::Vacant)
            .ok_or(MapError::ProbeExhausted {
                capacity: self.capacity(),
            })
    }

    /// First tombstone or empty slot on the walk of `hash`, for keys known to be absent.
    pub(crate) fn find_vacant(&self, hash: u64) -> Result<usize> {
        ProbeSeq::new(hash, self.capacity())
            .find(|&idx| !matches!(self.slots[idx], Slot::Occupied(_)))
            .ok_or(MapError::ProbeExhausted {
                capacity: self.capacity(),
            })
    }

    /// Writes `entry` into the vacant slot at `idx`.
    pub(crate) fn place(&mut self, idx: usize, entry: Entry<K, V>) {
        let previous = mem::replace(&mut self.slots[idx], Slot::Occupied(entry));
        debug_assert!(!matches!(previous, Slot::Occupied(_)));
        if let Slot::Tombstone = previous {
            trace!("reusing tombstone at slot {idx}");
            self.tombstones -= 1;
        }
        self.live += 1;
    }

    #[inline]
    pub(crate) fn entry(&self, idx: usize) -> Option<&Entry<K, V>> {
        match &self.slots[idx] {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self, idx: usize) -> Option<&mut Entry<K, V>> {
        match &mut self.slots[idx] {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    /// Tombstones the live slot at `idx` and hands back its entry.
    pub(crate) fn tombstone(&mut self, idx: usize) -> Option<Entry<K, V>> {
        if !matches!(self.slots[idx], Slot::Occupied(_)) {
            return None;
        }
        match mem::replace(&mut self.slots[idx], Slot::Tombstone) {
            Slot::Occupied(entry) => {
                self.live -= 1;
                self.tombstones += 1;
                Some(entry)
            }
            _ => None,
        }
    }

    /// Tombstones every live entry for which `keep` returns false.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&K, &mut V) -> bool) {
        for slot in self.slots.iter_mut() {
            let drop_it = match slot {
                Slot::Occupied(entry) => !keep(&entry.key, &mut entry.value),
                _ => false,
            };
            if drop_it {
                *slot = Slot::Tombstone;
                self.live -= 1;
                self.tombstones += 1;
            }
        }
    }

    /// Re-places every live entry into a fresh array of `capacity` slots,
    /// dropping all tombstones. Cached hashes are reused.
    pub(crate) fn rebuild(&mut self, capacity: usize) -> Result<()> {
        debug_assert!(capacity.is_power_of_two() && capacity > self.live);
        debug!(
            "rebuilding table: {} -> {} slots ({} live, {} tombstones dropped)",
            self.capacity(),
            capacity,
            self.live,
            self.tombstones
        );

        let old = mem::replace(&mut self.slots, empty_slots(capacity)?);
        self.mask = capacity - 1;
        self.live = 0;
        self.tombstones = 0;

        for slot in old {
            if let Slot::Occupied(entry) = slot {
                let idx = self.find_vacant(entry.hash)?;
                self.place(idx, entry);
            }
        }
        Ok(())
    }

    /// Resets every slot to `Empty`, keeping the capacity.
    pub(crate) fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.live = 0;
        self.tombstones = 0;
    }
}
