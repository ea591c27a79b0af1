//! Resize policy
//!
//! Decides when the slot array grows and whether tombstones may be purged
//! without growing.

use crate::error::{MapError, Result};
use crate::{LOAD_FACTOR, MIN_CAPACITY};

/// How tombstones are accounted for when deciding to rebuild the table
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TombstonePolicy {
    /// Tombstones stay until the next grow; only live length triggers a rebuild.
    ///
    /// Heavy insert/delete churn on a small key set can fill the whole array
    /// with tombstones. Probe walks stay bounded by the capacity, but a miss
    /// then scans every slot.
    #[default]
    KeepUntilGrow,
    /// Additionally rebuild in place, at the same capacity, once live entries
    /// plus tombstones would cross the load factor.
    PurgeOnLoad,
}

/// What the table has to do before placing a new key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rebuild {
    /// Nothing, there is room
    None,
    /// Double the capacity
    Grow,
    /// Rehash at the current capacity to drop tombstones
    Purge,
}

/// Load-factor threshold and tombstone handling for a [`HashMap`](crate::HashMap)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizePolicy {
    load_factor: f64,
    tombstones: TombstonePolicy,
}

impl ResizePolicy {
    /// Default policy: grow past [`LOAD_FACTOR`], keep tombstones until then
    pub const fn new() -> Self {
        Self {
            load_factor: LOAD_FACTOR,
            tombstones: TombstonePolicy::KeepUntilGrow,
        }
    }

    /// Sets the load factor; it must lie strictly between 0 and 1
    ///
    /// # Examples
    ///
    /// ```
    /// use linmap::{MapError, ResizePolicy};
    ///
    /// let policy = ResizePolicy::new().with_load_factor(0.5).unwrap();
    /// assert_eq!(policy.load_factor(), 0.5);
    ///
    /// assert_eq!(
    ///     ResizePolicy::new().with_load_factor(1.0),
    ///     Err(MapError::InvalidLoadFactor(1.0))
    /// );
    /// ```
    pub fn with_load_factor(mut self, load_factor: f64) -> Result<Self> {
        // NaN fails both comparisons
        if !(load_factor > 0.0 && load_factor < 1.0) {
            return Err(MapError::InvalidLoadFactor(load_factor));
        }
        self.load_factor = load_factor;
        Ok(self)
    }

    /// Sets how tombstones count toward a rebuild
    pub const fn with_tombstones(mut self, tombstones: TombstonePolicy) -> Self {
        self.tombstones = tombstones;
        self
    }

    /// Returns the load factor threshold
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns the tombstone policy
    pub fn tombstones(&self) -> TombstonePolicy {
        self.tombstones
    }

    /// Whether `used` occupied-or-tombstoned slots exceed the threshold
    #[inline]
    fn over_threshold(&self, used: usize, capacity: usize) -> bool {
        used as f64 > capacity as f64 * self.load_factor
    }

    /// Decides what to do before a new key joins `live` entries and
    /// `tombstones` tombstones in a table of `capacity` slots.
    pub(crate) fn before_insert(&self, live: usize, tombstones: usize, capacity: usize) -> Rebuild {
        if self.over_threshold(live + 1, capacity) {
            return Rebuild::Grow;
        }
        match self.tombstones {
            TombstonePolicy::PurgeOnLoad if self.over_threshold(live + tombstones + 1, capacity) => {
                Rebuild::Purge
            }
            _ => Rebuild::None,
        }
    }

    /// Smallest capacity, `MIN_CAPACITY` doubled zero or more times, that
    /// holds `items` live entries without growing.
    pub(crate) fn capacity_for(&self, items: usize) -> Result<usize> {
        let mut capacity = MIN_CAPACITY;
        while self.over_threshold(items, capacity) {
            capacity = capacity.checked_mul(2).ok_or(MapError::CapacityOverflow)?;
        }
        Ok(capacity)
    }
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self::new()
    }
}
