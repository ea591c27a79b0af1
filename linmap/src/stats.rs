//! Occupancy and probe-length statistics

use core::fmt;

use crate::probe::probe_distance;
use crate::table::{RawTable, Slot};

/// Snapshot of slot usage, taken by [`HashMap::stats`](crate::HashMap::stats)
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TableStats {
    /// Total number of slots
    pub capacity: usize,
    /// Live entries
    pub live: usize,
    /// Deleted slots still held as tombstones
    pub tombstones: usize,
    /// Never-used slots
    pub empty: usize,
    /// Longest distance from a live entry's home slot to where it sits
    pub max_probe: usize,
    /// Sum of those distances over all live entries
    pub total_probe: usize,
}

impl TableStats {
    pub(crate) fn collect<K, V>(table: &RawTable<K, V>) -> Self {
        let mask = table.mask();
        let mut stats = TableStats {
            capacity: table.capacity(),
            ..TableStats::default()
        };

        for (idx, slot) in table.slots().iter().enumerate() {
            match slot {
                Slot::Empty => stats.empty += 1,
                Slot::Tombstone => stats.tombstones += 1,
                Slot::Occupied(entry) => {
                    let distance = probe_distance(entry.hash, idx, mask);
                    stats.live += 1;
                    stats.total_probe += distance;
                    stats.max_probe = stats.max_probe.max(distance);
                }
            }
        }
        stats
    }

    /// Live entries over capacity
    pub fn load_factor(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.live as f64 / self.capacity as f64
        }
    }

    /// Live entries plus tombstones over capacity
    pub fn occupancy(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            (self.live + self.tombstones) as f64 / self.capacity as f64
        }
    }

    /// Mean distance from home slot over live entries
    pub fn avg_probe(&self) -> f64 {
        if self.live == 0 {
            0.0
        } else {
            self.total_probe as f64 / self.live as f64
        }
    }
}

impl fmt::Display for TableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.live == 0 && self.tombstones == 0 {
            return write!(f, "table size: {}, no entries", self.capacity);
        }
        writeln!(f, "table size: {}", self.capacity)?;
        writeln!(
            f,
            "live: {}, tombstones: {}, empty: {}",
            self.live, self.tombstones, self.empty
        )?;
        writeln!(
            f,
            "load factor: {:.3}, occupancy: {:.3}",
            self.load_factor(),
            self.occupancy()
        )?;
        write!(
            f,
            "max probe length: {}, avg probe length: {:.3}",
            self.max_probe,
            self.avg_probe()
        )
    }
}
