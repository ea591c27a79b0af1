//! Open-addressing hash map with linear probing and tombstones
//!
//! This crate provides a single-threaded hash map that keeps every entry in
//! one flat slot array. Collisions are resolved by walking forward from the
//! key's home slot; deletions leave tombstones so that walks for other keys
//! stay intact; the array doubles once live entries would cross the load
//! factor.
//!
//! # Features
//!
//! - **Flat Layout**: `Empty` / `Occupied` / `Tombstone` slots in one array, no per-entry boxes
//! - **Bounded Probing**: every walk stops after one full cycle of the table
//! - **Typed Errors**: misses and malformed input come back as [`MapError`]
//! - **Configurable Rebuilds**: load factor and tombstone handling via [`ResizePolicy`]
//! - **Deterministic Hashing**: `foldhash`'s fixed-seed hasher by default
//! - **`no_std`**: needs only `alloc` with default features off
//!
//! # Example
//!
//! ```rust
//! use linmap::{HashMap, MapError};
//!
//! let mut map = HashMap::new();
//!
//! map.set("one", 1)?;
//! map.set("two", 2)?;
//! map.set("one", 11)?;
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("one"), Ok(&11));
//! assert_eq!(map.get_or_default("three", &0), &0);
//!
//! assert_eq!(map.delete("two"), Ok(2));
//! assert_eq!(map.get("two"), Err(MapError::KeyNotFound));
//! # Ok::<(), MapError>(())
//! ```
//!
//! Keys must be hashable and comparable; anything else is rejected when the
//! program is compiled:
//!
//! ```compile_fail
//! use linmap::HashMap;
//!
//! let mut map = HashMap::new();
//! map.set(vec![1.5_f64], "floats are not Hash").unwrap();
//! ```

#![warn(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod error;
mod hashmap;
mod iter;
mod policy;
mod probe;
mod stats;
mod table;

pub use error::{MapError, Result};
pub use hashmap::HashMap;
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use policy::{ResizePolicy, TombstonePolicy};
pub use stats::TableStats;

/// Smallest number of slots a table ever has
pub const MIN_CAPACITY: usize = 8;

/// Default ratio of live entries to slots above which the table doubles
pub const LOAD_FACTOR: f64 = 0.65;

/// A [`HashMap`] seeded per process instead of with fixed keys
///
/// Use it when keys come from untrusted input and hash flooding matters more
/// than reproducible slot order.
#[cfg(feature = "std")]
pub type RandomHashMap<K, V> = HashMap<K, V, foldhash::fast::RandomState>;
