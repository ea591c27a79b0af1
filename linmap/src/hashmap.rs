//! Open-addressing hash map with linear probing and tombstones.
//!
//! # Architecture
//! - **Slots**: one flat array of `Empty` / `Occupied` / `Tombstone` cells,
//!   power-of-two sized, never below [`MIN_CAPACITY`](crate::MIN_CAPACITY).
//! - **Probing**: linear from `hash & mask`, bounded by one full cycle.
//! - **Deletion**: leaves a tombstone so later keys on the same chain stay
//!   reachable.
//! - **Growth**: doubles and rehashes from cached hashes once live entries
//!   would cross the [`ResizePolicy`] load factor.

use alloc::string::ToString;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;
use core::ops::Index;

use foldhash::fast::FixedState;

use crate::error::{MapError, Result};
use crate::iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use crate::policy::{Rebuild, ResizePolicy};
use crate::stats::TableStats;
use crate::table::{Entry, Lookup, RawTable};

/// Upper bound on the entries a bulk constructor reserves from a size hint
/// before reading any item; past it the table grows as items arrive.
const PRESIZE_LIMIT: usize = 1 << 16;

/// Single-threaded open-addressing hash map.
///
/// - `K`: key type (must implement `Hash` and `Eq`)
/// - `V`: value type
/// - `S`: hash builder, `foldhash::fast::FixedState` by default so that a
///   key always hashes to the same value
#[derive(Clone)]
pub struct HashMap<K, V, S = FixedState> {
    table: RawTable<K, V>,
    policy: ResizePolicy,
    hasher: S,
}

impl<K, V> HashMap<K, V, FixedState> {
    /// Creates an empty map with [`MIN_CAPACITY`](crate::MIN_CAPACITY) slots
    ///
    /// # Examples
    ///
    /// ```
    /// use linmap::HashMap;
    ///
    /// let map: HashMap<i32, String> = HashMap::new();
    /// assert_eq!(map.capacity(), 8);
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(FixedState::default())
    }

    /// Creates an empty map that holds `capacity` entries without growing
    ///
    /// # Examples
    ///
    /// ```
    /// use linmap::HashMap;
    ///
    /// let map: HashMap<i32, i32> = HashMap::with_capacity(100);
    /// assert_eq!(map.capacity(), 256);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the slot array for `capacity` entries cannot be allocated;
    /// see [`try_with_capacity`](Self::try_with_capacity).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, FixedState::default())
    }

    /// Creates an empty map that holds `capacity` entries without growing
    ///
    /// # Errors
    ///
    /// [`MapError::CapacityOverflow`] if the slot array cannot be represented
    /// or allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use linmap::{HashMap, MapError};
    ///
    /// assert!(HashMap::<u64, u64>::try_with_capacity(100).is_ok());
    /// assert_eq!(
    ///     HashMap::<u64, u64>::try_with_capacity(usize::MAX).err(),
    ///     Some(MapError::CapacityOverflow)
    /// );
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        Self::try_with_capacity_and_hasher(capacity, FixedState::default())
    }

    /// Creates an empty map using `policy` to decide when to rebuild
    pub fn with_policy(policy: ResizePolicy) -> Self {
        Self::with_policy_and_hasher(policy, FixedState::default())
    }
}

impl<K, V, S> HashMap<K, V, S> {
    /// Creates an empty map with the given hash builder
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_policy_and_hasher(ResizePolicy::default(), hasher)
    }

    /// Creates an empty map that holds `capacity` entries without growing
    ///
    /// # Panics
    ///
    /// Panics where [`try_with_capacity_and_hasher`](Self::try_with_capacity_and_hasher)
    /// would return an error.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        match Self::try_with_capacity_and_hasher(capacity, hasher) {
            Ok(map) => map,
            Err(err) => panic!("{err} sizing for {capacity} entries"),
        }
    }

    /// Creates an empty map that holds `capacity` entries without growing
    pub fn try_with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self> {
        let policy = ResizePolicy::default();
        Ok(Self {
            table: RawTable::with_capacity(policy.capacity_for(capacity)?)?,
            policy,
            hasher,
        })
    }

    /// Creates an empty map with the given resize policy and hash builder
    pub fn with_policy_and_hasher(policy: ResizePolicy, hasher: S) -> Self {
        Self {
            table: RawTable::new(),
            policy,
            hasher,
        }
    }

    /// Returns the number of live entries
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the map holds no live entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the number of tombstoned slots awaiting the next rebuild
    pub fn tombstones(&self) -> usize {
        self.table.tombstones()
    }

    /// Returns the resize policy
    pub fn policy(&self) -> &ResizePolicy {
        &self.policy
    }

    /// Returns a reference to the map's hash builder
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Collects slot usage and probe-length statistics
    pub fn stats(&self) -> TableStats {
        TableStats::collect(&self.table)
    }

    /// Returns an iterator over the live entries in slot order
    ///
    /// Every call starts a fresh walk of the slot array.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.table.slots(), self.table.len())
    }

    /// Returns an iterator with mutable access to the values
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let live = self.table.len();
        IterMut::new(self.table.slots_mut(), live)
    }

    /// Returns an iterator over the keys
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over the values
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Returns an iterator over mutable references to the values
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.iter_mut())
    }

    /// Drops every entry and tombstone, keeping the capacity
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Deletes every entry for which `keep` returns false
    ///
    /// Deleted slots become tombstones, exactly as with [`delete`](Self::delete).
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.table.retain(keep);
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Computes the hash of a key using the hash builder
    #[inline(always)]
    fn hash<Q>(&self, key: &Q) -> u64
    where
        Q: Hash + ?Sized,
    {
        self.hasher.hash_one(key)
    }

    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.find(self.hash(key), |k| k.borrow() == key)
    }

    /// Returns a reference to the value stored for `key`
    ///
    /// # Errors
    ///
    /// [`MapError::KeyNotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use linmap::{HashMap, MapError};
    ///
    /// let mut map = HashMap::new();
    /// map.set("one", 1).unwrap();
    /// assert_eq!(map.get("one"), Ok(&1));
    /// assert_eq!(map.get("two"), Err(MapError::KeyNotFound));
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key`
    pub fn get_key_value<Q>(&self, key: &Q) -> Result<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key)
            .and_then(|idx| self.table.entry(idx))
            .map(|entry| (&entry.key, &entry.value))
            .ok_or(MapError::KeyNotFound)
    }

    /// Returns a mutable reference to the value stored for `key`
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.find(key) {
            Some(idx) => self
                .table
                .entry_mut(idx)
                .map(|entry| &mut entry.value)
                .ok_or(MapError::KeyNotFound),
            None => Err(MapError::KeyNotFound),
        }
    }

    /// Returns the value stored for `key`, or `default` if there is none
    ///
    /// Never fails and never changes the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use linmap::HashMap;
    ///
    /// let map: HashMap<i32, &str> = HashMap::from([(2, "two")]);
    /// assert_eq!(map.get_or_default(&2, &"none"), &"two");
    /// assert_eq!(map.get_or_default(&1, &"none"), &"none");
    /// ```
    pub fn get_or_default<'a, Q>(&'a self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).unwrap_or(default)
    }

    /// Returns true if the map holds a live entry for `key`
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Stores `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// [`MapError::ProbeExhausted`] if no vacant slot is reachable, which the
    /// load-factor bound rules out for a consistent table.
    pub fn set(&mut self, key: K, value: V) -> Result<()> {
        self.insert(key, value).map(|_| ())
    }

    /// Stores `value` under `key`, returning the value it replaced
    ///
    /// Every call first lets the [`ResizePolicy`] grow or purge the table as
    /// if one more entry were joining, whether or not `key` is already
    /// present. The probe walk then updates the matching entry in place, or
    /// takes the first tombstone or empty slot for a new key.
    ///
    /// # Errors
    ///
    /// [`MapError::CapacityOverflow`] if the table cannot double, and
    /// [`MapError::ProbeExhausted`] as for [`set`](Self::set).
    ///
    /// # Examples
    ///
    /// ```
    /// use linmap::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// assert_eq!(map.insert(1, "a").unwrap(), None);
    /// assert_eq!(map.insert(1, "b").unwrap(), Some("a"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        let hash = self.hash(&key);

        let capacity = self.table.capacity();
        match self
            .policy
            .before_insert(self.table.len(), self.table.tombstones(), capacity)
        {
            Rebuild::None => {}
            Rebuild::Grow => {
                let grown = capacity.checked_mul(2).ok_or(MapError::CapacityOverflow)?;
                self.table.rebuild(grown)?;
            }
            Rebuild::Purge => self.table.rebuild(capacity)?,
        }

        match self.table.find_or_vacant(hash, |k| *k == key)? {
            Lookup::Found(idx) => Ok(self
                .table
                .entry_mut(idx)
                .map(|entry| mem::replace(&mut entry.value, value))),
            Lookup::Vacant(idx) => {
                self.table.place(idx, Entry { hash, key, value });
                Ok(None)
            }
        }
    }

    /// Deletes `key`, returning its value
    ///
    /// The slot becomes a tombstone; capacity never shrinks.
    ///
    /// # Errors
    ///
    /// [`MapError::KeyNotFound`] if the key is absent.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Deletes `key`, returning the stored key and value
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Result<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.find(key).ok_or(MapError::KeyNotFound)?;
        self.table
            .tombstone(idx)
            .map(|entry| (entry.key, entry.value))
            .ok_or(MapError::KeyNotFound)
    }

    /// Grows the table until `additional` more entries fit without a rebuild
    ///
    /// # Errors
    ///
    /// [`MapError::CapacityOverflow`] if the needed slot array cannot be
    /// represented or allocated; the map is left unchanged.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let wanted = self
            .policy
            .capacity_for(self.table.len().saturating_add(additional))?;
        if wanted > self.table.capacity() {
            self.table.rebuild(wanted)?;
        }
        Ok(())
    }

    /// Inserts every pair of `iter` in order, stopping at the first error
    ///
    /// The size hint reserves room for at most a bounded number of entries
    /// up front; longer inputs grow the table as they go.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0.min(PRESIZE_LIMIT))?;
        for (key, value) in iter {
            self.set(key, value)?;
        }
        Ok(())
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Builds a map from items that each convert into a `(key, value)` pair
    ///
    /// Items are inserted in order, so a repeated key keeps its last value.
    ///
    /// # Errors
    ///
    /// [`MapError::MalformedInput`] naming the first item whose conversion
    /// fails, or [`MapError::CapacityOverflow`] if the table cannot grow to
    /// hold the items read so far.
    ///
    /// # Examples
    ///
    /// ```
    /// use linmap::{HashMap, MapError};
    ///
    /// struct Row(Vec<&'static str>);
    ///
    /// impl TryFrom<Row> for (&'static str, &'static str) {
    ///     type Error = String;
    ///
    ///     fn try_from(row: Row) -> Result<Self, String> {
    ///         match row.0[..] {
    ///             [k, v] => Ok((k, v)),
    ///             _ => Err(format!("expected 2 components, got {}", row.0.len())),
    ///         }
    ///     }
    /// }
    ///
    /// let rows = vec![Row(vec!["a", "1"]), Row(vec!["b"])];
    /// let err = HashMap::<&str, &str>::try_from_pairs(rows).unwrap_err();
    /// assert!(matches!(err, MapError::MalformedInput { position: 1, .. }));
    /// ```
    pub fn try_from_pairs<I, P>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: TryInto<(K, V)>,
        P::Error: fmt::Display,
    {
        let pairs = pairs.into_iter();
        let presize = pairs.size_hint().0.min(PRESIZE_LIMIT);
        let mut map = Self::try_with_capacity_and_hasher(presize, S::default())?;
        for (position, pair) in pairs.enumerate() {
            let (key, value) = pair.try_into().map_err(|err| MapError::MalformedInput {
                position,
                reason: err.to_string(),
            })?;
            map.set(key, value)?;
        }
        Ok(map)
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> fmt::Debug for HashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// One `key {k}: value {v}` line per live entry, in slot order.
impl<K, V, S> fmt::Display for HashMap<K, V, S>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "key {key}: value {value}")?;
        }
        Ok(())
    }
}

impl<K, V, S> PartialEq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_ok_and(|v| v == value))
    }
}

impl<K, V, S> Eq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, Q, V, S> Index<&Q> for HashMap<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// # Panics
    ///
    /// Panics if the table cannot grow ([`MapError::CapacityOverflow`]),
    /// like the standard library's maps do on allocation failure. The load
    /// factor keeps a vacant slot on every walk, so
    /// [`MapError::ProbeExhausted`] cannot occur here.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        if let Err(err) = self.try_extend(iter) {
            panic!("extend failed: {err}");
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for HashMap<K, V, S>
where
    K: Hash + Eq + Copy,
    V: Copy,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(k, v)| (*k, *v)));
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map =
            Self::with_capacity_and_hasher(iter.size_hint().0.min(PRESIZE_LIMIT), S::default());
        map.extend(iter);
        map
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for HashMap<K, V, FixedState>
where
    K: Hash + Eq,
{
    fn from(pairs: [(K, V); N]) -> Self {
        Self::from_iter(pairs)
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let live = self.table.len();
        IntoIter::new(self.table.into_slots(), live)
    }
}
