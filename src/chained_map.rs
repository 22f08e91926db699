//! ChainedMap: separate-chaining hash table over pluggable buckets.

use crate::array_map::ArrayMap;
use crate::bucket::{Bucket, BucketFactory, DefaultFactory};
use crate::config::{Builder, Config};
use crate::error::Result;
use crate::iter::{IntoIter, Iter, Keys, Values};
use crate::key::MapKey;
use crate::reentrancy::{Guarded, ResizeGuard, ResizeScope};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;
use hashbrown::hash_map::DefaultHashBuilder;

/// Hash map that chains colliding keys into per-slot buckets.
///
/// Slots start empty and receive a bucket from the factory on first
/// insertion. Before each `put`, if `len / slot_count` has reached the
/// resize threshold, the slot count doubles and every entry is replayed
/// into the new table.
pub struct ChainedMap<K, V, B = ArrayMap<K, V>, F = DefaultFactory<B>, S = DefaultHashBuilder> {
    slots: Vec<Option<B>>,
    len: usize,
    resize_threshold: f64,
    bucket_initial_capacity: usize,
    factory: F,
    hasher: S,
    resizing: ResizeGuard,
    _pd: PhantomData<fn() -> (K, V)>,
}

impl<K, V> ChainedMap<K, V>
where
    K: MapKey + Hash + Eq,
{
    /// Map with the default configuration (threshold 1.0, 5 slots, buckets of 3).
    pub fn new() -> Self {
        Builder::new().assemble()
    }

    pub fn with_config(config: Config) -> Result<Self> {
        Builder::new().config(config).build()
    }

    pub fn with_params(
        resize_threshold: f64,
        initial_slot_count: usize,
        bucket_initial_capacity: usize,
    ) -> Result<Self> {
        Self::with_config(Config::new(
            resize_threshold,
            initial_slot_count,
            bucket_initial_capacity,
        ))
    }

    pub fn builder() -> Builder<K, V> {
        Builder::new()
    }
}

impl<K, V> Default for ChainedMap<K, V>
where
    K: MapKey + Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

fn empty_slots<B>(count: usize) -> Vec<Option<B>> {
    std::iter::repeat_with(|| None).take(count).collect()
}

// Accessors and iteration only need the bucket contract.
impl<K, V, B, F, S> ChainedMap<K, V, B, F, S>
where
    B: Bucket<K, V>,
{
    /// Build from parts without validating `config`.
    pub(crate) fn assemble(config: Config, factory: F, hasher: S) -> Self {
        Self {
            slots: empty_slots(config.initial_slot_count),
            len: 0,
            resize_threshold: config.resize_threshold,
            bucket_initial_capacity: config.bucket_initial_capacity,
            factory,
            hasher,
            resizing: ResizeGuard::new(),
            _pd: PhantomData,
        }
    }

    /// Number of live entries. O(1).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of slots; doubles on every resize.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// `len / slot_count`.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.slots.len() as f64
    }

    pub fn resize_threshold(&self) -> f64 {
        self.resize_threshold
    }

    pub fn bucket_initial_capacity(&self) -> usize {
        self.bucket_initial_capacity
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Entries in slot order, then in each bucket's own order.
    pub fn iter(&self) -> Iter<'_, K, V, B> {
        Iter::new(&self.slots, self.len)
    }

    pub fn keys(&self) -> Keys<'_, K, V, B> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V, B> {
        Values { inner: self.iter() }
    }

    /// Drop every entry. The slot count is kept; all buckets are discarded.
    pub fn clear(&mut self) {
        log::debug!(
            "clearing chained map: {} entries across {} slots",
            self.len,
            self.slots.len()
        );
        self.len = 0;
        self.slots = empty_slots(self.slots.len());
    }

    #[cfg(test)]
    pub(crate) fn slots_for_test(&self) -> &[Option<B>] {
        &self.slots
    }

    #[cfg(test)]
    pub(crate) fn resizing_for_test(&self) -> bool {
        self.resizing.is_active()
    }
}

impl<K, V, B, F, S> ChainedMap<K, V, B, F, S>
where
    K: MapKey + Hash + Eq,
    B: Bucket<K, V>,
    F: BucketFactory<B>,
    S: BuildHasher,
{
    pub(crate) fn from_parts(config: Config, factory: F, hasher: S) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, factory, hasher))
    }

    /// Slot for `key` in the current table. The null key always maps to 0.
    fn slot_index<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + MapKey + Hash,
    {
        if key.is_null() {
            return 0;
        }
        (self.hasher.hash_one(key) % self.slots.len() as u64) as usize
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + MapKey + Hash + Eq,
    {
        self.slots[self.slot_index(key)].as_ref()?.get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + MapKey + Hash + Eq,
    {
        let index = self.slot_index(key);
        self.slots[index].as_mut()?.get_mut(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + MapKey + Hash + Eq,
    {
        self.slots[self.slot_index(key)]
            .as_ref()
            .is_some_and(|bucket| bucket.contains_key(key))
    }

    /// Insert or overwrite. Returns the previous value for `key`, if any.
    ///
    /// The load-factor check runs before the slot is chosen, so an insert
    /// that triggers a resize lands in the grown table. Replayed inserts
    /// during a resize skip the check.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if !self.resizing.is_active() && self.load_factor() >= self.resize_threshold {
            self.resize();
        }
        let index = self.slot_index(&key);
        let factory = &self.factory;
        let capacity = self.bucket_initial_capacity;
        let bucket = self.slots[index].get_or_insert_with(|| {
            log::trace!("creating bucket for slot {index} (capacity {capacity})");
            factory.create(capacity)
        });
        if !bucket.contains_key(&key) {
            self.len += 1;
        }
        bucket.put(key, value)
    }

    /// Remove `key` and return its value.
    ///
    /// The null key is never removed: passing it returns `None` and leaves
    /// the map untouched, even when a null key is stored.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + MapKey + Hash + Eq,
    {
        if key.is_null() {
            return None;
        }
        let index = self.slot_index(key);
        let bucket = self.slots[index].as_mut()?;
        if bucket.contains_key(key) {
            self.len -= 1;
        }
        bucket.remove(key)
    }

    /// Double the slot count and replay every entry through `put`.
    ///
    /// At most one doubling happens per `put`. With `threshold * slot_count`
    /// below 1 the grown table can still be at or above the threshold; the
    /// next `put` doubles again.
    ///
    /// If a key's `Hash` or `Eq` panics mid-replay, the entries not yet
    /// replayed are dropped. `len` still matches the table and later puts
    /// keep resizing.
    fn resize(&mut self) {
        let old_count = self.slots.len();
        let new_count = old_count * 2;
        let entries = self.len;
        log::debug!("resizing chained map: {old_count} -> {new_count} slots, {entries} entries");

        let mut map = ResizeScope::enter(self);
        let old = core::mem::replace(&mut map.slots, empty_slots(new_count));
        map.len = 0;
        for (key, value) in IntoIter::new(old, entries) {
            map.put(key, value);
        }
        drop(map);

        debug_assert_eq!(self.len, entries, "resize must preserve every entry");
        log::debug!("resize complete: {} slots, load factor {:.3}", new_count, self.load_factor());
    }
}

impl<K, V, B, F, S> Guarded for ChainedMap<K, V, B, F, S> {
    fn resize_guard(&mut self) -> &mut ResizeGuard {
        &mut self.resizing
    }
}

impl<K, V, B, F, S> Clone for ChainedMap<K, V, B, F, S>
where
    B: Clone,
    F: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            len: self.len,
            resize_threshold: self.resize_threshold,
            bucket_initial_capacity: self.bucket_initial_capacity,
            factory: self.factory.clone(),
            hasher: self.hasher.clone(),
            resizing: ResizeGuard::new(),
            _pd: PhantomData,
        }
    }
}

impl<K, V, B, F, S> fmt::Debug for ChainedMap<K, V, B, F, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
    B: Bucket<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Equal when both hold the same keys with equal values, whatever the slot layout.
impl<K, V, B, F, S> PartialEq for ChainedMap<K, V, B, F, S>
where
    K: MapKey + Hash + Eq,
    V: PartialEq,
    B: Bucket<K, V>,
    F: BucketFactory<B>,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, B, F, S> Eq for ChainedMap<K, V, B, F, S>
where
    K: MapKey + Hash + Eq,
    V: Eq,
    B: Bucket<K, V>,
    F: BucketFactory<B>,
    S: BuildHasher,
{
}

impl<K, V, B, F, S> Extend<(K, V)> for ChainedMap<K, V, B, F, S>
where
    K: MapKey + Hash + Eq,
    B: Bucket<K, V>,
    F: BucketFactory<B>,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)>
    for ChainedMap<K, V, ArrayMap<K, V>, DefaultFactory<ArrayMap<K, V>>, S>
where
    K: MapKey + Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Builder::new().with_hasher(S::default()).assemble();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, B, F, S> IntoIterator for &'a ChainedMap<K, V, B, F, S>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, B, F, S> IntoIterator for ChainedMap<K, V, B, F, S>
where
    B: Bucket<K, V>,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, B>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.slots, self.len)
    }
}
