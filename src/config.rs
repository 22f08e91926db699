//! Construction parameters and the `Builder` that assembles a map from them.

use crate::array_map::ArrayMap;
use crate::bucket::{Bucket, BucketFactory, DefaultFactory};
use crate::chained_map::ChainedMap;
use crate::error::{ConfigError, Result};
use crate::key::MapKey;
use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;
use hashbrown::hash_map::DefaultHashBuilder;

/// Load factor (`len / slot_count`) at which `put` doubles the slot count.
pub const DEFAULT_RESIZE_THRESHOLD: f64 = 1.0;
pub const DEFAULT_INITIAL_SLOT_COUNT: usize = 5;
pub const DEFAULT_BUCKET_INITIAL_CAPACITY: usize = 3;

/// Sizing parameters of a `ChainedMap`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Resize when `len / slot_count` reaches this value. Must be > 0.
    pub resize_threshold: f64,
    /// Number of slots allocated up front. Must be > 0.
    pub initial_slot_count: usize,
    /// Capacity passed to the bucket factory for each new bucket. Must be > 0.
    pub bucket_initial_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resize_threshold: DEFAULT_RESIZE_THRESHOLD,
            initial_slot_count: DEFAULT_INITIAL_SLOT_COUNT,
            bucket_initial_capacity: DEFAULT_BUCKET_INITIAL_CAPACITY,
        }
    }
}

impl Config {
    pub fn new(
        resize_threshold: f64,
        initial_slot_count: usize,
        bucket_initial_capacity: usize,
    ) -> Self {
        Self {
            resize_threshold,
            initial_slot_count,
            bucket_initial_capacity,
        }
    }

    pub fn with_resize_threshold(mut self, threshold: f64) -> Self {
        self.resize_threshold = threshold;
        self
    }

    pub fn with_initial_slot_count(mut self, count: usize) -> Self {
        self.initial_slot_count = count;
        self
    }

    pub fn with_bucket_initial_capacity(mut self, capacity: usize) -> Self {
        self.bucket_initial_capacity = capacity;
        self
    }

    /// Reject non-positive parameters. NaN thresholds are rejected too.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.resize_threshold.is_nan() || self.resize_threshold <= 0.0 {
            return Err(ConfigError::ResizeThreshold(self.resize_threshold));
        }
        if self.initial_slot_count == 0 {
            return Err(ConfigError::InitialSlotCount);
        }
        if self.bucket_initial_capacity == 0 {
            return Err(ConfigError::BucketInitialCapacity);
        }
        Ok(())
    }
}

/// Assembles a `ChainedMap` from a `Config`, a hash builder and a bucket
/// factory. Validation happens once, in `build`.
pub struct Builder<K, V, B = ArrayMap<K, V>, F = DefaultFactory<B>, S = DefaultHashBuilder> {
    config: Config,
    factory: F,
    hasher: S,
    _pd: PhantomData<fn() -> (K, V, B)>,
}

impl<K, V> Builder<K, V>
where
    K: Eq,
{
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            factory: <ArrayMap<K, V> as Bucket<K, V>>::with_capacity,
            hasher: DefaultHashBuilder::default(),
            _pd: PhantomData,
        }
    }
}

impl<K, V> Default for Builder<K, V>
where
    K: Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, B, F, S> Builder<K, V, B, F, S> {
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn resize_threshold(mut self, threshold: f64) -> Self {
        self.config.resize_threshold = threshold;
        self
    }

    pub fn initial_slot_count(mut self, count: usize) -> Self {
        self.config.initial_slot_count = count;
        self
    }

    pub fn bucket_initial_capacity(mut self, capacity: usize) -> Self {
        self.config.bucket_initial_capacity = capacity;
        self
    }

    /// Replace the hash builder.
    pub fn with_hasher<T>(self, hasher: T) -> Builder<K, V, B, F, T> {
        Builder {
            config: self.config,
            factory: self.factory,
            hasher,
            _pd: PhantomData,
        }
    }

    /// Replace the bucket factory, and with it the bucket type.
    pub fn with_bucket_factory<B2, F2>(self, factory: F2) -> Builder<K, V, B2, F2, S>
    where
        F2: BucketFactory<B2>,
    {
        Builder {
            config: self.config,
            factory,
            hasher: self.hasher,
            _pd: PhantomData,
        }
    }
}

impl<K, V, B, F, S> Builder<K, V, B, F, S>
where
    B: Bucket<K, V>,
{
    /// Build without validation. Only for configs known to be valid, such
    /// as the defaults.
    pub(crate) fn assemble(self) -> ChainedMap<K, V, B, F, S> {
        ChainedMap::assemble(self.config, self.factory, self.hasher)
    }
}

impl<K, V, B, F, S> Builder<K, V, B, F, S>
where
    K: MapKey + Hash + Eq,
    B: Bucket<K, V>,
    F: BucketFactory<B>,
    S: BuildHasher,
{
    pub fn build(self) -> Result<ChainedMap<K, V, B, F, S>> {
        ChainedMap::from_parts(self.config, self.factory, self.hasher)
    }
}
