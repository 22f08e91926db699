//! chained-hashmap: a separate-chaining hash map whose per-slot containers
//! ("buckets") are pluggable.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a hash map that resolves collisions by chaining, where the chain
//!   for each slot is any type implementing `Bucket<K, V>`.
//! - Layers:
//!   - `Bucket<K, V>`: small ordered map with unique keys. `ArrayMap` is the
//!     default: a linear `Vec<(K, V)>`.
//!   - `BucketFactory<B>`: produces an empty bucket for a slot on its first
//!     insertion, given the configured initial capacity. Closures qualify.
//!   - `ChainedMap<K, V, B, F, S>`: the slot array, entry count and resize
//!     policy. Hashing goes through a `BuildHasher` (`S`).
//!
//! Constraints
//! - Slot count starts at `initial_slot_count` and only ever doubles.
//! - `len()` is O(1) and always equals the number of distinct live keys.
//! - Slots are empty until first written; lookups never allocate.
//! - Keys are compared only inside their slot's bucket.
//!
//! Resize policy
//! - Before every `put`, if `len / slot_count >= resize_threshold`, the slot
//!   count doubles and every entry is replayed through `put` into the new
//!   table. Replay walks old slots in index order and each bucket in its own
//!   iteration order.
//! - The check runs before the insert, so an insert that triggers a resize
//!   lands in the grown table, and an overwrite at the threshold still
//!   resizes.
//! - While a replay runs, `put` skips the load check. At most one doubling
//!   happens per `put`.
//!
//! Null keys
//! - Keys implement `MapKey`. `Option<T>` treats `None` as the null key,
//!   which bypasses the hasher and always lives in slot 0.
//! - `remove` of the null key returns `None` and leaves the map unchanged.
//!
//! Iteration
//! - `iter()` yields entries in slot order, then bucket order. It holds a
//!   shared borrow, so the map cannot change underneath it.
//! - `Iter::has_next` peeks without consuming; `Iter::try_next` reports
//!   exhaustion as `Error::Exhausted` instead of `None`.
//!
//! Logging
//! - Resizes and `clear` log at `debug`, bucket creation at `trace`, through
//!   the `log` facade. No logger is installed by this crate.

pub mod array_map;
mod bucket;
mod chained_map;
mod chained_map_proptest;
mod config;
mod error;
mod iter;
mod key;
mod reentrancy;

// Public surface
pub use array_map::ArrayMap;
pub use bucket::{Bucket, BucketFactory, DefaultFactory};
pub use chained_map::ChainedMap;
pub use config::{
    Builder, Config, DEFAULT_BUCKET_INITIAL_CAPACITY, DEFAULT_INITIAL_SLOT_COUNT,
    DEFAULT_RESIZE_THRESHOLD,
};
pub use error::{ConfigError, Error, Result};
pub use iter::{IntoIter, Iter, Keys, Values};
pub use key::MapKey;

