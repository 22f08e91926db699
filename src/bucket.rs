//! Bucket contract: the per-slot container a `ChainedMap` delegates to.
//!
//! A bucket is a small ordered map with unique keys. The chained map never
//! inspects a bucket's layout; it only relies on the operations below and
//! on the iteration order staying stable for a given bucket instance.

use core::borrow::Borrow;

/// Per-slot entry container.
///
/// `IntoIterator` moves the entries out in the same order `iter` yields
/// them; the map uses it to replay entries during a resize.
pub trait Bucket<K, V>: IntoIterator<Item = (K, V)> {
    /// Borrowing iterator over `(key, value)` pairs.
    type Iter<'a>: Iterator<Item = (&'a K, &'a V)>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Empty bucket with room for `capacity` entries before growing.
    fn with_capacity(capacity: usize) -> Self
    where
        Self: Sized;

    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq;

    fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq;

    /// Insert or overwrite; returns the previous value for `key`, if any.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq;

    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.get(key).is_some()
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Self::Iter<'_>;
}

/// Produces fresh buckets for empty slots.
///
/// Any `Fn(usize) -> B` closure is a factory; the argument is the initial
/// capacity configured on the map.
pub trait BucketFactory<B> {
    fn create(&self, initial_capacity: usize) -> B;
}

impl<B, F> BucketFactory<B> for F
where
    F: Fn(usize) -> B,
{
    #[inline]
    fn create(&self, initial_capacity: usize) -> B {
        self(initial_capacity)
    }
}

/// Factory type used when none is supplied: `B::with_capacity`.
pub type DefaultFactory<B> = fn(usize) -> B;
