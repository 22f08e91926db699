//! Iterators over a `ChainedMap`.
//!
//! `Iter` walks the slot array in index order and, inside a populated slot,
//! follows the bucket's own iteration order. Empty slots (including any run
//! of trailing ones) are skipped without yielding.

use crate::bucket::Bucket;
use crate::error::{Error, Result};
use core::iter::{Flatten, FusedIterator, Peekable};

/// Borrowing iterator over all `(key, value)` pairs of a `ChainedMap`.
pub struct Iter<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    slots: core::slice::Iter<'a, Option<B>>,
    current: Option<Peekable<B::Iter<'a>>>,
    remaining: usize,
}

impl<'a, K, V, B> Iter<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    pub(crate) fn new(slots: &'a [Option<B>], len: usize) -> Self {
        Self {
            slots: slots.iter(),
            current: None,
            remaining: len,
        }
    }

    /// Whether another entry is available.
    ///
    /// Moves past exhausted buckets and empty slots but never consumes an
    /// entry, so repeated calls return the same answer.
    pub fn has_next(&mut self) -> bool {
        loop {
            if let Some(bucket) = self.current.as_mut() {
                if bucket.peek().is_some() {
                    return true;
                }
            }
            match self.slots.next() {
                Some(slot) => self.current = slot.as_ref().map(|b| b.iter().peekable()),
                None => {
                    self.current = None;
                    return false;
                }
            }
        }
    }

    /// Like `next`, but reports exhaustion as `Error::Exhausted`.
    pub fn try_next(&mut self) -> Result<(&'a K, &'a V)> {
        self.next().ok_or(Error::Exhausted)
    }
}

impl<'a, K, V, B> Iterator for Iter<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_next() {
            return None;
        }
        let entry = self.current.as_mut()?.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, B> ExactSizeIterator for Iter<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
}

impl<'a, K, V, B> FusedIterator for Iter<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
}

/// Keys of a `ChainedMap`, in `Iter` order.
pub struct Keys<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    pub(crate) inner: Iter<'a, K, V, B>,
}

impl<'a, K, V, B> Iterator for Keys<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    type Item = &'a K;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V, B> ExactSizeIterator for Keys<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
}

impl<'a, K, V, B> FusedIterator for Keys<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
}

/// Values of a `ChainedMap`, in `Iter` order.
pub struct Values<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    pub(crate) inner: Iter<'a, K, V, B>,
}

impl<'a, K, V, B> Iterator for Values<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    type Item = &'a V;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V, B> ExactSizeIterator for Values<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
}

impl<'a, K, V, B> FusedIterator for Values<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
}

/// Owning iterator; drains slots in index order.
pub struct IntoIter<K, V, B>
where
    B: IntoIterator<Item = (K, V)>,
{
    inner: Flatten<Flatten<std::vec::IntoIter<Option<B>>>>,
    remaining: usize,
}

impl<K, V, B> IntoIter<K, V, B>
where
    B: IntoIterator<Item = (K, V)>,
{
    pub(crate) fn new(slots: Vec<Option<B>>, len: usize) -> Self {
        Self {
            inner: slots.into_iter().flatten().flatten(),
            remaining: len,
        }
    }
}

impl<K, V, B> Iterator for IntoIter<K, V, B>
where
    B: IntoIterator<Item = (K, V)>,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, B> ExactSizeIterator for IntoIter<K, V, B> where B: IntoIterator<Item = (K, V)> {}
