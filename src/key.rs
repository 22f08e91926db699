//! Null-key support.
//!
//! A chained map accepts a "null" key and routes it to slot 0 instead of
//! hashing it. Rust keys are never null on their own, so nullability is
//! expressed through `MapKey`: `Option<T>` treats `None` as null, and every
//! other provided impl reports "never null".
//!
//! Custom key types opt in with an empty impl:
//!
//! ```
//! use chained_hashmap::MapKey;
//!
//! #[derive(Hash, PartialEq, Eq)]
//! struct UserId(u32);
//!
//! impl MapKey for UserId {}
//! ```

use std::rc::Rc;
use std::sync::Arc;

/// Key types usable with `ChainedMap`.
pub trait MapKey {
    /// Whether this key is the null key (hashes to slot 0).
    #[inline]
    fn is_null(&self) -> bool {
        false
    }
}

impl<T> MapKey for Option<T> {
    #[inline]
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl<T: ?Sized + MapKey> MapKey for &T {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: ?Sized + MapKey> MapKey for Box<T> {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: ?Sized + MapKey> MapKey for Rc<T> {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: ?Sized + MapKey> MapKey for Arc<T> {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

macro_rules! never_null {
    ($($t:ty),* $(,)?) => {
        $(impl MapKey for $t {})*
    };
}

never_null!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    str,
    String,
);

impl<T> MapKey for [T] {}
impl<T> MapKey for Vec<T> {}
impl<T, const N: usize> MapKey for [T; N] {}

impl<A, B> MapKey for (A, B) {}
impl<A, B, C> MapKey for (A, B, C) {}
impl<A, B, C, D> MapKey for (A, B, C, D) {}
