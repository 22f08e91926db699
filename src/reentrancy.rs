//! Resize reentrancy guard.
//!
//! `ChainedMap::resize` rebuilds the table by replaying every entry through
//! `put`, and `put` is the only caller of `resize`. While the replay runs,
//! `put` must skip its load-factor check: with small thresholds the
//! half-rebuilt table can already sit above the threshold, and a nested
//! resize would restart the rebuild from a partial table. Entering a resize
//! while one is active is a bug; debug builds panic on it.
//!
//! The replay holds a `ResizeScope`, which owns the `&mut` borrow of the map
//! and clears the flag on drop, including while unwinding from a panicking
//! `Hash` or `Eq` impl.

use core::ops::{Deref, DerefMut};

/// Per-map flag. Set and cleared only through `ResizeScope`.
#[derive(Debug, Default)]
pub(crate) struct ResizeGuard {
    active: bool,
}

impl ResizeGuard {
    pub(crate) const fn new() -> Self {
        Self { active: false }
    }

    /// Mark a resize as in progress. In debug builds, panics if one already is.
    #[inline]
    fn enter(&mut self) {
        debug_assert!(
            !self.active,
            "reentrancy detected: resize entered while replaying entries"
        );
        self.active = true;
    }

    #[inline]
    fn exit(&mut self) {
        debug_assert!(self.active);
        self.active = false;
    }

    /// Whether a resize replay is in progress.
    #[inline]
    pub(crate) fn is_active(&self) -> bool {
        self.active
    }
}

/// Structures that embed a `ResizeGuard`.
pub(crate) trait Guarded {
    fn resize_guard(&mut self) -> &mut ResizeGuard;
}

/// RAII scope returned by `ResizeScope::enter`. Derefs to the guarded value.
pub(crate) struct ResizeScope<'a, T: Guarded> {
    target: &'a mut T,
}

impl<'a, T: Guarded> ResizeScope<'a, T> {
    pub(crate) fn enter(target: &'a mut T) -> Self {
        target.resize_guard().enter();
        Self { target }
    }
}

impl<T: Guarded> Deref for ResizeScope<'_, T> {
    type Target = T;
    fn deref(&self) -> &T {
        self.target
    }
}

impl<T: Guarded> DerefMut for ResizeScope<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.target
    }
}

impl<T: Guarded> Drop for ResizeScope<'_, T> {
    fn drop(&mut self) {
        self.target.resize_guard().exit();
    }
}
