//! Debug-only reentrancy check.
//!
//! A table calls user code (its hash functor and `K: PartialEq`) while it walks a
//! bucket. If that code calls back into the same table, the outer call may
//! be holding a half-finished view of the chain. Debug builds turn that into
//! a panic; release builds carry no state.

use core::marker::PhantomData;

#[cfg(debug_assertions)]
use core::cell::Cell;

#[derive(Debug)]
pub(crate) struct ReentryCheck {
    #[cfg(debug_assertions)]
    busy: Cell<bool>,
    // Single-threaded: keep the owner !Send + !Sync.
    _not_send: PhantomData<*const ()>,
}

impl ReentryCheck {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            busy: Cell::new(false),
            _not_send: PhantomData,
        }
    }

    /// Marks the owner busy until the returned scope is dropped.
    #[inline]
    pub(crate) fn enter(&self) -> Scope<'_> {
        #[cfg(debug_assertions)]
        assert!(
            !self.busy.replace(true),
            "hash table re-entered from its hash functor or key comparison"
        );
        Scope { check: self }
    }
}

pub(crate) struct Scope<'a> {
    #[cfg_attr(not(debug_assertions), allow(dead_code))]
    check: &'a ReentryCheck,
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.check.busy.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::ReentryCheck;

    #[test]
    fn sequential_entries_are_fine() {
        let check = ReentryCheck::new();
        drop(check.enter());
        let _again = check.enter();
    }

    #[cfg(debug_assertions)]
    #[test]
    fn nested_entry_panics_in_debug() {
        let check = ReentryCheck::new();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _outer = check.enter();
            let _inner = check.enter();
        }));
        assert!(res.is_err(), "expected nested entry to panic in debug builds");
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn nested_entry_is_noop_in_release() {
        let check = ReentryCheck::new();
        let _outer = check.enter();
        let _inner = check.enter();
    }
}
