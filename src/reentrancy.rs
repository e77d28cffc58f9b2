//! Debug-only detection of reentrant calls into a map.
//!
//! The map invokes user-supplied hash and equality callbacks while a bucket
//! chain is being probed or relinked. A callback that calls back into the
//! same map would observe it half-updated, so debug builds panic on the
//! nested entry and name both operations. Release builds compile this to
//! nothing.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-map record of the operation currently running, if any.
#[derive(Debug)]
pub(crate) struct ReentrancyCheck {
    #[cfg(debug_assertions)]
    active: Cell<Option<&'static str>>,
    // Single-threaded: keeps the owning map !Send + !Sync.
    _unsync: PhantomData<*mut ()>,
}

impl ReentrancyCheck {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(None),
            _unsync: PhantomData,
        }
    }

    /// Marks `op` as running until the returned guard drops.
    ///
    /// Panics in debug builds when another operation is still running.
    #[inline]
    pub(crate) fn enter(&self, op: &'static str) -> Entered<'_> {
        #[cfg(debug_assertions)]
        {
            if let Some(outer) = self.active.replace(Some(op)) {
                panic!("reentrant map call: `{op}` entered while `{outer}` was running");
            }
            Entered { check: self }
        }

        #[cfg(not(debug_assertions))]
        {
            let _ = op;
            Entered { _lt: PhantomData }
        }
    }

    #[cfg(all(test, debug_assertions))]
    fn active(&self) -> Option<&'static str> {
        self.active.get()
    }
}

impl Default for ReentrancyCheck {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears the running operation on drop.
pub(crate) struct Entered<'a> {
    #[cfg(debug_assertions)]
    check: &'a ReentrancyCheck,
    #[cfg(not(debug_assertions))]
    _lt: PhantomData<&'a ()>,
}

impl Drop for Entered<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.check.active.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::ReentrancyCheck;

    #[test]
    fn sequential_entries_are_fine() {
        let r = ReentrancyCheck::new();
        {
            let _g = r.enter("put");
        }
        let _g = r.enter("get");
    }

    #[cfg(debug_assertions)]
    #[test]
    fn guard_drop_clears_operation() {
        let r = ReentrancyCheck::new();
        {
            let _g = r.enter("delete");
            assert_eq!(r.active(), Some("delete"));
        }
        assert_eq!(r.active(), None);
    }

    #[cfg(debug_assertions)]
    #[test]
    fn nested_entry_panics_with_both_names() {
        let r = ReentrancyCheck::new();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _outer = r.enter("put");
            let _inner = r.enter("get");
        }));
        let payload = res.expect_err("nested entry must panic in debug builds");
        let msg = payload
            .downcast_ref::<String>()
            .cloned()
            .unwrap_or_default();
        assert!(msg.contains("`get`") && msg.contains("`put`"), "{msg}");
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn nested_entry_is_noop_in_release() {
        let r = ReentrancyCheck::new();
        let _a = r.enter("put");
        let _b = r.enter("get");
    }
}
