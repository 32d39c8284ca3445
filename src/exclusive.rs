//! Debug-only guard against nested entry into a table.
//!
//! Probing calls into key code (`Digest::digest` and `Eq::eq`). Safe code
//! cannot reach the table from there, but key code holding a raw pointer back
//! to it can. Debug builds panic when an operation starts while another one
//! on the same table is still running; release builds compile the guard away.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-table record of the operation currently running.
#[derive(Debug)]
pub struct DebugExclusive {
    #[cfg(debug_assertions)]
    running: Cell<Option<&'static str>>,
    // The owning table is single-threaded: !Send + !Sync.
    _local: PhantomData<*mut ()>,
}

impl DebugExclusive {
    pub const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            running: Cell::new(None),
            _local: PhantomData,
        }
    }

    /// Marks `op` as running until the returned guard is dropped.
    ///
    /// Panics in debug builds if another operation is already running.
    #[inline]
    pub fn enter(&self, op: &'static str) -> ExclusiveGuard<'_> {
        #[cfg(debug_assertions)]
        {
            if let Some(outer) = self.running.get() {
                panic!("reentrant `{op}` while `{outer}` is running on the same color table");
            }
            self.running.set(Some(op));
            return ExclusiveGuard { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            let _ = op;
            return ExclusiveGuard { _owner: PhantomData };
        }
    }
}

impl Default for DebugExclusive {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard returned by [`DebugExclusive::enter`].
pub struct ExclusiveGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugExclusive,
    #[cfg(not(debug_assertions))]
    _owner: PhantomData<&'a DebugExclusive>,
}

impl Drop for ExclusiveGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            debug_assert!(self.owner.running.get().is_some());
            self.owner.running.set(None);
        }
    }
}
