#![allow(unsafe_code)]

use core::cell::UnsafeCell;

use crate::prefs::store::PrefStore;

/// Shares one [`PrefStore`] across execution contexts.
///
/// The core types assume exclusive access (there is no locking inside
/// them). Holding the store in a `static` so that components keep saving
/// state while an update task toggles write prevention requires `Sync`;
/// this wrapper provides it by funneling every access through a critical
/// section.
///
/// ```rust
/// use embedded_prefs::prelude::*;
///
/// static PREFS: SharedPrefStore<MemMedium<64>, NoMedium> =
///     SharedPrefStore::new(PrefStore::new(MemMedium::new(), NoMedium));
///
/// PREFS.with(|store| {
///     store.set_write_prevention(true);
/// });
/// ```
pub struct SharedPrefStore<P, S> {
    inner: UnsafeCell<PrefStore<P, S>>,
}

// Exclusive access is enforced by the critical section in `with`;
// `with_unchecked` shifts that burden to the caller.
unsafe impl<P: Send, S: Send> Sync for SharedPrefStore<P, S> {}

impl<P, S> core::fmt::Debug for SharedPrefStore<P, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedPrefStore").finish_non_exhaustive()
    }
}

impl<P, S> SharedPrefStore<P, S> {
    pub const fn new(store: PrefStore<P, S>) -> Self {
        Self {
            inner: UnsafeCell::new(store),
        }
    }

    /// Runs `f` with exclusive access to the store inside a critical
    /// section.
    pub fn with<R>(&self, f: impl FnOnce(&mut PrefStore<P, S>) -> R) -> R {
        critical_section::with(|_| unsafe { self.with_unchecked(f) })
    }

    /// Runs `f` with access to the store, without taking a critical
    /// section.
    ///
    /// # Safety
    /// The caller must guarantee that no other context accesses the store
    /// for the duration of `f` — for instance during single-threaded setup,
    /// or with interrupts masked.
    pub unsafe fn with_unchecked<R>(&self, f: impl FnOnce(&mut PrefStore<P, S>) -> R) -> R {
        f(unsafe { &mut *self.inner.get() })
    }

    /// Consumes the wrapper, returning the store.
    pub fn into_inner(self) -> PrefStore<P, S> {
        self.inner.into_inner()
    }
}
