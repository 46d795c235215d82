use core::marker::PhantomData;

use crate::prefs::{
    medium::{BackingMedium, NoMedium},
    store::PrefStore,
};

// Builder states
pub struct NeedPersistent;
pub struct NeedSession;
pub struct Ready;

/// Typestate builder for [`PrefStore`].
///
/// Walks through the two medium slots in order, so a store cannot be built
/// with a slot left unset:
///
/// ```rust
/// use embedded_prefs::prelude::*;
///
/// let store = PrefStoreBuilder::new()
///     .persistent(MemMedium::<128>::new())
///     .no_session()
///     .build();
/// # let _ = store;
/// ```
#[derive(Default)]
pub struct PrefStoreBuilder<P, S, State> {
    persistent: Option<P>,
    session: Option<S>,
    _phantom: PhantomData<State>,
}

impl PrefStoreBuilder<(), (), NeedPersistent> {
    pub fn new() -> Self {
        PrefStoreBuilder {
            persistent: None,
            session: None,
            _phantom: PhantomData,
        }
    }

    /// Set the medium that survives full power loss.
    pub fn persistent<P: BackingMedium>(self, medium: P) -> PrefStoreBuilder<P, (), NeedSession> {
        PrefStoreBuilder {
            persistent: Some(medium),
            session: None,
            _phantom: PhantomData,
        }
    }

    /// Build without a power-loss-durable store; always-persist values fall
    /// back to their defaults on every cold boot.
    pub fn no_persistent(self) -> PrefStoreBuilder<NoMedium, (), NeedSession> {
        self.persistent(NoMedium)
    }
}

impl<P: BackingMedium> PrefStoreBuilder<P, (), NeedSession> {
    /// Set the medium that survives a warm reboot but not power loss.
    pub fn session<S: BackingMedium>(self, medium: S) -> PrefStoreBuilder<P, S, Ready> {
        PrefStoreBuilder {
            persistent: self.persistent,
            session: Some(medium),
            _phantom: PhantomData,
        }
    }

    /// Build without a reboot-durable store; session values fall back to
    /// their defaults on every boot.
    pub fn no_session(self) -> PrefStoreBuilder<P, NoMedium, Ready> {
        self.session(NoMedium)
    }
}

impl<P: BackingMedium, S: BackingMedium> PrefStoreBuilder<P, S, Ready> {
    /// Build the final [`PrefStore`] instance.
    pub fn build(self) -> PrefStore<P, S> {
        PrefStore::new(self.persistent.unwrap(), self.session.unwrap())
    }
}
