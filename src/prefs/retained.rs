use heapless::Vec;

use crate::prefs::{
    error::PrefsError,
    medium::BackingMedium,
    policy::Retention,
    record::MAX_RECORD_WORDS,
    slot::PrefSlot,
    store::PrefStore,
    types::WORD_BYTES,
    value::PrefValue,
};

/// Largest encoded value a retained wrapper can marshal, in bytes.
pub const MAX_VALUE_BYTES: usize = MAX_RECORD_WORDS * WORD_BYTES;

type ValueBuf = Vec<u8, MAX_VALUE_BYTES>;

/// A typed value that remembers itself across reboots according to its
/// retention policy.
///
/// Components create one per state field during setup, [`bind`](Self::bind)
/// it once, and from then on read through [`get`](Self::get) and write
/// through [`save`](Self::save). Storage trouble never surfaces to the
/// component: any failed or missing record degrades to the default value.
///
/// ```rust
/// use embedded_prefs::prelude::*;
///
/// let mut store = PrefStoreBuilder::new()
///     .persistent(MemMedium::<64>::new())
///     .no_session()
///     .build();
///
/// let mut target_temp = Retained::new(0x434C_4D01, Retention::AlwaysPersist, 21i16);
/// target_temp.bind(&mut store);
///
/// target_temp.save(&mut store, &23).unwrap();
/// assert_eq!(target_temp.get(&store), 23);
/// ```
pub struct Retained<T> {
    type_tag: u32,
    policy: Retention,
    default: T,
    slot: PrefSlot,
}

impl<T> core::fmt::Debug for Retained<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Retained")
            .field("type_tag", &self.type_tag)
            .field("policy", &self.policy)
            .field("bound", &self.slot.is_initialized())
            .finish_non_exhaustive()
    }
}

impl<T: PrefValue> Retained<T> {
    /// Creates an unbound wrapper.
    ///
    /// Until [`bind`](Self::bind) attaches storage, every read produces the
    /// default and saves go nowhere.
    pub const fn new(type_tag: u32, policy: Retention, default: T) -> Self {
        Self {
            type_tag,
            policy,
            default,
            slot: PrefSlot::uninitialized(),
        }
    }

    /// Allocates this value's region, once.
    ///
    /// No-op for `Ephemeral` values and on repeated calls. Binding happens
    /// during the single-threaded setup phase; the bind order across the
    /// image determines the region layout, so it must be deterministic.
    ///
    /// # Panics
    /// Panics when the selected medium cannot hold the region (boot-time
    /// configuration fault, see [`PrefStore::allocate`]).
    pub fn bind<P, S>(&mut self, store: &mut PrefStore<P, S>)
    where
        P: BackingMedium,
        S: BackingMedium,
    {
        if self.slot.is_initialized() {
            return;
        }
        let Some(medium) = self.policy.medium() else {
            return;
        };
        self.slot = store.allocate(T::encoded_words(), self.type_tag, medium);
    }

    /// Reads the current value.
    ///
    /// `Ephemeral` values return the default without touching storage. For
    /// the stored classes, any failure (unbound slot, checksum mismatch,
    /// medium error) degrades to a copy of the default.
    pub fn get<P, S>(&self, store: &PrefStore<P, S>) -> T
    where
        P: BackingMedium,
        S: BackingMedium,
    {
        if !self.policy.is_stored() {
            return self.default.clone();
        }
        match self.load_stored(store) {
            Some(value) => value,
            None => self.default.clone(),
        }
    }

    /// Writes `value`, skipping the physical write when the stored record
    /// already holds it.
    ///
    /// The skip matters: session and persistent stores have a limited
    /// number of write cycles, so a component may call this every loop
    /// iteration and only actual changes reach the medium. `Ephemeral`
    /// values ignore the call.
    ///
    /// The result is advisory. A [`PrefsError::WriteSuppressed`] caller may
    /// retry after the update window closes; everyone else can ignore it
    /// and live with the default on next boot.
    pub fn save<P, S>(&self, store: &mut PrefStore<P, S>, value: &T) -> Result<(), PrefsError>
    where
        P: BackingMedium,
        S: BackingMedium,
    {
        if !self.policy.is_stored() {
            return Ok(());
        }
        if let Some(stored) = self.load_stored(store) {
            if stored == *value {
                return Ok(());
            }
        }

        let mut buf = ValueBuf::new();
        buf.resize(T::ENCODED_LEN, 0)
            .map_err(|_| PrefsError::TooLarge)?;
        value.encode_to(&mut buf);
        self.slot.save(store, &buf)
    }

    fn load_stored<P, S>(&self, store: &PrefStore<P, S>) -> Option<T>
    where
        P: BackingMedium,
        S: BackingMedium,
    {
        let mut buf = ValueBuf::new();
        buf.resize(T::ENCODED_LEN, 0).ok()?;
        self.slot.load(store, &mut buf).ok()?;
        Some(T::decode_from(&buf))
    }

    pub fn policy(&self) -> Retention {
        self.policy
    }

    pub fn type_tag(&self) -> u32 {
        self.type_tag
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Returns true once [`bind`](Self::bind) has attached storage.
    pub fn is_bound(&self) -> bool {
        self.slot.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::test_support::{counting_store, test_store};

    #[test]
    fn unsaved_value_reads_as_default() {
        let mut store = test_store();
        let mut value = Retained::new(0x1001, Retention::AlwaysPersist, 42i32);
        value.bind(&mut store);

        assert_eq!(value.get(&store), 42);
    }

    #[test]
    fn unbound_value_reads_as_default() {
        let store = test_store();
        let value = Retained::new(0x1001, Retention::AlwaysPersist, 42i32);

        assert!(!value.is_bound());
        assert_eq!(value.get(&store), 42);
    }

    #[test]
    fn bind_is_idempotent() {
        let mut store = test_store();
        let mut value = Retained::new(0x1001, Retention::AlwaysPersist, 0u32);

        value.bind(&mut store);
        let region = *value.slot.region();
        value.bind(&mut store);

        assert_eq!(*value.slot.region(), region);
    }

    #[test]
    fn saved_value_survives_and_reads_back() {
        let mut store = test_store();
        let mut value = Retained::new(0x1001, Retention::AlwaysPersist, 42i32);
        value.bind(&mut store);

        value.save(&mut store, &7).unwrap();
        assert_eq!(value.get(&store), 7);
    }

    #[test]
    fn corrupted_record_degrades_to_default() {
        let mut store = test_store();
        let mut value = Retained::new(0x1001, Retention::AlwaysPersist, 42i32);
        value.bind(&mut store);
        value.save(&mut store, &7).unwrap();

        store.persistent_mut().words_mut()[value.slot.region().offset] ^= 0x100;

        assert_eq!(value.get(&store), 42);
    }

    #[test]
    fn repeated_saves_of_the_same_value_write_once() {
        let mut store = counting_store();
        let mut value = Retained::new(0x1001, Retention::AlwaysPersist, 0u32);
        value.bind(&mut store);

        value.save(&mut store, &9).unwrap();
        value.save(&mut store, &9).unwrap();
        value.save(&mut store, &9).unwrap();
        assert_eq!(store.persistent().writes(), 1);

        // A changed value writes again
        value.save(&mut store, &10).unwrap();
        assert_eq!(store.persistent().writes(), 2);
    }

    #[test]
    fn ephemeral_never_touches_the_medium() {
        let mut store = counting_store();
        let mut value = Retained::new(0x1001, Retention::Ephemeral, 5u8);
        value.bind(&mut store);

        assert!(!value.is_bound());
        value.save(&mut store, &99).unwrap();

        assert_eq!(value.get(&store), 5);
        assert_eq!(store.persistent().writes(), 0);
        assert_eq!(store.session().writes(), 0);
    }

    #[test]
    fn session_value_resets_on_power_loss_but_persistent_survives() {
        let mut store = test_store();

        let mut session = Retained::new(0x1001, Retention::SessionPersist, 42i32);
        let mut persistent = Retained::new(0x1002, Retention::AlwaysPersist, 42i32);
        session.bind(&mut store);
        persistent.bind(&mut store);

        assert_eq!(session.get(&store), 42);
        session.save(&mut store, &7).unwrap();
        persistent.save(&mut store, &7).unwrap();
        assert_eq!(session.get(&store), 7);
        assert_eq!(persistent.get(&store), 7);

        // Power loss clears the session store; the persistent one keeps
        // its contents
        store.session_mut().inner_mut().power_cycle();

        assert_eq!(session.get(&store), 42);
        assert_eq!(persistent.get(&store), 7);
    }

    #[test]
    fn composite_state_round_trips() {
        let mut store = test_store();
        let mut value = Retained::new(0x1003, Retention::AlwaysPersist, (false, 128u8));
        value.bind(&mut store);

        value.save(&mut store, &(true, 200)).unwrap();
        assert_eq!(value.get(&store), (true, 200));
    }
}
