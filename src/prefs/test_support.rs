//! Test support utilities - only compiled in test builds.

use crate::prefs::{
    error::PrefsError,
    medium::{BackingMedium, GuardedMedium, MemMedium},
    store::PrefStore,
    types::{Word, WriteOutcome},
};

/// Standard test configuration: 128-word persistent store, 64-word session
/// store guarded over its first 32 words (the bootloader window).
pub type TestPersistent = MemMedium<128>;
pub type TestSession = GuardedMedium<MemMedium<64>>;
pub type TestStore = PrefStore<TestPersistent, TestSession>;

/// Helper to create the default test store.
pub fn test_store() -> TestStore {
    PrefStore::new(
        MemMedium::new(),
        GuardedMedium::with_reserved(MemMedium::new(), 32),
    )
}

/// Medium decorator counting physical writes that reach the inner store.
///
/// Suppressed and failed writes do not count; the counter tracks actual
/// wear on the medium.
pub struct CountingMedium<M> {
    inner: M,
    writes: usize,
}

impl<M> CountingMedium<M> {
    pub fn new(inner: M) -> Self {
        Self { inner, writes: 0 }
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl<M: BackingMedium> BackingMedium for CountingMedium<M> {
    fn capacity_words(&self) -> usize {
        self.inner.capacity_words()
    }

    fn read_words(&self, offset: usize, out: &mut [Word]) -> Result<(), PrefsError> {
        self.inner.read_words(offset, out)
    }

    fn write_words(&mut self, offset: usize, words: &[Word]) -> Result<WriteOutcome, PrefsError> {
        let outcome = self.inner.write_words(offset, words)?;
        if outcome.is_committed() {
            self.writes += 1;
        }
        Ok(outcome)
    }

    fn set_write_prevention(&mut self, active: bool) {
        self.inner.set_write_prevention(active);
    }
}

/// Store whose mediums count every committed physical write.
pub type CountingStore = PrefStore<CountingMedium<MemMedium<128>>, CountingMedium<MemMedium<64>>>;

pub fn counting_store() -> CountingStore {
    PrefStore::new(
        CountingMedium::new(MemMedium::new()),
        CountingMedium::new(MemMedium::new()),
    )
}
