use crate::prefs::{
    error::PrefsError,
    types::{Word, WriteOutcome},
};

/// Contract the preference layer requires from a backing store.
///
/// Word-oriented and addressable by word offset. Implementations stand in
/// for flash-like persistent memory, reboot-persistent RTC memory, or no
/// store at all; the concrete driver underneath is the integrator's
/// concern, not this crate's.
pub trait BackingMedium {
    /// Total words addressable on this medium.
    fn capacity_words(&self) -> usize;

    /// Reads `out.len()` words starting at `offset`.
    fn read_words(&self, offset: usize, out: &mut [Word]) -> Result<(), PrefsError>;

    /// Writes `words` starting at `offset`.
    ///
    /// Returns [`WriteOutcome::Suppressed`] when the write was masked by an
    /// active write-prevention window; the medium was not touched in that
    /// case. Reads are never masked.
    fn write_words(&mut self, offset: usize, words: &[Word]) -> Result<WriteOutcome, PrefsError>;

    /// Toggles the write-prevention window, where supported.
    ///
    /// Write prevention is an optional capability: mediums without it
    /// ignore the call and always allow writes.
    fn set_write_prevention(&mut self, _active: bool) {}
}

/// In-memory word store, the reference implementation of [`BackingMedium`].
///
/// On a target this role is filled by the real flash or RTC-memory driver;
/// in host tests and demos `MemMedium` plays either part, with
/// [`power_cycle`](MemMedium::power_cycle) modeling what power loss does to
/// a volatile store.
#[derive(Debug, Clone)]
pub struct MemMedium<const WORDS: usize> {
    words: [Word; WORDS],
}

impl<const WORDS: usize> MemMedium<WORDS> {
    pub const fn new() -> Self {
        Self { words: [0; WORDS] }
    }

    /// Clears all contents, modeling loss of power on a volatile store.
    pub fn power_cycle(&mut self) {
        self.words = [0; WORDS];
    }

    /// Raw view of the stored words.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Mutable raw view, for host-side tooling and fault injection.
    pub fn words_mut(&mut self) -> &mut [Word] {
        &mut self.words
    }

    fn span(&self, offset: usize, len: usize) -> Result<(usize, usize), PrefsError> {
        let end = offset.checked_add(len).ok_or(PrefsError::OutOfBounds)?;
        if end > WORDS {
            return Err(PrefsError::OutOfBounds);
        }
        Ok((offset, end))
    }
}

impl<const WORDS: usize> Default for MemMedium<WORDS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const WORDS: usize> BackingMedium for MemMedium<WORDS> {
    fn capacity_words(&self) -> usize {
        WORDS
    }

    fn read_words(&self, offset: usize, out: &mut [Word]) -> Result<(), PrefsError> {
        let (start, end) = self.span(offset, out.len())?;
        out.copy_from_slice(&self.words[start..end]);
        Ok(())
    }

    fn write_words(&mut self, offset: usize, words: &[Word]) -> Result<WriteOutcome, PrefsError> {
        let (start, end) = self.span(offset, words.len())?;
        self.words[start..end].copy_from_slice(words);
        Ok(WriteOutcome::Committed)
    }
}

/// Default reserved window for [`GuardedMedium`], in words.
///
/// Parts that colocate bootloader bookkeeping with preference data keep it
/// in the first 128 bytes of the store; overwriting them mid-update would
/// invalidate the new firmware image.
pub const DEFAULT_RESERVED_WORDS: usize = 32;

/// Decorator adding the write-prevention capability to any medium.
///
/// While prevention is active, writes whose region starts below the
/// reserved word threshold are dropped without touching the inner medium
/// and acknowledged as [`WriteOutcome::Suppressed`]. Writes at or above the
/// threshold, and all reads, pass through unaffected.
#[derive(Debug, Clone)]
pub struct GuardedMedium<M> {
    inner: M,
    reserved_words: usize,
    prevent: bool,
}

impl<M> GuardedMedium<M> {
    /// Guards the default reserved window of [`DEFAULT_RESERVED_WORDS`].
    pub const fn new(inner: M) -> Self {
        Self::with_reserved(inner, DEFAULT_RESERVED_WORDS)
    }

    /// Guards the first `reserved_words` words of `inner`.
    pub const fn with_reserved(inner: M, reserved_words: usize) -> Self {
        Self {
            inner,
            reserved_words,
            prevent: false,
        }
    }

    /// Returns true while the prevention window is active.
    pub fn is_prevented(&self) -> bool {
        self.prevent
    }

    /// Size of the guarded window in words.
    pub fn reserved_words(&self) -> usize {
        self.reserved_words
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut M {
        &mut self.inner
    }
}

impl<M: BackingMedium> BackingMedium for GuardedMedium<M> {
    fn capacity_words(&self) -> usize {
        self.inner.capacity_words()
    }

    fn read_words(&self, offset: usize, out: &mut [Word]) -> Result<(), PrefsError> {
        self.inner.read_words(offset, out)
    }

    fn write_words(&mut self, offset: usize, words: &[Word]) -> Result<WriteOutcome, PrefsError> {
        if self.prevent && offset < self.reserved_words {
            return Ok(WriteOutcome::Suppressed);
        }
        self.inner.write_words(offset, words)
    }

    fn set_write_prevention(&mut self, active: bool) {
        self.prevent = active;
    }
}

/// Medium for builds with no backing store.
///
/// Allocation against it succeeds (capacity is unbounded) so component
/// setup is identical across hardware variants, but every read and write
/// reports failure and retained values fall back to their defaults.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMedium;

impl BackingMedium for NoMedium {
    fn capacity_words(&self) -> usize {
        usize::MAX
    }

    fn read_words(&self, _offset: usize, _out: &mut [Word]) -> Result<(), PrefsError> {
        Err(PrefsError::Io)
    }

    fn write_words(&mut self, _offset: usize, _words: &[Word]) -> Result<WriteOutcome, PrefsError> {
        Err(PrefsError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_medium_round_trip() {
        let mut medium = MemMedium::<8>::new();
        medium
            .write_words(2, &[0xDEAD_BEEF, 0x1234_5678])
            .unwrap();

        let mut out = [0u32; 2];
        medium.read_words(2, &mut out).unwrap();
        assert_eq!(out, [0xDEAD_BEEF, 0x1234_5678]);
    }

    #[test]
    fn mem_medium_rejects_out_of_bounds() {
        let mut medium = MemMedium::<4>::new();
        let mut out = [0u32; 2];

        assert_eq!(medium.read_words(3, &mut out), Err(PrefsError::OutOfBounds));
        assert_eq!(
            medium.write_words(4, &[1]),
            Err(PrefsError::OutOfBounds)
        );
        assert_eq!(
            medium.write_words(usize::MAX, &[1]),
            Err(PrefsError::OutOfBounds)
        );
    }

    #[test]
    fn mem_medium_power_cycle_clears_contents() {
        let mut medium = MemMedium::<4>::new();
        medium.write_words(0, &[0xFFFF_FFFF; 4]).unwrap();

        medium.power_cycle();

        let mut out = [1u32; 4];
        medium.read_words(0, &mut out).unwrap();
        assert_eq!(out, [0; 4]);
    }

    #[test]
    fn guarded_medium_masks_writes_below_threshold() {
        let mut medium = GuardedMedium::with_reserved(MemMedium::<64>::new(), 32);

        // Prevention inactive: low writes pass through
        assert_eq!(
            medium.write_words(0, &[0xAA]).unwrap(),
            WriteOutcome::Committed
        );

        medium.set_write_prevention(true);
        assert!(medium.is_prevented());

        // Below threshold: dropped, inner medium untouched
        assert_eq!(
            medium.write_words(0, &[0xBB]).unwrap(),
            WriteOutcome::Suppressed
        );
        assert_eq!(medium.inner().words()[0], 0xAA);

        // At and above threshold: unaffected
        assert_eq!(
            medium.write_words(32, &[0xCC]).unwrap(),
            WriteOutcome::Committed
        );

        // Reads are never masked
        let mut out = [0u32; 1];
        medium.read_words(0, &mut out).unwrap();
        assert_eq!(out, [0xAA]);
    }

    #[test]
    fn guarded_medium_clears_prevention() {
        let mut medium = GuardedMedium::with_reserved(MemMedium::<64>::new(), 32);

        medium.set_write_prevention(true);
        medium.set_write_prevention(false);

        assert_eq!(
            medium.write_words(0, &[0xDD]).unwrap(),
            WriteOutcome::Committed
        );
    }

    #[test]
    fn no_medium_fails_every_access() {
        let mut medium = NoMedium;
        let mut out = [0u32; 1];

        assert_eq!(medium.read_words(0, &mut out), Err(PrefsError::Io));
        assert_eq!(medium.write_words(0, &[1]), Err(PrefsError::Io));
    }
}
