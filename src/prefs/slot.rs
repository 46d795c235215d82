use crate::prefs::{
    error::PrefsError,
    medium::BackingMedium,
    record::{self, MAX_RECORD_WORDS, RecordBuf},
    store::PrefStore,
    types::{Region, WriteOutcome},
};

/// Handle to one allocated region, with save/load guarded by the record
/// checksum.
///
/// A checksum mismatch on load is the only staleness signal there is: a
/// record written by an older firmware image under a different type tag or
/// offset simply fails validation and reads as "no data present". There is
/// no separate version field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefSlot {
    region: Region,
}

impl PrefSlot {
    pub(crate) fn new(region: Region) -> Self {
        Self { region }
    }

    /// Sentinel slot with no region; every save and load reports
    /// [`PrefsError::Uninitialized`].
    pub const fn uninitialized() -> Self {
        Self {
            region: Region::uninitialized(),
        }
    }

    /// Returns true once a region has been allocated for this slot.
    pub fn is_initialized(&self) -> bool {
        self.region.is_initialized()
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Writes `bytes` into the region: zero-padded payload words followed
    /// by the checksum word covering offset, type tag, and payload.
    ///
    /// A write masked by an active prevention window reports
    /// [`PrefsError::WriteSuppressed`]; the record on the medium is
    /// untouched, so the caller may retry once the window closes.
    pub fn save<P, S>(&self, store: &mut PrefStore<P, S>, bytes: &[u8]) -> Result<(), PrefsError>
    where
        P: BackingMedium,
        S: BackingMedium,
    {
        if !self.is_initialized() {
            return Err(PrefsError::Uninitialized);
        }

        let mut buf = RecordBuf::new();
        record::pack_payload(bytes, self.region.words, &mut buf)?;
        let crc = record::record_checksum(self.region.offset, self.region.type_tag, &buf);
        // Capacity holds one word beyond the largest payload
        let _ = buf.push(crc);

        match store.write_region_words(&self.region, &buf)? {
            WriteOutcome::Committed => Ok(()),
            WriteOutcome::Suppressed => Err(PrefsError::WriteSuppressed),
        }
    }

    /// Reads and validates the region, copying the payload into `out`
    /// trimmed to `out.len()` bytes.
    ///
    /// `out` is zero-filled before anything else happens and stays zeroed
    /// on every failure path, so corrupted bytes never reach the caller.
    pub fn load<P, S>(&self, store: &PrefStore<P, S>, out: &mut [u8]) -> Result<(), PrefsError>
    where
        P: BackingMedium,
        S: BackingMedium,
    {
        out.fill(0);

        if !self.is_initialized() {
            return Err(PrefsError::Uninitialized);
        }
        if self.region.words > MAX_RECORD_WORDS
            || record::words_for_bytes(out.len()) > self.region.words
        {
            return Err(PrefsError::TooLarge);
        }

        let mut buf = RecordBuf::new();
        // Fits: region.words bounded above
        let _ = buf.resize(self.region.footprint(), 0);
        store.read_region_words(&self.region, &mut buf)?;

        let (payload, guard) = buf.split_at(self.region.words);
        let crc = record::record_checksum(self.region.offset, self.region.type_tag, payload);
        if crc != guard[0] {
            return Err(PrefsError::ChecksumMismatch);
        }

        record::unpack_payload(payload, out);
        Ok(())
    }
}
