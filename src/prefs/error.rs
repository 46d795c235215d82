/// Errors that can occur during preference storage operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefsError {
    /// Slot has no allocated region.
    Uninitialized,
    /// Offset or length exceeds medium capacity.
    OutOfBounds,
    /// Value does not fit the region or the record buffer.
    TooLarge,
    /// Stored record failed checksum validation.
    ChecksumMismatch,
    /// Underlying medium read or write failed.
    Io,
    /// Write masked by an active write-prevention window.
    WriteSuppressed,
}

impl core::fmt::Display for PrefsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PrefsError::Uninitialized => write!(f, "slot has no allocated region"),
            PrefsError::OutOfBounds => write!(f, "offset or length exceeds medium capacity"),
            PrefsError::TooLarge => write!(f, "value does not fit the region"),
            PrefsError::ChecksumMismatch => write!(f, "stored record failed checksum validation"),
            PrefsError::Io => write!(f, "medium read or write failed"),
            PrefsError::WriteSuppressed => write!(f, "write masked by write prevention"),
        }
    }
}
