use super::Error;

/// The caller cancelled a read while it was waiting on the cursor.
#[derive(Debug)]
pub(super) struct CancelledError;

impl std::error::Error for CancelledError {}

impl core::fmt::Display for CancelledError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("operation cancelled")
    }
}

impl Error {
    /// Creates a cancellation error.
    pub fn cancelled() -> Error {
        Error::from(super::ErrorKind::Cancelled(CancelledError))
    }

    /// Returns `true` if this error reports a cancelled operation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Cancelled(_))
    }
}
