use super::Error;

/// The caller's cancellation token fired before the operation finished.
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

    /// Returns `true` if the operation was cancelled by the caller.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::Cancelled(_))
    }
}
