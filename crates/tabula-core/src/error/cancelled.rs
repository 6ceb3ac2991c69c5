use super::Error;

/// Error when an in-flight database call was cancelled before it completed.
#[derive(Debug)]
pub(super) struct CancelledError {
    context: Box<str>,
}

impl std::error::Error for CancelledError {}

impl core::fmt::Display for CancelledError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "operation cancelled: {}", self.context)
    }
}

impl Error {
    /// Creates a cancellation error.
    ///
    /// Drivers return this when a deadline elapses and the running query has
    /// been cancelled on the server.
    pub fn cancelled(context: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Cancelled(CancelledError {
            context: context.into().into(),
        }))
    }

    /// Returns `true` if this error is a cancellation error.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Cancelled(_))
    }
}
