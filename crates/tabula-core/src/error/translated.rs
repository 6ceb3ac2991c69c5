use super::Error;

/// A domain error produced by translating a database error.
#[derive(Debug)]
pub(super) struct TranslatedError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for TranslatedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }
}

impl core::fmt::Display for TranslatedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.inner, f)
    }
}

impl Error {
    /// Wraps an application error produced from a database error, for example
    /// a validation error built from a unique constraint violation.
    pub fn translated(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Translated(TranslatedError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error is a translated domain error.
    pub fn is_translated(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Translated(_))
    }

    /// Returns the translated domain error if it has type `T`.
    pub fn downcast_ref<T: std::error::Error + 'static>(&self) -> Option<&T> {
        match self.kind() {
            super::ErrorKind::Translated(err) => err.inner.downcast_ref::<T>(),
            _ => None,
        }
    }
}
