use crate::types::DbId;

/// Boxed error raised by a storage backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An identifier or argument is outside its allowed range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A required payload was absent.
    #[error("Argument '{0}' is null")]
    NullArgument(&'static str),

    /// A payload failed its constraint checks.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The operation is inconsistent with related entities (e.g. a missing parent project).
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[source] BoxError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Wrap any backend error as [`CoreError::Storage`].
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CoreError::Storage(Box::new(err))
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::Validation(errors.to_string())
    }
}
