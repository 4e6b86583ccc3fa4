use thiserror::Error;

/// Failure taxonomy for every domain operation.
///
/// All failures are terminal for the request: `NotFound` and `Validation`
/// are business-rule rejections the caller must correct, `Database` is a
/// storage fault. There is no retry/conflict category.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Referenced record does not exist (maps to 404)
    #[error("{0}")]
    NotFound(String),

    /// Request violates a domain precondition (maps to 400)
    #[error("{0}")]
    Validation(String),

    /// Underlying storage failure (maps to 500)
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
