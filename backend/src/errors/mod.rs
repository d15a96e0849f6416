//! Global application error types.
//!
//! `ServiceError` is what the account service hands back to the HTTP layer;
//! `StoreError` is what the persistence layer hands back to the service.

use thiserror::Error;

/// Errors raised by an account store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),
    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors surfaced by registration, login and token verification.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid username format")]
    InvalidFormat,

    #[error("Password must be at least {min_length} characters long")]
    WeakPassword { min_length: usize },

    #[error("Password must be at most {max_bytes} bytes long")]
    PasswordTooLong { max_bytes: usize },

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Password hashing failed: {message}")]
    Hashing { message: String },

    #[error("Persistence error: {source}")]
    Persistence { source: anyhow::Error },

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Token signing failed: {message}")]
    Signing { message: String },

    #[error("Invalid or expired token")]
    InvalidToken,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
        }
    }

    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    pub fn persistence(source: impl Into<anyhow::Error>) -> Self {
        Self::Persistence {
            source: source.into(),
        }
    }

    /// True for failures the caller can do nothing about.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Hashing { .. } | Self::Persistence { .. } | Self::Signing { .. }
        )
    }
}

impl From<StoreError> for ServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            // username is the only unique column on accounts
            StoreError::UniqueViolation(_) => Self::DuplicateUsername,
            StoreError::Database(source) => Self::persistence(source),
        }
    }
}
