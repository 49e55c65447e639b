//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] eclat_core::EmailError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email is already registered.
    #[error("email already registered")]
    DuplicateEmail,

    /// Signup without a name.
    #[error("name is required")]
    MissingName,

    /// Signup or login without a password.
    #[error("password is required")]
    MissingPassword,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Reading or writing the account store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
