//! Authentication errors.

use thiserror::Error;

use kickflip_core::EmailError;

use crate::db::RepositoryError;

/// Errors from the authentication service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email/password pair did not match a user.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The email is already registered.
    #[error("user already exists")]
    UserAlreadyExists,

    /// The password does not meet requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// The email address is malformed.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password hashing or verification failed unexpectedly.
    #[error("password hash error: {0}")]
    Hash(String),

    /// Database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
