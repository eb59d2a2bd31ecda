//! Domain service for authentication.
//!
//! Verifies credentials and produces the session [`Identity`]. Session
//! persistence itself is the web layer's job.

use thiserror::Error;

use crate::models::Identity;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Covers both "no such user" and "wrong password"; callers must not
    /// be able to tell which happened.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and returns the authenticated identity.
    ///
    /// The username is trimmed before lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, AuthError>;
}
