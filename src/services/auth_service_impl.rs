//! `SeaORM` implementation of the `AuthService` trait.

use crate::db::Store;
use crate::models::Identity;
use crate::services::auth_service::{AuthError, AuthService};
use async_trait::async_trait;

pub struct SeaOrmAuthService {
    store: Store,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        let user = self
            .store
            .verify_credentials(username.trim(), password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(Identity {
            user_id: user.id,
            full_name: user.full_name,
            role: user.role,
        })
    }
}
