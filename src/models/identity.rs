use serde::{Deserialize, Serialize};

use super::Role;

/// The authenticated principal, materialized from session state and
/// threaded explicitly into service calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: i32,
    pub full_name: String,
    pub role: String,
}

impl Identity {
    /// Role as a typed value. The stored string always comes from
    /// [`Role::as_str`], but session payloads are still external input.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}
