//! User entity model.

use roomio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table.
///
/// Profile attributes beyond what matching and delivery read are owned
/// by the profile subsystem and deliberately absent here.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub display_name: Option<String>,
    pub is_active: bool,
    /// External messaging address; `None` until the user links a chat.
    pub chat_id: Option<String>,
    pub created_at: Timestamp,
}

impl User {
    /// Human-readable name for notification rendering.
    pub fn display(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

/// Counterpart summary embedded in pairing listings.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub username: String,
    pub display_name: Option<String>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
        }
    }
}
