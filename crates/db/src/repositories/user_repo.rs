//! Repository for the `users` table.
//!
//! User creation and profile editing belong to the profile subsystem;
//! this core only reads the columns that matching and delivery need.

use roomio_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, display_name, is_active, chat_id, created_at";

/// Read operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active user by internal ID.
    ///
    /// Returns `None` for both missing and deactivated users; callers
    /// treat the two identically (NotFound).
    pub async fn find_active_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active users with a linked external messaging address.
    ///
    /// This is the delivery sweeper's fan-out set; users without a
    /// `chat_id` are unreachable and simply not returned.
    pub async fn list_deliverable(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users \
             WHERE chat_id IS NOT NULL AND is_active = true \
             ORDER BY id"
        );
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }
}
