//! Notification entity model.

use roomio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table: a durable, queued user-facing
/// event awaiting delivery. `is_read` is the delivered marker and only
/// ever moves false -> true.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    /// One of the `roomio_core::kinds` constants.
    pub kind: String,
    pub body: String,
    pub related_user_id: Option<DbId>,
    pub related_like_id: Option<DbId>,
    pub is_read: bool,
    pub created_at: Timestamp,
}
