//! Like entity model.

use roomio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `likes` table: a one-directional expression of
/// interest. Status is one of the `roomio_core::status` constants.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Like {
    pub id: DbId,
    pub liker_id: DbId,
    pub liked_id: DbId,
    pub status: String,
    pub created_at: Timestamp,
}
