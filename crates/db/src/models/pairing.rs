//! Match ledger entity model.

use roomio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::UserSummary;

/// A row from the `matches` table: an explicitly confirmed pairing,
/// independent of like-based reciprocity.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Match {
    pub id: DbId,
    pub user_a_id: DbId,
    pub user_b_id: DbId,
    pub created_at: Timestamp,
}

/// A ledger row joined with the counterpart's profile summary, as
/// returned by the pairing listing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MatchWithCounterpart {
    pub id: DbId,
    pub created_at: Timestamp,
    pub counterpart: UserSummary,
}
