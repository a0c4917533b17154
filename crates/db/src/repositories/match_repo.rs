//! Repository for the `matches` table (the match ledger).
//!
//! Ledger rows are created only by an explicit confirm-pairing action,
//! never by the reciprocity resolver. Uniqueness per unordered pair is
//! enforced by checking both orderings under the same pair advisory
//! lock the resolver uses.

use roomio_core::types::DbId;
use sqlx::PgPool;

use crate::models::pairing::{Match, MatchWithCounterpart};
use crate::models::user::{User, UserSummary};
use crate::repositories::like_repo::lock_pair;

/// Column list for `matches` queries.
const COLUMNS: &str = "id, user_a_id, user_b_id, created_at";

/// Match ledger operations.
pub struct MatchRepo;

impl MatchRepo {
    /// Confirm a pairing between two users.
    ///
    /// Idempotent on the unordered pair: if a row exists in either
    /// orientation it is returned unchanged with `created = false`.
    pub async fn confirm_pairing(
        pool: &PgPool,
        requester_id: DbId,
        counterpart_id: DbId,
    ) -> Result<(Match, bool), sqlx::Error> {
        let mut tx = pool.begin().await?;

        lock_pair(&mut tx, requester_id, counterpart_id).await?;

        let query = format!(
            "SELECT {COLUMNS} FROM matches \
             WHERE (user_a_id = $1 AND user_b_id = $2) \
                OR (user_a_id = $2 AND user_b_id = $1)"
        );
        let existing = sqlx::query_as::<_, Match>(&query)
            .bind(requester_id)
            .bind(counterpart_id)
            .fetch_optional(&mut *tx)
            .await?;
        if let Some(m) = existing {
            tx.commit().await?;
            return Ok((m, false));
        }

        let query = format!(
            "INSERT INTO matches (user_a_id, user_b_id) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Match>(&query)
            .bind(requester_id)
            .bind(counterpart_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(
            match_id = created.id,
            requester_id,
            counterpart_id,
            "Pairing confirmed"
        );
        Ok((created, true))
    }

    /// List a user's confirmed pairings with the counterpart's profile
    /// summary, newest first.
    pub async fn list_pairings(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<MatchWithCounterpart>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM matches \
             WHERE user_a_id = $1 OR user_b_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        let matches = sqlx::query_as::<_, Match>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        let mut result = Vec::with_capacity(matches.len());
        for m in matches {
            let counterpart_id = if m.user_a_id == user_id {
                m.user_b_id
            } else {
                m.user_a_id
            };
            let counterpart = sqlx::query_as::<_, User>(
                "SELECT id, username, display_name, is_active, chat_id, created_at \
                 FROM users WHERE id = $1",
            )
            .bind(counterpart_id)
            .fetch_optional(pool)
            .await?;

            // A counterpart removed by the profile subsystem leaves a
            // dangling row; skip it rather than fail the listing.
            if let Some(user) = counterpart {
                result.push(MatchWithCounterpart {
                    id: m.id,
                    created_at: m.created_at,
                    counterpart: UserSummary::from(user),
                });
            }
        }
        Ok(result)
    }

    /// Remove a pairing. Either participant may delete the shared row.
    ///
    /// Returns `false` when the row does not exist or the requester is
    /// not one of the two participants.
    pub async fn remove_pairing(
        pool: &PgPool,
        match_id: DbId,
        requester_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM matches \
             WHERE id = $1 AND (user_a_id = $2 OR user_b_id = $2)",
        )
        .bind(match_id)
        .bind(requester_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
