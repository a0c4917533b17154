//! Repository for the `likes` table, including the reciprocity
//! resolver.
//!
//! `submit_interest` is the only place where a second like can flip a
//! first like's status without an explicit response. Everything it
//! does (the reverse-row lookup, both status writes, and the
//! notification enqueue) happens inside one transaction, serialized
//! per user pair with Postgres advisory locks so two users liking each
//! other in the same instant cannot both conclude "no reciprocal row
//! exists".

use roomio_core::kinds::{KIND_NEW_INTEREST, KIND_PAIRING_CONFIRMED};
use roomio_core::matching::{pair_lock_order, resolve_reciprocity, ReciprocityOutcome};
use roomio_core::status::{STATUS_ACCEPTED, STATUS_DECLINED, STATUS_PENDING};
use roomio_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::like::Like;
use crate::repositories::NotificationRepo;

/// Column list for `likes` queries.
const COLUMNS: &str = "id, liker_id, liked_id, status, created_at";

/// Result of submitting an expression of interest.
#[derive(Debug)]
pub struct InterestSubmission {
    /// The like row: freshly inserted, or the pre-existing row when the
    /// submission was a repeat.
    pub like: Like,
    /// `false` when an identical like already existed (no side effects
    /// were performed).
    pub created: bool,
    /// How the resolver classified a newly created like. `None` for
    /// repeat submissions.
    pub outcome: Option<ReciprocityOutcome>,
}

/// Like store and reciprocity resolver.
pub struct LikeRepo;

impl LikeRepo {
    /// Submit an expression of interest from `liker_id` toward
    /// `liked_id`.
    ///
    /// Idempotent per ordered pair: a repeat submission returns the
    /// existing row unchanged. Otherwise a pending row is inserted and
    /// resolved against the opposite direction:
    ///
    /// - reverse pending: both rows become `accepted` and one
    ///   `pairing_confirmed` notification is enqueued for the liked
    ///   user (the submitter triggered the match and is not notified);
    /// - reverse already accepted: no re-transition, no notification;
    /// - no reverse, or reverse declined: one `new_interest`
    ///   notification is enqueued for the liked user.
    ///
    /// Caller validation (self-likes, missing or inactive liked user)
    /// happens in the handler layer before this is reached.
    pub async fn submit_interest(
        pool: &PgPool,
        liker_id: DbId,
        liked_id: DbId,
    ) -> Result<InterestSubmission, sqlx::Error> {
        let mut tx = pool.begin().await?;

        lock_pair(&mut tx, liker_id, liked_id).await?;

        // Repeat submission: echo the existing row, no side effects.
        let query = format!("SELECT {COLUMNS} FROM likes WHERE liker_id = $1 AND liked_id = $2");
        let existing = sqlx::query_as::<_, Like>(&query)
            .bind(liker_id)
            .bind(liked_id)
            .fetch_optional(&mut *tx)
            .await?;
        if let Some(like) = existing {
            tx.commit().await?;
            return Ok(InterestSubmission {
                like,
                created: false,
                outcome: None,
            });
        }

        // A declined reverse like does not block fresh interest.
        let reverse_status: Option<String> = sqlx::query_scalar(
            "SELECT status FROM likes \
             WHERE liker_id = $1 AND liked_id = $2 AND status != $3",
        )
        .bind(liked_id)
        .bind(liker_id)
        .bind(STATUS_DECLINED)
        .fetch_optional(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO likes (liker_id, liked_id, status) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let mut like = sqlx::query_as::<_, Like>(&query)
            .bind(liker_id)
            .bind(liked_id)
            .bind(STATUS_PENDING)
            .fetch_one(&mut *tx)
            .await?;

        let outcome = resolve_reciprocity(reverse_status.as_deref());
        match outcome {
            ReciprocityOutcome::MatchFormed => {
                sqlx::query(
                    "UPDATE likes SET status = $1 \
                     WHERE (liker_id = $2 AND liked_id = $3) \
                        OR (liker_id = $3 AND liked_id = $2)",
                )
                .bind(STATUS_ACCEPTED)
                .bind(liker_id)
                .bind(liked_id)
                .execute(&mut *tx)
                .await?;
                like.status = STATUS_ACCEPTED.to_string();

                let liker_name = display_name(&mut tx, liker_id).await?;
                NotificationRepo::enqueue(
                    &mut *tx,
                    liked_id,
                    KIND_PAIRING_CONFIRMED,
                    &format!("You and {liker_name} matched! You can now start chatting."),
                    Some(liker_id),
                    Some(like.id),
                )
                .await?;

                tracing::info!(liker_id, liked_id, like_id = like.id, "Reciprocal match formed");
            }
            ReciprocityOutcome::AlreadyAccepted => {
                // The reverse side already accepted; nothing to
                // re-transition and nothing new to announce.
            }
            ReciprocityOutcome::NewInterest => {
                let liker_name = display_name(&mut tx, liker_id).await?;
                NotificationRepo::enqueue(
                    &mut *tx,
                    liked_id,
                    KIND_NEW_INTEREST,
                    &format!("{liker_name} expressed interest in you!"),
                    Some(liker_id),
                    Some(like.id),
                )
                .await?;
            }
        }

        tx.commit().await?;
        Ok(InterestSubmission {
            like,
            created: true,
            outcome: Some(outcome),
        })
    }

    /// Respond to a received like.
    ///
    /// Returns `None` when the like does not exist or the responder is
    /// not its `liked_id` -- ownership is not disclosed to outsiders.
    /// Only a pending like transitions; responding to an already
    /// accepted or declined row returns it unchanged.
    ///
    /// Accepting mirrors the acceptance onto the opposite direction
    /// (updating the responder's own like toward the liker, or
    /// creating it already accepted), so both sides of the pair end up
    /// with an accepted sent like, and enqueues a `pairing_confirmed`
    /// notification for the liker -- all in the same transaction.
    pub async fn respond(
        pool: &PgPool,
        like_id: DbId,
        responding_user_id: DbId,
        accept: bool,
    ) -> Result<Option<Like>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Peek at the pair first: the advisory locks must be taken
        // before any row is touched, in the same order the submit path
        // takes them.
        let pair: Option<(DbId, DbId)> =
            sqlx::query_as("SELECT liker_id, liked_id FROM likes WHERE id = $1")
                .bind(like_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((liker_id, liked_id)) = pair else {
            return Ok(None);
        };
        if liked_id != responding_user_id {
            return Ok(None);
        }

        lock_pair(&mut tx, liker_id, liked_id).await?;

        // Re-read under the pair lock; the status can have changed
        // between the peek and the lock.
        let query = format!("SELECT {COLUMNS} FROM likes WHERE id = $1");
        let Some(mut like) = sqlx::query_as::<_, Like>(&query)
            .bind(like_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if like.status == STATUS_PENDING {
            let new_status = if accept { STATUS_ACCEPTED } else { STATUS_DECLINED };
            sqlx::query("UPDATE likes SET status = $1 WHERE id = $2")
                .bind(new_status)
                .bind(like_id)
                .execute(&mut *tx)
                .await?;
            like.status = new_status.to_string();

            if accept {
                mirror_acceptance(&mut tx, responding_user_id, liker_id).await?;

                let responder_name = display_name(&mut tx, responding_user_id).await?;
                NotificationRepo::enqueue(
                    &mut *tx,
                    like.liker_id,
                    KIND_PAIRING_CONFIRMED,
                    &format!("You and {responder_name} matched! You can now start chatting."),
                    Some(responding_user_id),
                    Some(like.id),
                )
                .await?;
            }
        }

        tx.commit().await?;
        Ok(Some(like))
    }

    /// Likes received by a user, newest first, optionally filtered by
    /// status.
    pub async fn list_received(
        pool: &PgPool,
        user_id: DbId,
        status: Option<&str>,
    ) -> Result<Vec<Like>, sqlx::Error> {
        Self::list_by_side(pool, "liked_id", user_id, status).await
    }

    /// Likes sent by a user, newest first, optionally filtered by
    /// status.
    pub async fn list_sent(
        pool: &PgPool,
        user_id: DbId,
        status: Option<&str>,
    ) -> Result<Vec<Like>, sqlx::Error> {
        Self::list_by_side(pool, "liker_id", user_id, status).await
    }

    /// The like-based "matches" view: accepted likes where the user is
    /// the liker. Distinct from the match ledger.
    pub async fn list_accepted_sent(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Like>, sqlx::Error> {
        Self::list_by_side(pool, "liker_id", user_id, Some(STATUS_ACCEPTED)).await
    }

    async fn list_by_side(
        pool: &PgPool,
        side_column: &str,
        user_id: DbId,
        status: Option<&str>,
    ) -> Result<Vec<Like>, sqlx::Error> {
        match status {
            Some(status) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM likes \
                     WHERE {side_column} = $1 AND status = $2 \
                     ORDER BY created_at DESC, id DESC"
                );
                sqlx::query_as::<_, Like>(&query)
                    .bind(user_id)
                    .bind(status)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM likes \
                     WHERE {side_column} = $1 \
                     ORDER BY created_at DESC, id DESC"
                );
                sqlx::query_as::<_, Like>(&query)
                    .bind(user_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }
}

/// Mirror an acceptance onto the `responder -> liker` direction.
///
/// Mutual acceptance is what "paired" means in the like-based view, so
/// the responder's side must carry an accepted like too. An existing
/// row is set to accepted whatever its previous status (a stale
/// decline is superseded by the fresh mutual acceptance); a missing
/// one is created already accepted.
async fn mirror_acceptance(
    tx: &mut Transaction<'_, Postgres>,
    responder_id: DbId,
    liker_id: DbId,
) -> Result<(), sqlx::Error> {
    let updated = sqlx::query(
        "UPDATE likes SET status = $1 WHERE liker_id = $2 AND liked_id = $3",
    )
    .bind(STATUS_ACCEPTED)
    .bind(responder_id)
    .bind(liker_id)
    .execute(&mut **tx)
    .await?;

    if updated.rows_affected() == 0 {
        sqlx::query("INSERT INTO likes (liker_id, liked_id, status) VALUES ($1, $2, $3)")
            .bind(responder_id)
            .bind(liker_id)
            .bind(STATUS_ACCEPTED)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

/// Acquire the pair's advisory locks, smaller user id first.
///
/// Transaction-scoped (`pg_advisory_xact_lock`): released automatically
/// at commit or rollback. The fixed acquisition order prevents two
/// concurrent submissions for the same pair from deadlocking.
pub(crate) async fn lock_pair(
    tx: &mut Transaction<'_, Postgres>,
    a: DbId,
    b: DbId,
) -> Result<(), sqlx::Error> {
    let (first, second) = pair_lock_order(a, b);
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(first)
        .execute(&mut **tx)
        .await?;
    if second != first {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(second)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

/// Resolve a user's display name inside an open transaction.
async fn display_name(
    tx: &mut Transaction<'_, Postgres>,
    user_id: DbId,
) -> Result<String, sqlx::Error> {
    sqlx::query_scalar("SELECT COALESCE(display_name, username) FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await
}
