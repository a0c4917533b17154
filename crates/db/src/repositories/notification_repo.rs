//! Repository for the `notifications` table (the delivery outbox).
//!
//! Rows are append-only; `is_read` is the delivered marker and is the
//! only mutable column. It moves false -> true exactly once and never
//! reverses.

use roomio_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::notification::Notification;

/// Column list for `notifications` queries.
const COLUMNS: &str =
    "id, user_id, kind, body, related_user_id, related_like_id, is_read, created_at";

/// Outbox operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Append a notification, returning the created row.
    ///
    /// Takes any executor so the reciprocity resolver can enqueue
    /// inside its own transaction: a rollback there must also discard
    /// the notification. Fails with a foreign-key violation when the
    /// target user does not exist.
    pub async fn enqueue<'e, E>(
        executor: E,
        user_id: DbId,
        kind: &str,
        body: &str,
        related_user_id: Option<DbId>,
        related_like_id: Option<DbId>,
    ) -> Result<Notification, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO notifications (user_id, kind, body, related_user_id, related_like_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(kind)
            .bind(body)
            .bind(related_user_id)
            .bind(related_like_id)
            .fetch_one(executor)
            .await
    }

    /// Find a notification by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all notifications for a user, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List undelivered notifications for a user, newest first.
    ///
    /// This is the sweeper's per-user work queue.
    pub async fn list_undelivered(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE user_id = $1 AND is_read = false \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Number of unread notifications for a user.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Set the delivered marker on a notification.
    ///
    /// Idempotent: marking an already-read row succeeds and changes
    /// nothing. Ownership checks happen in the caller; the sweeper
    /// calls this directly after a successful push.
    pub async fn mark_read(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE notifications SET is_read = true WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Mark all unread notifications for a user as read.
    ///
    /// Returns the number of rows that were actually flipped.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = true WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
