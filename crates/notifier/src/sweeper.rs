//! The delivery sweeper.
//!
//! A background task that periodically drains undelivered notifications
//! to each user's linked chat. Delivery is at-least-once: a row is
//! marked read only after the channel reports success, and every kind
//! of failure (channel error, timeout, storage hiccup) leaves the row
//! for the next cycle. One failing notification or user never aborts
//! the rest of the cycle.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use roomio_db::models::user::User;
use roomio_db::repositories::{NotificationRepo, UserRepo};
use roomio_db::DbPool;
use tokio_util::sync::CancellationToken;

use crate::channel::PushChannel;
use crate::render::render_message;

/// How often the sweeper wakes by default.
const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(30);

/// Default bound on a single push attempt.
const DEFAULT_PUSH_TIMEOUT: Duration = Duration::from_secs(15);

/// Default number of users swept concurrently within one cycle.
const DEFAULT_CONCURRENCY: usize = 8;

/// Sweeper tuning knobs.
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// Inter-cycle delay.
    pub interval: Duration,
    /// Upper bound on a single delivery attempt; a timeout counts as a
    /// retryable failure.
    pub push_timeout: Duration,
    /// How many users are processed concurrently per cycle, so one
    /// slow chat cannot starve the others.
    pub concurrency: usize,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_SWEEP_INTERVAL,
            push_timeout: DEFAULT_PUSH_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl SweeperConfig {
    /// Load configuration from environment variables, falling back to
    /// the defaults for anything unset.
    ///
    /// | Env Var              | Default |
    /// |----------------------|---------|
    /// | `SWEEP_INTERVAL_SECS`| `30`    |
    /// | `PUSH_TIMEOUT_SECS`  | `15`    |
    /// | `SWEEP_CONCURRENCY`  | `8`     |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            interval: env_secs("SWEEP_INTERVAL_SECS").unwrap_or(defaults.interval),
            push_timeout: env_secs("PUSH_TIMEOUT_SECS").unwrap_or(defaults.push_timeout),
            concurrency: std::env::var("SWEEP_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.concurrency),
        }
    }
}

fn env_secs(name: &str) -> Option<Duration> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
}

/// Background service draining the notification outbox.
pub struct DeliverySweeper {
    pool: DbPool,
    channel: Arc<dyn PushChannel>,
    config: SweeperConfig,
}

impl DeliverySweeper {
    /// Create a new sweeper over the given pool and push channel.
    pub fn new(pool: DbPool, channel: Arc<dyn PushChannel>, config: SweeperConfig) -> Self {
        Self {
            pool,
            channel,
            config,
        }
    }

    /// Run the sweep loop until the [`CancellationToken`] fires.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.config.interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Delivery sweeper cancelled");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.sweep_cycle().await {
                        tracing::error!(error = %e, "Sweep cycle failed");
                    }
                }
            }
        }
    }

    /// One full cycle: fan out over every user with a linked chat.
    ///
    /// Users without a linked address are not in the fan-out set at
    /// all; per-user failures are logged and do not fail the cycle.
    pub async fn sweep_cycle(&self) -> Result<(), sqlx::Error> {
        let users = UserRepo::list_deliverable(&self.pool).await?;
        if users.is_empty() {
            return Ok(());
        }

        futures::stream::iter(users)
            .for_each_concurrent(self.config.concurrency, |user| async move {
                if let Err(e) = self.sweep_user(&user).await {
                    tracing::error!(user_id = user.id, error = %e, "Failed to sweep user");
                }
            })
            .await;

        Ok(())
    }

    /// Drain one user's undelivered notifications.
    ///
    /// Each notification is attempted independently; a failure leaves
    /// that row unread and moves on to the next one.
    async fn sweep_user(&self, user: &User) -> Result<(), sqlx::Error> {
        // list_deliverable only returns linked users, but the link can
        // be severed between the listing and this point.
        let Some(address) = user.chat_id.as_deref() else {
            return Ok(());
        };

        let pending = NotificationRepo::list_undelivered(&self.pool, user.id).await?;
        if pending.is_empty() {
            return Ok(());
        }

        let mut delivered = 0usize;
        for notification in &pending {
            let related_name = match notification.related_user_id {
                Some(related_id) => UserRepo::find_by_id(&self.pool, related_id)
                    .await?
                    .map(|u| u.display().to_string()),
                None => None,
            };
            let text = render_message(notification, related_name.as_deref());

            let attempt =
                tokio::time::timeout(self.config.push_timeout, self.channel.push(address, &text))
                    .await;
            match attempt {
                Ok(Ok(())) => {
                    NotificationRepo::mark_read(&self.pool, notification.id).await?;
                    delivered += 1;
                }
                Ok(Err(e)) => {
                    tracing::warn!(
                        notification_id = notification.id,
                        user_id = user.id,
                        error = %e,
                        "Push failed, leaving notification for next cycle"
                    );
                }
                Err(_) => {
                    tracing::warn!(
                        notification_id = notification.id,
                        user_id = user.id,
                        timeout_secs = self.config.push_timeout.as_secs(),
                        "Push attempt timed out, leaving notification for next cycle"
                    );
                }
            }
        }

        if delivered > 0 {
            tracing::info!(user_id = user.id, delivered, "Delivered notifications");
        }
        Ok(())
    }
}
