//! Integration tests for the delivery sweeper.
//!
//! A scripted in-memory channel stands in for Telegram so the tests
//! can dictate exactly which push attempts succeed.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use roomio_core::kinds::KIND_CUSTOM;
use roomio_db::repositories::NotificationRepo;
use roomio_notifier::{DeliverySweeper, PushChannel, PushError, SweeperConfig};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Mock channels
// ---------------------------------------------------------------------------

/// Pushes succeed or fail according to a pre-programmed script, in
/// attempt order; once the script is exhausted every push succeeds.
#[derive(Default)]
struct ScriptedChannel {
    script: Mutex<VecDeque<bool>>,
    sent: Mutex<Vec<(String, String)>>,
}

impl ScriptedChannel {
    fn with_script(script: &[bool]) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.iter().copied().collect()),
            sent: Mutex::new(Vec::new()),
        })
    }

    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushChannel for ScriptedChannel {
    async fn push(&self, address: &str, text: &str) -> Result<(), PushError> {
        let ok = self.script.lock().unwrap().pop_front().unwrap_or(true);
        if !ok {
            return Err(PushError::Other("scripted failure".into()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((address.to_string(), text.to_string()));
        Ok(())
    }
}

/// Never answers within any reasonable timeout.
struct HungChannel;

#[async_trait]
impl PushChannel for HungChannel {
    async fn push(&self, _address: &str, _text: &str) -> Result<(), PushError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, username: &str, chat_id: Option<&str>) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (username, display_name, chat_id) \
         VALUES ($1, $1, $2) RETURNING id",
    )
    .bind(username)
    .bind(chat_id)
    .fetch_one(pool)
    .await
    .expect("failed to insert user")
}

async fn enqueue(pool: &PgPool, user_id: i64, body: &str) -> i64 {
    NotificationRepo::enqueue(pool, user_id, KIND_CUSTOM, body, None, None)
        .await
        .unwrap()
        .id
}

async fn is_read(pool: &PgPool, id: i64) -> bool {
    NotificationRepo::find_by_id(pool, id).await.unwrap().unwrap().is_read
}

fn sweeper(pool: &PgPool, channel: Arc<dyn PushChannel>) -> DeliverySweeper {
    let config = SweeperConfig {
        interval: Duration::from_secs(3600),
        push_timeout: Duration::from_millis(200),
        concurrency: 4,
    };
    DeliverySweeper::new(pool.clone(), channel, config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn successful_cycle_marks_everything_read_once(pool: PgPool) {
    let user = create_user(&pool, "alice", Some("chat-1")).await;
    let first = enqueue(&pool, user, "one").await;
    let second = enqueue(&pool, user, "two").await;

    let channel = ScriptedChannel::with_script(&[]);
    let sweeper = sweeper(&pool, channel.clone());

    sweeper.sweep_cycle().await.unwrap();
    assert!(is_read(&pool, first).await);
    assert!(is_read(&pool, second).await);
    assert_eq!(channel.sent().len(), 2);
    assert!(channel.sent().iter().all(|(addr, _)| addr == "chat-1"));

    // A second cycle finds nothing undelivered and pushes nothing.
    sweeper.sweep_cycle().await.unwrap();
    assert_eq!(channel.sent().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_attempt_leaves_the_row_for_the_next_cycle(pool: PgPool) {
    let user = create_user(&pool, "alice", Some("chat-1")).await;
    enqueue(&pool, user, "older").await;
    enqueue(&pool, user, "newer").await;

    // Undelivered notifications are attempted newest first: the first
    // attempt (newer) fails, the second (older) succeeds.
    let channel = ScriptedChannel::with_script(&[false, true]);
    let sweeper = sweeper(&pool, channel.clone());
    sweeper.sweep_cycle().await.unwrap();

    let undelivered = NotificationRepo::list_undelivered(&pool, user).await.unwrap();
    assert_eq!(undelivered.len(), 1);
    assert_eq!(undelivered[0].body, "newer");
    assert_eq!(channel.sent().len(), 1);
    assert_eq!(channel.sent()[0].1, "older");

    // The next cycle retries the failed one.
    sweeper.sweep_cycle().await.unwrap();
    assert!(NotificationRepo::list_undelivered(&pool, user).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn users_without_a_linked_chat_are_skipped(pool: PgPool) {
    let unlinked = create_user(&pool, "alice", None).await;
    let linked = create_user(&pool, "bob", Some("chat-2")).await;
    let stuck = enqueue(&pool, unlinked, "undeliverable").await;
    let deliverable = enqueue(&pool, linked, "hello bob").await;

    let channel = ScriptedChannel::with_script(&[]);
    sweeper(&pool, channel.clone()).sweep_cycle().await.unwrap();

    assert!(!is_read(&pool, stuck).await);
    assert!(is_read(&pool, deliverable).await);
    assert_eq!(channel.sent().len(), 1);
    assert_eq!(channel.sent()[0].0, "chat-2");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn one_users_failures_do_not_block_another(pool: PgPool) {
    let first_user = create_user(&pool, "alice", Some("chat-1")).await;
    let second_user = create_user(&pool, "bob", Some("chat-2")).await;
    let failing = enqueue(&pool, first_user, "will fail").await;
    let passing = enqueue(&pool, second_user, "will pass").await;

    // Users are swept in id order; the single scripted failure lands
    // on the first user's only notification.
    let channel = ScriptedChannel::with_script(&[false]);
    let config = SweeperConfig {
        interval: Duration::from_secs(3600),
        push_timeout: Duration::from_millis(200),
        concurrency: 1,
    };
    DeliverySweeper::new(pool.clone(), channel.clone(), config)
        .sweep_cycle()
        .await
        .unwrap();

    assert!(!is_read(&pool, failing).await);
    assert!(is_read(&pool, passing).await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn hung_channel_times_out_and_defers_delivery(pool: PgPool) {
    let user = create_user(&pool, "alice", Some("chat-1")).await;
    let id = enqueue(&pool, user, "slow").await;

    sweeper(&pool, Arc::new(HungChannel)).sweep_cycle().await.unwrap();

    // The attempt timed out; the row stays queued for the next cycle.
    assert!(!is_read(&pool, id).await);
}
