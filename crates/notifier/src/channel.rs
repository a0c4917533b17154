//! The external push-channel boundary.
//!
//! The sweeper needs exactly one capability from its collaborator:
//! push a text message to an address. The concrete binding is Telegram
//! ([`crate::telegram::TelegramChannel`]); any push-capable channel
//! satisfies the contract.

use async_trait::async_trait;

/// Error type for push delivery failures.
///
/// All variants are treated as transient by the sweeper: the
/// notification stays undelivered and is retried on the next cycle.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// The underlying HTTP request failed (network, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The channel returned a non-success status code.
    #[error("Channel returned HTTP {0}")]
    HttpStatus(u16),

    /// Channel-specific failure with a human-readable message.
    #[error("Delivery failed: {0}")]
    Other(String),
}

/// A channel capable of pushing a message to a user-linked address.
#[async_trait]
pub trait PushChannel: Send + Sync {
    /// Deliver `text` to `address`. `Ok(())` means the channel reported
    /// success; only then may the caller mark the notification
    /// delivered.
    async fn push(&self, address: &str, text: &str) -> Result<(), PushError>;
}
