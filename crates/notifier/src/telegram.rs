//! Telegram push-channel binding.
//!
//! Sends notification messages through the Bot API `sendMessage`
//! method. Configuration is loaded from environment variables; if
//! `TELEGRAM_BOT_TOKEN` is not set, [`TelegramConfig::from_env`]
//! returns `None` and no channel should be constructed.

use std::time::Duration;

use async_trait::async_trait;

use crate::channel::{PushChannel, PushError};

/// HTTP request timeout for a single send attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default Bot API base URL.
const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Configuration for the Telegram channel.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token.
    pub bot_token: String,
    /// API base URL, overridable for tests and proxies.
    pub api_base: String,
}

impl TelegramConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `TELEGRAM_BOT_TOKEN` is not set, signalling
    /// that push delivery is not configured and the sweeper should not
    /// be started.
    ///
    /// | Variable             | Required | Default                    |
    /// |----------------------|----------|----------------------------|
    /// | `TELEGRAM_BOT_TOKEN` | yes      | --                         |
    /// | `TELEGRAM_API_BASE`  | no       | `https://api.telegram.org` |
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN").ok()?;
        Some(Self {
            bot_token,
            api_base: std::env::var("TELEGRAM_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
        })
    }
}

/// Pushes messages to Telegram chats via the Bot API.
pub struct TelegramChannel {
    client: reqwest::Client,
    config: TelegramConfig,
}

impl TelegramChannel {
    /// Create a new channel with a pre-configured HTTP client.
    pub fn new(config: TelegramConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }
}

#[async_trait]
impl PushChannel for TelegramChannel {
    async fn push(&self, address: &str, text: &str) -> Result<(), PushError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.config.api_base, self.config.bot_token
        );
        let payload = serde_json::json!({
            "chat_id": address,
            "text": text,
            "parse_mode": "Markdown",
        });

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PushError::HttpStatus(status.as_u16()));
        }
        Ok(())
    }
}
