//! Notification delivery: the external push-channel boundary, the
//! Telegram binding, message rendering, and the periodic delivery
//! sweeper.
//!
//! The sweeper provides at-least-once delivery: a notification's
//! `is_read` flag is only set after the channel reports success, and
//! anything that fails (including a timeout) is simply retried on the
//! next cycle.

pub mod channel;
pub mod render;
pub mod sweeper;
pub mod telegram;

pub use channel::{PushChannel, PushError};
pub use sweeper::{DeliverySweeper, SweeperConfig};
pub use telegram::{TelegramChannel, TelegramConfig};
