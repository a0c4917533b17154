//! Channel message rendering.
//!
//! Each notification kind has its own Markdown template; anything else
//! (including `custom`) falls back to the stored body text. The
//! related user's display summary is resolved by the sweeper and
//! passed in, so rendering itself stays pure.

use roomio_core::kinds::{KIND_NEW_INTEREST, KIND_PAIRING_CONFIRMED};
use roomio_db::models::notification::Notification;

/// Placeholder used when the related user is unknown or gone.
const UNKNOWN_USER: &str = "Someone";

/// Render a notification into the message pushed through the channel.
pub fn render_message(notification: &Notification, related_name: Option<&str>) -> String {
    let name = related_name.unwrap_or(UNKNOWN_USER);
    match notification.kind.as_str() {
        KIND_NEW_INTEREST => format!(
            "*You have a new like!*\n\n\
             {name} expressed interest in you.\n\n\
             Check your matches to learn more."
        ),
        KIND_PAIRING_CONFIRMED => format!(
            "*You have a new match!*\n\n\
             You and {name} are interested in each other.\n\
             You can now start chatting and discuss sharing a place."
        ),
        _ => notification.body.clone(),
    }
}
