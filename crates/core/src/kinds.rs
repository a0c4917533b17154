//! Well-known notification kind constants.
//!
//! These must match the values stored in the `notifications.kind`
//! column and recognised by the delivery sweeper's message renderer.

/// Someone expressed interest in the target user.
pub const KIND_NEW_INTEREST: &str = "new_interest";

/// Both directions of interest now exist; the pairing is confirmed.
pub const KIND_PAIRING_CONFIRMED: &str = "pairing_confirmed";

/// Free-form notification; the body is delivered as-is.
pub const KIND_CUSTOM: &str = "custom";
