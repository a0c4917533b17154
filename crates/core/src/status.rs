//! Well-known like-status constants.
//!
//! These must match the values stored in the `likes.status` column and
//! accepted by the `?status=` query filter on the like listing
//! endpoints.

/// Interest expressed, not yet answered or reciprocated.
pub const STATUS_PENDING: &str = "pending";

/// Interest accepted, either explicitly or by a reciprocal like.
pub const STATUS_ACCEPTED: &str = "accepted";

/// Interest declined. Terminal on the respond path; the only way out
/// is a later mutual acceptance of the pair, which supersedes it.
pub const STATUS_DECLINED: &str = "declined";

/// Whether `value` is one of the recognised like statuses.
pub fn is_valid_status(value: &str) -> bool {
    matches!(value, STATUS_PENDING | STATUS_ACCEPTED | STATUS_DECLINED)
}
