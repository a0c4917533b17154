//! Pure reciprocity decision logic.
//!
//! The transactional resolver in `roomio-db` performs the reads and
//! writes; the decision of what a freshly submitted like means, given
//! the state of the opposite-direction row, lives here so it can be
//! unit-tested without a database.

use crate::status::{STATUS_ACCEPTED, STATUS_PENDING};
use crate::types::DbId;

/// What submitting a like resolves to, given the reverse row's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReciprocityOutcome {
    /// No usable reverse like. The new row stays pending and the liked
    /// user is told about the new interest.
    NewInterest,
    /// A pending reverse like exists. Both rows transition to accepted
    /// and the liked user is told the pairing is confirmed.
    MatchFormed,
    /// The reverse like is already accepted. Nothing re-transitions and
    /// no notification is enqueued.
    AlreadyAccepted,
}

/// Resolve a new like submission against the opposite-direction row.
///
/// `reverse_status` is the status of the (liked -> liker) row, if one
/// exists. A declined reverse like does not block a fresh expression of
/// interest; it is treated the same as no reverse row at all.
pub fn resolve_reciprocity(reverse_status: Option<&str>) -> ReciprocityOutcome {
    match reverse_status {
        Some(STATUS_PENDING) => ReciprocityOutcome::MatchFormed,
        Some(STATUS_ACCEPTED) => ReciprocityOutcome::AlreadyAccepted,
        // Declined (or any unrecognised status) is treated as absent.
        _ => ReciprocityOutcome::NewInterest,
    }
}

/// Order a user pair for lock acquisition.
///
/// Advisory locks for a pair are always taken smaller id first so two
/// concurrent submissions for the same pair cannot deadlock.
pub fn pair_lock_order(a: DbId, b: DbId) -> (DbId, DbId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
