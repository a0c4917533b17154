//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or, where atomicity with a caller's transaction
//! matters, any `PgExecutor`) as the first argument.

pub mod like_repo;
pub mod match_repo;
pub mod notification_repo;
pub mod user_repo;

pub use like_repo::{InterestSubmission, LikeRepo};
pub use match_repo::MatchRepo;
pub use notification_repo::NotificationRepo;
pub use user_repo::UserRepo;
