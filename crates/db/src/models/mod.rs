//! Entity models: `FromRow` structs mirroring table rows, plus the
//! summary shapes embedded in listing responses.

pub mod like;
pub mod notification;
pub mod pairing;
pub mod user;
