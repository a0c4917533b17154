//! HTTP handlers, grouped by resource.

pub mod like;
pub mod notification;
pub mod pairing;
