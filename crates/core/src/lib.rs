//! Shared domain types and pure matching logic for Roomio.
//!
//! This crate has no I/O: it holds the error taxonomy, ID/timestamp
//! aliases, the well-known status and kind constants stored in the
//! database, and the reciprocity decision function used by the
//! transactional resolver in `roomio-db`.

pub mod error;
pub mod kinds;
pub mod matching;
pub mod status;
pub mod types;
