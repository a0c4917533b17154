//! Token validation helpers.
//!
//! Token issuance (login) belongs to the out-of-scope profile
//! subsystem; this API only validates incoming Bearer tokens. The
//! generation helper exists for tests and tooling.

pub mod jwt;
