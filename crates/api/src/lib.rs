//! HTTP surface for Roomio: configuration, state, auth, routes, and
//! handlers. The binary in `main.rs` wires this together with the
//! database pool and the delivery sweeper.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
