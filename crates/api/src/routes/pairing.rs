//! Route definitions for the `/matches` resource (the match ledger).
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::pairing;
use crate::state::AppState;

/// Routes mounted at `/matches`.
///
/// ```text
/// GET    /      -> list_pairings
/// POST   /{id}  -> confirm_pairing (id = counterpart user, idempotent)
/// DELETE /{id}  -> remove_pairing  (id = match row)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pairing::list_pairings))
        .route(
            "/{id}",
            post(pairing::confirm_pairing).delete(pairing::remove_pairing),
        )
}
