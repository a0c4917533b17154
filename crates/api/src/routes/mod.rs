pub mod health;
pub mod like;
pub mod notification;
pub mod pairing;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /likes                     submit interest, listings, respond
/// /matches                   confirm / list / remove pairings
/// /notifications             outbox listing and mark-read
/// ```
///
/// The health check is mounted separately at the root level.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/likes", like::router())
        .nest("/matches", pairing::router())
        .nest("/notifications", notification::router())
}
