//! Route definitions for the `/likes` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::like;
use crate::state::AppState;

/// Routes mounted at `/likes`.
///
/// ```text
/// POST   /               -> create_like (runs the reciprocity resolver)
/// GET    /received       -> list_received (?status=)
/// GET    /sent           -> list_sent (?status=)
/// GET    /matches        -> list_like_matches (accepted, caller is liker)
/// POST   /{id}/respond   -> respond (accept | decline)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(like::create_like))
        .route("/received", get(like::list_received))
        .route("/sent", get(like::list_sent))
        .route("/matches", get(like::list_like_matches))
        .route("/{id}/respond", post(like::respond))
}
