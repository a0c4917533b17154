//! Handlers for the `/matches` resource (the match ledger).
//!
//! Ledger rows are created only here, by explicit confirmation; the
//! reciprocity resolver on the likes path never writes them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use roomio_core::error::CoreError;
use roomio_core::types::DbId;
use roomio_db::models::pairing::MatchWithCounterpart;
use roomio_db::repositories::{MatchRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/matches/{counterpart_id}
///
/// Confirm a pairing with another user. Idempotent: repeating the call
/// (from either side) returns the same row.
pub async fn confirm_pairing(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(counterpart_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if counterpart_id == auth.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot pair with yourself".into(),
        )));
    }

    let counterpart = UserRepo::find_by_id(&state.pool, counterpart_id).await?;
    if counterpart.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: counterpart_id,
        }));
    }

    let (pairing, _created) =
        MatchRepo::confirm_pairing(&state.pool, auth.user_id, counterpart_id).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: pairing })))
}

/// GET /api/v1/matches
///
/// The caller's confirmed pairings with counterpart summaries, newest
/// first.
pub async fn list_pairings(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<MatchWithCounterpart>>>> {
    let pairings = MatchRepo::list_pairings(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: pairings }))
}

/// DELETE /api/v1/matches/{id}
///
/// Remove a pairing. Unilateral: either participant may delete the
/// shared row. Returns 204 on success, 404 when the row is missing or
/// the caller is not a participant.
pub async fn remove_pairing(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(match_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let removed = MatchRepo::remove_pairing(&state.pool, match_id, auth.user_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Match",
            id: match_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
