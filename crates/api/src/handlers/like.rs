//! Handlers for the `/likes` resource.
//!
//! All endpoints require authentication via [`AuthUser`]. Submitting a
//! like runs the reciprocity resolver: a mutual pending pair becomes a
//! match and the counterpart is notified, atomically.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use roomio_core::error::CoreError;
use roomio_core::status::is_valid_status;
use roomio_core::types::DbId;
use roomio_db::models::like::Like;
use roomio_db::repositories::{LikeRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /likes`.
#[derive(Debug, Deserialize)]
pub struct CreateLike {
    pub liked_id: DbId,
}

/// Query parameters for the like listing endpoints.
#[derive(Debug, Deserialize)]
pub struct LikeQuery {
    /// Optional status filter (`pending`, `accepted`, `declined`).
    pub status: Option<String>,
}

/// Request body for `POST /likes/{id}/respond`.
#[derive(Debug, Deserialize)]
pub struct LikeAction {
    /// `"accept"` or `"decline"`.
    pub action: String,
}

/// POST /api/v1/likes
///
/// Express interest in another user. Echoes the existing row (200-style
/// semantics inside a 201) when the like was already present. May form
/// a match if the other user already liked the caller.
pub async fn create_like(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateLike>,
) -> AppResult<impl IntoResponse> {
    if input.liked_id == auth.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot like yourself".into(),
        )));
    }

    let liked = UserRepo::find_active_by_id(&state.pool, input.liked_id).await?;
    if liked.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.liked_id,
        }));
    }

    let submission = LikeRepo::submit_interest(&state.pool, auth.user_id, input.liked_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: submission.like,
        }),
    ))
}

/// GET /api/v1/likes/received?status=
pub async fn list_received(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LikeQuery>,
) -> AppResult<Json<DataResponse<Vec<Like>>>> {
    let status = validate_status_filter(params.status.as_deref())?;
    let likes = LikeRepo::list_received(&state.pool, auth.user_id, status).await?;
    Ok(Json(DataResponse { data: likes }))
}

/// GET /api/v1/likes/sent?status=
pub async fn list_sent(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LikeQuery>,
) -> AppResult<Json<DataResponse<Vec<Like>>>> {
    let status = validate_status_filter(params.status.as_deref())?;
    let likes = LikeRepo::list_sent(&state.pool, auth.user_id, status).await?;
    Ok(Json(DataResponse { data: likes }))
}

/// GET /api/v1/likes/matches
///
/// Accepted likes where the caller is the liker. This is the
/// like-based reciprocity view, distinct from the match ledger at
/// `/matches`.
pub async fn list_like_matches(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Like>>>> {
    let likes = LikeRepo::list_accepted_sent(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: likes }))
}

/// POST /api/v1/likes/{id}/respond
///
/// Accept or decline a received like. Only the liked user may respond;
/// anyone else gets the same 404 as for a missing row.
pub async fn respond(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(like_id): Path<DbId>,
    Json(input): Json<LikeAction>,
) -> AppResult<Json<DataResponse<Like>>> {
    let accept = match input.action.as_str() {
        "accept" => true,
        "decline" => false,
        other => {
            return Err(AppError::BadRequest(format!(
                "Unknown action '{other}', expected 'accept' or 'decline'"
            )))
        }
    };

    let like = LikeRepo::respond(&state.pool, like_id, auth.user_id, accept).await?;
    match like {
        Some(like) => Ok(Json(DataResponse { data: like })),
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "Like",
            id: like_id,
        })),
    }
}

/// Reject unknown `?status=` values with a 400 instead of silently
/// returning an empty list.
fn validate_status_filter(status: Option<&str>) -> Result<Option<&str>, AppError> {
    match status {
        Some(value) if !is_valid_status(value) => Err(AppError::BadRequest(format!(
            "Unknown status '{value}', expected 'pending', 'accepted' or 'declined'"
        ))),
        other => Ok(other),
    }
}
