//! Handlers for the `/notifications` resource.
//!
//! All endpoints require authentication via [`AuthUser`]. The read
//! flag here is the same delivered marker the sweeper sets; marking is
//! monotonic and idempotent.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use roomio_core::error::CoreError;
use roomio_core::types::DbId;
use roomio_db::models::notification::Notification;
use roomio_db::repositories::NotificationRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload for `GET /notifications`: the full list plus the unread
/// count for badge rendering.
#[derive(Debug, Serialize)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
    pub unread_count: i64,
}

/// GET /api/v1/notifications
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<NotificationList>>> {
    let notifications = NotificationRepo::list_for_user(&state.pool, auth.user_id).await?;
    let unread_count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse {
        data: NotificationList {
            notifications,
            unread_count,
        },
    }))
}

/// POST /api/v1/notifications/{id}/read
///
/// Mark a single notification as read. 404 when it does not exist, 403
/// when it targets another user, 204 otherwise -- including when it was
/// already read (idempotent no-op).
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let notification = NotificationRepo::find_by_id(&state.pool, notification_id).await?;
    let Some(notification) = notification else {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }));
    };
    if notification.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Notification belongs to another user".into(),
        )));
    }

    NotificationRepo::mark_read(&state.pool, notification_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notifications/read-all
///
/// Mark all of the authenticated user's notifications as read.
/// Returns the number of notifications that were flipped.
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;

    Ok(Json(serde_json::json!({
        "data": { "marked_read": count }
    })))
}
