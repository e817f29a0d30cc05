use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use std::sync::Arc;

use super::service;
use super::types::{Notification, NotificationListQuery};
use crate::auth::AuthUser;
use crate::shared::error::ApiError;
use crate::shared::state::AppState;

pub fn configure() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/unread-count", get(unread_count))
        .route("/notifications/:id/read", post(mark_read))
        .route("/notifications/read-all", post(mark_all_read))
        .route("/notifications/:id", delete(delete_notification))
}

async fn list_notifications(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(vec![]));
    };
    Ok(Json(service::list(&mut conn, user.id, &query)?))
}

async fn unread_count(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<i64>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(0));
    };
    Ok(Json(service::unread_count(&mut conn, user.id)?))
}

async fn mark_read(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut conn = state.write_conn()?;
    service::mark_read(&mut conn, id, user.id)?;
    Ok(Json(serde_json::json!({ "success": true })))
}

async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut conn = state.write_conn()?;
    service::mark_all_read(&mut conn, user.id)?;
    Ok(Json(serde_json::json!({ "success": true })))
}

async fn delete_notification(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut conn = state.write_conn()?;
    service::delete(&mut conn, id, user.id)?;
    Ok(Json(serde_json::json!({ "success": true })))
}
