use axum::extract::{Path, State};
use axum::{Json, Router};
use axum::routing::{get, put};
use std::sync::Arc;

use super::service;
use super::types::{EmailPreferences, EmailPreferencesView, UpdateRoleRequest, User};
use crate::auth::AuthUser;
use crate::shared::error::ApiError;
use crate::shared::state::AppState;

pub fn configure() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(me))
        .route("/users", get(list_users))
        .route("/users/:id/role", put(update_role))
        .route(
            "/users/me/email-preferences",
            get(get_email_preferences).put(update_email_preferences),
        )
}

async fn me(user: AuthUser) -> Json<AuthUser> {
    Json(user)
}

async fn list_users(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<User>>, ApiError> {
    user.require_admin()?;
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(vec![]));
    };
    Ok(Json(service::list_users(&mut conn)?))
}

async fn update_role(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(user_id): Path<i32>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    user.require_admin()?;
    let mut conn = state.write_conn()?;
    service::update_role(&mut conn, user_id, req.role)?;
    Ok(Json(serde_json::json!({ "success": true })))
}

async fn get_email_preferences(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Option<EmailPreferencesView>>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(None));
    };
    Ok(Json(Some(service::get_email_preferences(&mut conn, user.id)?)))
}

async fn update_email_preferences(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(prefs): Json<EmailPreferences>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut conn = state.write_conn()?;
    service::update_email_preferences(&mut conn, user.id, &prefs)?;
    Ok(Json(serde_json::json!({ "success": true })))
}
