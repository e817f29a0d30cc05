use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

use super::service;
use super::types::{
    Activity, ActivityListParams, ActivityQuery, CreateActivityRequest, NewActivity,
    RecentQuery, TypeCount, UpdateActivityRequest,
};
use crate::auth::AuthUser;
use crate::shared::error::ApiError;
use crate::shared::state::AppState;

pub fn configure() -> Router<Arc<AppState>> {
    Router::new()
        .route("/activities", get(list_activities).post(create_activity))
        .route("/activities/list", post(list_activities_filtered))
        .route("/activities/count", get(count_activities))
        .route("/activities/by-type", get(activities_by_type))
        .route("/activities/recent", get(recent_activities))
        .route("/activities/upcoming", get(upcoming_activities))
        .route("/activities/overdue", get(overdue_activities))
        .route("/activities/:id/complete", post(complete_activity))
        .route(
            "/activities/:id",
            get(get_activity)
                .put(update_activity)
                .delete(delete_activity),
        )
}

async fn list_activities(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<Activity>>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(vec![]));
    };
    let params: ActivityListParams = query.into();
    Ok(Json(service::list(&mut conn, &params, user.owner_scope())?))
}

async fn list_activities_filtered(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(params): Json<ActivityListParams>,
) -> Result<Json<Vec<Activity>>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(vec![]));
    };
    Ok(Json(service::list(&mut conn, &params, user.owner_scope())?))
}

async fn count_activities(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<i64>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(0));
    };
    Ok(Json(service::count(&mut conn, None, user.owner_scope())?))
}

async fn activities_by_type(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<TypeCount>>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(vec![]));
    };
    Ok(Json(service::count_by_type(&mut conn, user.owner_scope())?))
}

async fn recent_activities(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<Activity>>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(vec![]));
    };
    Ok(Json(service::recent(
        &mut conn,
        query.limit.unwrap_or(10),
        user.owner_scope(),
    )?))
}

async fn upcoming_activities(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<Activity>>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(vec![]));
    };
    Ok(Json(service::upcoming(&mut conn, user.id)?))
}

async fn overdue_activities(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<Activity>>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(vec![]));
    };
    Ok(Json(service::overdue(&mut conn, user.id)?))
}

async fn get_activity(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Activity>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Err(ApiError::DatabaseUnavailable);
    };
    Ok(Json(service::get(&mut conn, id)?))
}

async fn create_activity(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<CreateActivityRequest>,
) -> Result<Json<Activity>, ApiError> {
    req.validate()?;
    let mut conn = state.write_conn()?;
    Ok(Json(service::create(
        &mut conn,
        NewActivity::from_request(req, user.id),
    )?))
}

async fn update_activity(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Json(req): Json<UpdateActivityRequest>,
) -> Result<Json<Activity>, ApiError> {
    let mut conn = state.write_conn()?;
    Ok(Json(service::update(&mut conn, id, req.into())?))
}

async fn complete_activity(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Activity>, ApiError> {
    let mut conn = state.write_conn()?;
    Ok(Json(service::complete(&mut conn, id)?))
}

async fn delete_activity(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut conn = state.write_conn()?;
    service::delete(&mut conn, id)?;
    Ok(Json(serde_json::json!({ "success": true })))
}
