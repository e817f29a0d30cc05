use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

use super::service;
use super::types::{
    Company, CompanyChanges, CompanyListParams, CompanyQuery, CreateCompanyRequest, NewCompany,
};
use crate::auth::AuthUser;
use crate::shared::error::ApiError;
use crate::shared::state::AppState;

pub fn configure() -> Router<Arc<AppState>> {
    Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route("/companies/list", post(list_companies_filtered))
        .route("/companies/count", get(count_companies))
        .route(
            "/companies/:id",
            get(get_company).put(update_company).delete(delete_company),
        )
}

async fn list_companies(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<CompanyQuery>,
) -> Result<Json<Vec<Company>>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(vec![]));
    };
    let params: CompanyListParams = query.into();
    Ok(Json(service::list(&mut conn, &params, user.owner_scope())?))
}

async fn list_companies_filtered(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(params): Json<CompanyListParams>,
) -> Result<Json<Vec<Company>>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(vec![]));
    };
    Ok(Json(service::list(&mut conn, &params, user.owner_scope())?))
}

async fn count_companies(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<i64>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(0));
    };
    Ok(Json(service::count(&mut conn, user.owner_scope())?))
}

async fn get_company(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Company>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Err(ApiError::DatabaseUnavailable);
    };
    Ok(Json(service::get(&mut conn, id)?))
}

async fn create_company(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<CreateCompanyRequest>,
) -> Result<Json<Company>, ApiError> {
    req.validate()?;
    let mut conn = state.write_conn()?;
    Ok(Json(service::create(
        &mut conn,
        NewCompany::from_request(req, user.id),
    )?))
}

async fn update_company(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Json(changes): Json<CompanyChanges>,
) -> Result<Json<Company>, ApiError> {
    let mut conn = state.write_conn()?;
    Ok(Json(service::update(&mut conn, id, changes)?))
}

async fn delete_company(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut conn = state.write_conn()?;
    service::delete(&mut conn, id)?;
    Ok(Json(serde_json::json!({ "success": true })))
}
