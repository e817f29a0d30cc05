use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

use super::service;
use super::types::{
    Contact, ContactCountQuery, ContactListParams, ContactQuery, CreateContactRequest,
    NewContact, StatusCount, UpdateContactRequest,
};
use crate::auth::AuthUser;
use crate::shared::error::ApiError;
use crate::shared::state::AppState;

pub fn configure() -> Router<Arc<AppState>> {
    Router::new()
        .route("/contacts", get(list_contacts).post(create_contact))
        .route("/contacts/list", post(list_contacts_filtered))
        .route("/contacts/count", get(count_contacts))
        .route("/contacts/by-status", get(contacts_by_status))
        .route(
            "/contacts/:id",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
}

async fn list_contacts(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<ContactQuery>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(vec![]));
    };
    let params: ContactListParams = query.into();
    Ok(Json(service::list(&mut conn, &params, user.owner_scope())?))
}

async fn list_contacts_filtered(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(params): Json<ContactListParams>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(vec![]));
    };
    Ok(Json(service::list(&mut conn, &params, user.owner_scope())?))
}

async fn count_contacts(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<ContactCountQuery>,
) -> Result<Json<i64>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(0));
    };
    let status = query.status.map(|s| s.to_string());
    Ok(Json(service::count(&mut conn, status, user.owner_scope())?))
}

async fn contacts_by_status(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<StatusCount>>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(vec![]));
    };
    Ok(Json(service::count_by_status(&mut conn, user.owner_scope())?))
}

async fn get_contact(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Contact>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Err(ApiError::DatabaseUnavailable);
    };
    Ok(Json(service::get(&mut conn, id)?))
}

async fn create_contact(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<CreateContactRequest>,
) -> Result<Json<Contact>, ApiError> {
    req.validate()?;
    let mut conn = state.write_conn()?;
    Ok(Json(service::create(
        &mut conn,
        NewContact::from_request(req, user.id),
    )?))
}

async fn update_contact(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Json(req): Json<UpdateContactRequest>,
) -> Result<Json<Contact>, ApiError> {
    let mut conn = state.write_conn()?;
    Ok(Json(service::update(&mut conn, id, req.into())?))
}

async fn delete_contact(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut conn = state.write_conn()?;
    service::delete(&mut conn, id)?;
    Ok(Json(serde_json::json!({ "success": true })))
}
