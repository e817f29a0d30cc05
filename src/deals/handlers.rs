use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

use super::service;
use super::types::{
    stage_event, CreateDealRequest, Deal, DealListParams, DealQuery, NewDeal, PipelineStat,
    StageEvent, UpdateDealRequest,
};
use crate::auth::AuthUser;
use crate::email::EmailJob;
use crate::notifications::{self, FanOut};
use crate::shared::error::ApiError;
use crate::shared::state::AppState;

pub fn configure() -> Router<Arc<AppState>> {
    Router::new()
        .route("/deals", get(list_deals).post(create_deal))
        .route("/deals/list", post(list_deals_filtered))
        .route("/deals/count", get(count_deals))
        .route("/deals/pipeline-stats", get(pipeline_stats))
        .route(
            "/deals/:id",
            get(get_deal).put(update_deal).delete(delete_deal),
        )
}

async fn list_deals(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<DealQuery>,
) -> Result<Json<Vec<Deal>>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(vec![]));
    };
    let params: DealListParams = query.into();
    Ok(Json(service::list(&mut conn, &params, user.owner_scope())?))
}

async fn list_deals_filtered(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(params): Json<DealListParams>,
) -> Result<Json<Vec<Deal>>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(vec![]));
    };
    Ok(Json(service::list(&mut conn, &params, user.owner_scope())?))
}

async fn count_deals(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<i64>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(0));
    };
    Ok(Json(service::count(&mut conn, user.owner_scope())?))
}

async fn pipeline_stats(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<PipelineStat>>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(vec![]));
    };
    Ok(Json(service::pipeline_stats(&mut conn, user.owner_scope())?))
}

async fn get_deal(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Deal>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Err(ApiError::DatabaseUnavailable);
    };
    Ok(Json(service::get(&mut conn, id)?))
}

async fn create_deal(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<CreateDealRequest>,
) -> Result<Json<Deal>, ApiError> {
    req.validate()?;
    let mut conn = state.write_conn()?;
    let deal = service::create(&mut conn, NewDeal::from_request(req, user.id))?;

    // In-app rows are part of the mutation's contract; only the email
    // digest is best-effort.
    let fanout = FanOut::new_deal(&deal.title, &user.display_name(), deal.id);
    notifications::service::create_for_all_users(&mut conn, &fanout, user.id)?;
    state.mailer.enqueue(EmailJob::new_deal(
        &deal.title,
        deal.value.as_ref(),
        &user.display_name(),
        user.id,
    ));

    Ok(Json(deal))
}

async fn update_deal(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(req): Json<UpdateDealRequest>,
) -> Result<Json<Deal>, ApiError> {
    req.validate()?;
    let mut conn = state.write_conn()?;

    // Snapshot before the update so the stage transition is detected
    // against the pre-mutation state.
    let before = service::get(&mut conn, id)?;
    let new_stage = req.stage;
    let deal = service::update(&mut conn, id, req.into())?;

    if let Some(event) = new_stage.and_then(|stage| stage_event(&before.stage, stage)) {
        let (fanout, job) = match event {
            StageEvent::Won => (
                FanOut::deal_won(&before.title, id),
                EmailJob::deal_won(
                    &before.title,
                    before.value.as_ref(),
                    &user.display_name(),
                    user.id,
                ),
            ),
            StageEvent::Lost => (
                FanOut::deal_lost(&before.title, id),
                EmailJob::deal_lost(
                    &before.title,
                    before.value.as_ref(),
                    deal.lost_reason.as_deref(),
                    &user.display_name(),
                    user.id,
                ),
            ),
        };
        notifications::service::create_for_all_users(&mut conn, &fanout, user.id)?;
        state.mailer.enqueue(job);
    }

    Ok(Json(deal))
}

async fn delete_deal(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut conn = state.write_conn()?;
    service::delete(&mut conn, id)?;
    Ok(Json(serde_json::json!({ "success": true })))
}
