//! Combines the per-module routers into the `/api` surface.

use axum::Router;
use std::sync::Arc;

use crate::shared::state::AppState;

pub fn configure_api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(crate::users::configure())
        .merge(crate::contacts::configure())
        .merge(crate::companies::configure())
        .merge(crate::deals::configure())
        .merge(crate::activities::configure())
        .merge(crate::tags::configure())
        .merge(crate::notifications::configure())
        .merge(crate::dashboard::configure())
        .merge(crate::export::configure())
}
