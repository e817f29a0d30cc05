use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use bigdecimal::BigDecimal;
use diesel::dsl::sum;
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;

use crate::activities;
use crate::auth::AuthUser;
use crate::companies;
use crate::contacts;
use crate::deals;
use crate::shared::error::ApiError;
use crate::shared::schema::deals as deals_table;
use crate::shared::state::AppState;

/// Headline widgets. The monetary sums are serialized as strings and
/// default to "0", never null.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_contacts: i64,
    pub total_companies: i64,
    pub total_deals: i64,
    pub open_activities: i64,
    pub pipeline_value: String,
    pub won_deals_value: String,
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self {
            total_contacts: 0,
            total_companies: 0,
            total_deals: 0,
            open_activities: 0,
            pipeline_value: "0".to_string(),
            won_deals_value: "0".to_string(),
        }
    }
}

fn sum_to_string(total: Option<BigDecimal>) -> String {
    total.map(|v| v.to_string()).unwrap_or_else(|| "0".to_string())
}

/// Open pipeline: every stage except the two terminal ones.
fn pipeline_value(conn: &mut PgConnection, owner_id: Option<i32>) -> Result<String, ApiError> {
    let mut query = deals_table::table
        .select(sum(deals_table::value))
        .filter(deals_table::stage.ne_all(vec!["closed_won", "closed_lost"]))
        .into_boxed();
    if let Some(owner) = owner_id {
        query = query.filter(deals_table::owner_id.eq(owner));
    }
    Ok(sum_to_string(query.first(conn)?))
}

fn won_value(conn: &mut PgConnection, owner_id: Option<i32>) -> Result<String, ApiError> {
    let mut query = deals_table::table
        .select(sum(deals_table::value))
        .filter(deals_table::stage.eq("closed_won"))
        .into_boxed();
    if let Some(owner) = owner_id {
        query = query.filter(deals_table::owner_id.eq(owner));
    }
    Ok(sum_to_string(query.first(conn)?))
}

pub fn stats(conn: &mut PgConnection, owner_id: Option<i32>) -> Result<DashboardStats, ApiError> {
    Ok(DashboardStats {
        total_contacts: contacts::service::count(conn, None, owner_id)?,
        total_companies: companies::service::count(conn, owner_id)?,
        total_deals: deals::service::count(conn, owner_id)?,
        open_activities: activities::service::count(conn, Some(false), owner_id)?,
        pipeline_value: pipeline_value(conn, owner_id)?,
        won_deals_value: won_value(conn, owner_id)?,
    })
}

pub fn configure() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard/stats", get(dashboard_stats))
}

async fn dashboard_stats(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<DashboardStats>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(DashboardStats::default()));
    };
    Ok(Json(stats(&mut conn, user.owner_scope())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_defaults_to_zero_strings() {
        let stats = DashboardStats::default();
        assert_eq!(stats.pipeline_value, "0");
        assert_eq!(stats.won_deals_value, "0");
        assert_eq!(stats.total_contacts, 0);
    }

    #[test]
    fn test_missing_sum_renders_zero() {
        assert_eq!(sum_to_string(None), "0");
        assert_eq!(sum_to_string(Some("1500.50".parse().unwrap())), "1500.50");
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let json = serde_json::to_value(DashboardStats::default()).unwrap();
        assert!(json.get("totalContacts").is_some());
        assert!(json.get("wonDealsValue").is_some());
        assert_eq!(json["pipelineValue"], "0");
    }
}
