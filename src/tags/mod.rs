use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::AuthUser;
use crate::shared::error::ApiError;
use crate::shared::schema::{contact_tags, tags};
use crate::shared::state::AppState;

const DEFAULT_COLOR: &str = "#3B82F6";

#[derive(Debug, Clone, Serialize, Queryable)]
#[diesel(table_name = tags)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tags)]
struct NewTag {
    name: String,
    color: String,
}

fn is_hex_color(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

impl CreateTagRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("Tag name is required".to_string()));
        }
        if let Some(color) = &self.color {
            if !is_hex_color(color) {
                return Err(ApiError::Validation(
                    "Color must be a #RRGGBB hex value".to_string(),
                ));
            }
        }
        Ok(())
    }
}

pub fn configure() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tags", get(list_tags).post(create_tag))
        .route("/tags/:id", axum::routing::delete(delete_tag))
}

async fn list_tags(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<Json<Vec<Tag>>, ApiError> {
    let Some(mut conn) = state.read_conn() else {
        return Ok(Json(vec![]));
    };
    Ok(Json(tags::table.order(tags::name.asc()).load(&mut conn)?))
}

async fn create_tag(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Json(req): Json<CreateTagRequest>,
) -> Result<Json<Tag>, ApiError> {
    req.validate()?;
    let mut conn = state.write_conn()?;
    let new = NewTag {
        name: req.name,
        color: req.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
    };
    Ok(Json(
        diesel::insert_into(tags::table)
            .values(new)
            .get_result(&mut conn)?,
    ))
}

/// Join rows go first so the tag row never leaves dangling references.
async fn delete_tag(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut conn = state.write_conn()?;
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::delete(contact_tags::table.filter(contact_tags::tag_id.eq(id))).execute(conn)?;
        diesel::delete(tags::table.find(id)).execute(conn)?;
        Ok(())
    })?;
    Ok(Json(serde_json::json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_validation() {
        assert!(is_hex_color("#3B82F6"));
        assert!(is_hex_color("#abcdef"));
        assert!(!is_hex_color("3B82F6"));
        assert!(!is_hex_color("#3B82F"));
        assert!(!is_hex_color("#3B82FG"));
        assert!(!is_hex_color("#3B82F6A"));
    }

    #[test]
    fn test_create_requires_name() {
        let req = CreateTagRequest {
            name: " ".to_string(),
            color: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_rejects_bad_color() {
        let req = CreateTagRequest {
            name: "vip".to_string(),
            color: Some("blue".to_string()),
        };
        assert!(req.validate().is_err());
        let ok = CreateTagRequest {
            name: "vip".to_string(),
            color: Some("#112233".to_string()),
        };
        assert!(ok.validate().is_ok());
    }
}
