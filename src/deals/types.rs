use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::error::ApiError;
use crate::shared::schema::deals;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
#[diesel(table_name = deals)]
pub struct Deal {
    pub id: i32,
    pub title: String,
    pub value: Option<BigDecimal>,
    pub currency: String,
    pub stage: String,
    pub probability: Option<i32>,
    pub expected_close_date: Option<DateTime<Utc>>,
    pub actual_close_date: Option<DateTime<Utc>>,
    pub contact_id: Option<i32>,
    pub company_id: Option<i32>,
    pub owner_id: Option<i32>,
    pub description: Option<String>,
    pub lost_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStage {
    Lead,
    Qualified,
    Proposal,
    Negotiation,
    ClosedWon,
    ClosedLost,
}

impl std::fmt::Display for DealStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lead => write!(f, "lead"),
            Self::Qualified => write!(f, "qualified"),
            Self::Proposal => write!(f, "proposal"),
            Self::Negotiation => write!(f, "negotiation"),
            Self::ClosedWon => write!(f, "closed_won"),
            Self::ClosedLost => write!(f, "closed_lost"),
        }
    }
}

impl Default for DealStage {
    fn default() -> Self {
        Self::Lead
    }
}

/// Stage transitions that trigger fan-out. Any other pair of stages, and
/// same-value "transitions", are silent; there is no legality checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    Won,
    Lost,
}

pub fn stage_event(old_stage: &str, new_stage: DealStage) -> Option<StageEvent> {
    if old_stage == new_stage.to_string() {
        return None;
    }
    match new_stage {
        DealStage::ClosedWon => Some(StageEvent::Won),
        DealStage::ClosedLost => Some(StageEvent::Lost),
        _ => None,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDealRequest {
    pub title: String,
    pub value: Option<BigDecimal>,
    pub currency: Option<String>,
    pub stage: Option<DealStage>,
    pub probability: Option<i32>,
    pub expected_close_date: Option<DateTime<Utc>>,
    pub contact_id: Option<i32>,
    pub company_id: Option<i32>,
    pub description: Option<String>,
}

impl CreateDealRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::Validation("Deal title is required".to_string()));
        }
        if let Some(p) = self.probability {
            if !(0..=100).contains(&p) {
                return Err(ApiError::Validation(
                    "Probability must be between 0 and 100".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = deals)]
pub struct NewDeal {
    pub title: String,
    pub value: Option<BigDecimal>,
    pub currency: String,
    pub stage: String,
    pub probability: Option<i32>,
    pub expected_close_date: Option<DateTime<Utc>>,
    pub contact_id: Option<i32>,
    pub company_id: Option<i32>,
    pub owner_id: Option<i32>,
    pub description: Option<String>,
}

impl NewDeal {
    pub fn from_request(req: CreateDealRequest, owner_id: i32) -> Self {
        Self {
            title: req.title,
            value: req.value,
            currency: req.currency.unwrap_or_else(|| "EUR".to_string()),
            stage: req.stage.unwrap_or_default().to_string(),
            probability: req.probability,
            expected_close_date: req.expected_close_date,
            contact_id: req.contact_id,
            company_id: req.company_id,
            owner_id: Some(owner_id),
            description: req.description,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDealRequest {
    pub title: Option<String>,
    pub value: Option<BigDecimal>,
    pub currency: Option<String>,
    pub stage: Option<DealStage>,
    pub probability: Option<i32>,
    pub expected_close_date: Option<DateTime<Utc>>,
    pub actual_close_date: Option<DateTime<Utc>>,
    pub contact_id: Option<i32>,
    pub company_id: Option<i32>,
    pub description: Option<String>,
    pub lost_reason: Option<String>,
}

impl UpdateDealRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(ApiError::Validation("Deal title is required".to_string()));
            }
        }
        if let Some(p) = self.probability {
            if !(0..=100).contains(&p) {
                return Err(ApiError::Validation(
                    "Probability must be between 0 and 100".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = deals)]
pub struct DealChanges {
    pub title: Option<String>,
    pub value: Option<BigDecimal>,
    pub currency: Option<String>,
    pub stage: Option<String>,
    pub probability: Option<i32>,
    pub expected_close_date: Option<DateTime<Utc>>,
    pub actual_close_date: Option<DateTime<Utc>>,
    pub contact_id: Option<i32>,
    pub company_id: Option<i32>,
    pub description: Option<String>,
    pub lost_reason: Option<String>,
}

impl From<UpdateDealRequest> for DealChanges {
    fn from(req: UpdateDealRequest) -> Self {
        Self {
            title: req.title,
            value: req.value,
            currency: req.currency,
            stage: req.stage.map(|s| s.to_string()),
            probability: req.probability,
            expected_close_date: req.expected_close_date,
            actual_close_date: req.actual_close_date,
            contact_id: req.contact_id,
            company_id: req.company_id,
            description: req.description,
            lost_reason: req.lost_reason,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DealListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub stage: Option<DealStage>,
    pub stages: Option<Vec<DealStage>>,
    pub value_min: Option<BigDecimal>,
    pub value_max: Option<BigDecimal>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DealQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub stage: Option<DealStage>,
}

impl From<DealQuery> for DealListParams {
    fn from(q: DealQuery) -> Self {
        Self {
            limit: q.limit,
            offset: q.offset,
            stage: q.stage,
            ..Self::default()
        }
    }
}

/// Per-stage rollup for the pipeline widget. `total_value` is serialized as
/// a string, never null.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStat {
    pub stage: String,
    pub count: i64,
    pub total_value: String,
}
