use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::error::ApiError;
use crate::shared::schema::activities;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
#[diesel(table_name = activities)]
pub struct Activity {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub subject: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub contact_id: Option<i32>,
    pub company_id: Option<i32>,
    pub deal_id: Option<i32>,
    pub owner_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Activity {
    /// Derived, never stored. An incomplete activity with no due date is
    /// neither pending nor overdue.
    pub fn derived_status(&self, now: DateTime<Utc>) -> &'static str {
        if self.is_completed {
            return "completed";
        }
        match self.due_date {
            Some(due) if due < now => "overdue",
            Some(_) => "pending",
            None => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Call,
    Email,
    Meeting,
    Task,
    Note,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Email => write!(f, "email"),
            Self::Meeting => write!(f, "meeting"),
            Self::Task => write!(f, "task"),
            Self::Note => write!(f, "note"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Pending,
    Completed,
    Overdue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivityRequest {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub subject: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub contact_id: Option<i32>,
    pub company_id: Option<i32>,
    pub deal_id: Option<i32>,
}

impl CreateActivityRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.subject.trim().is_empty() {
            return Err(ApiError::Validation("Subject is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = activities)]
pub struct NewActivity {
    pub kind: String,
    pub subject: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub contact_id: Option<i32>,
    pub company_id: Option<i32>,
    pub deal_id: Option<i32>,
    pub owner_id: Option<i32>,
}

impl NewActivity {
    pub fn from_request(req: CreateActivityRequest, owner_id: i32) -> Self {
        Self {
            kind: req.kind.to_string(),
            subject: req.subject,
            description: req.description,
            due_date: req.due_date,
            contact_id: req.contact_id,
            company_id: req.company_id,
            deal_id: req.deal_id,
            owner_id: Some(owner_id),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateActivityRequest {
    #[serde(rename = "type")]
    pub kind: Option<ActivityKind>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_completed: Option<bool>,
    pub contact_id: Option<i32>,
    pub company_id: Option<i32>,
    pub deal_id: Option<i32>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = activities)]
pub struct ActivityChanges {
    pub kind: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_completed: Option<bool>,
    pub contact_id: Option<i32>,
    pub company_id: Option<i32>,
    pub deal_id: Option<i32>,
}

impl From<UpdateActivityRequest> for ActivityChanges {
    fn from(req: UpdateActivityRequest) -> Self {
        Self {
            kind: req.kind.map(|k| k.to_string()),
            subject: req.subject,
            description: req.description,
            due_date: req.due_date,
            is_completed: req.is_completed,
            contact_id: req.contact_id,
            company_id: req.company_id,
            deal_id: req.deal_id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<ActivityKind>,
    pub types: Option<Vec<ActivityKind>>,
    pub contact_id: Option<i32>,
    pub company_id: Option<i32>,
    pub deal_id: Option<i32>,
    pub is_completed: Option<bool>,
    pub status: Option<ActivityStatus>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<ActivityKind>,
    pub contact_id: Option<i32>,
    pub company_id: Option<i32>,
    pub deal_id: Option<i32>,
}

impl From<ActivityQuery> for ActivityListParams {
    fn from(q: ActivityQuery) -> Self {
        Self {
            limit: q.limit,
            offset: q.offset,
            kind: q.kind,
            contact_id: q.contact_id,
            company_id: q.company_id,
            deal_id: q.deal_id,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Queryable)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: i64,
}
