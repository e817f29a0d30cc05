use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::schema::contacts;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
#[diesel(table_name = contacts)]
pub struct Contact {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub company_id: Option<i32>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub linked_in: Option<String>,
    pub twitter: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub source: Option<String>,
    pub avatar: Option<String>,
    pub owner_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    Lead,
    Prospect,
    Customer,
    Inactive,
}

impl std::fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lead => write!(f, "lead"),
            Self::Prospect => write!(f, "prospect"),
            Self::Customer => write!(f, "customer"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

impl Default for ContactStatus {
    fn default() -> Self {
        Self::Lead
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub company_id: Option<i32>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub linked_in: Option<String>,
    pub twitter: Option<String>,
    pub notes: Option<String>,
    pub status: Option<ContactStatus>,
    pub source: Option<String>,
    pub avatar: Option<String>,
}

impl CreateContactRequest {
    pub fn validate(&self) -> Result<(), crate::shared::error::ApiError> {
        use crate::shared::error::ApiError;
        if self.first_name.trim().is_empty() {
            return Err(ApiError::Validation("First name is required".to_string()));
        }
        if self.last_name.trim().is_empty() {
            return Err(ApiError::Validation("Last name is required".to_string()));
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(ApiError::Validation("Invalid email address".to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contacts)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub company_id: Option<i32>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub linked_in: Option<String>,
    pub twitter: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub source: Option<String>,
    pub avatar: Option<String>,
    pub owner_id: Option<i32>,
}

impl NewContact {
    pub fn from_request(req: CreateContactRequest, owner_id: i32) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            mobile: req.mobile,
            job_title: req.job_title,
            department: req.department,
            company_id: req.company_id,
            address: req.address,
            city: req.city,
            country: req.country,
            linked_in: req.linked_in,
            twitter: req.twitter,
            notes: req.notes,
            status: req.status.unwrap_or_default().to_string(),
            source: req.source,
            avatar: req.avatar,
            owner_id: Some(owner_id),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub company_id: Option<i32>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub linked_in: Option<String>,
    pub twitter: Option<String>,
    pub notes: Option<String>,
    pub status: Option<ContactStatus>,
    pub source: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = contacts)]
pub struct ContactChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub company_id: Option<i32>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub linked_in: Option<String>,
    pub twitter: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
    pub source: Option<String>,
    pub avatar: Option<String>,
}

impl From<UpdateContactRequest> for ContactChanges {
    fn from(req: UpdateContactRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            mobile: req.mobile,
            job_title: req.job_title,
            department: req.department,
            company_id: req.company_id,
            address: req.address,
            city: req.city,
            country: req.country,
            linked_in: req.linked_in,
            twitter: req.twitter,
            notes: req.notes,
            status: req.status.map(|s| s.to_string()),
            source: req.source,
            avatar: req.avatar,
        }
    }
}

/// Rich list filter, accepted as a JSON body. `status` is the singular
/// backward-compatible form; when both `status` and `statuses` are present
/// both predicates apply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
    pub status: Option<ContactStatus>,
    pub statuses: Option<Vec<ContactStatus>>,
    pub sources: Option<Vec<String>>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

/// Simple filter subset for the GET mount.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
    pub status: Option<ContactStatus>,
}

impl From<ContactQuery> for ContactListParams {
    fn from(q: ContactQuery) -> Self {
        Self {
            limit: q.limit,
            offset: q.offset,
            search: q.search,
            status: q.status,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactCountQuery {
    pub status: Option<ContactStatus>,
}

#[derive(Debug, Clone, Serialize, Queryable)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}
