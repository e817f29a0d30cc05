use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::schema::users;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
    pub role: String,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub email_notify_new_deal: bool,
    pub email_notify_deal_won: bool,
    pub email_notify_deal_lost: bool,
    pub email_notify_overdue: bool,
    pub email_notify_activity_due: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_signed_in: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(()),
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::User
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: UserRole,
}

/// Partial patch over the five per-event mail toggles. Absent fields are
/// left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, AsChangeset)]
#[diesel(table_name = users)]
pub struct EmailPreferences {
    pub email_notify_new_deal: Option<bool>,
    pub email_notify_deal_won: Option<bool>,
    pub email_notify_deal_lost: Option<bool>,
    pub email_notify_overdue: Option<bool>,
    pub email_notify_activity_due: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Queryable)]
pub struct EmailPreferencesView {
    pub email_notify_new_deal: bool,
    pub email_notify_deal_won: bool,
    pub email_notify_deal_lost: bool,
    pub email_notify_overdue: bool,
    pub email_notify_activity_due: bool,
}
