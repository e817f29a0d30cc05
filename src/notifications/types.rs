use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::schema::notifications;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewDeal,
    DealWon,
    DealLost,
    ActivityDue,
    ActivityOverdue,
    ContactAdded,
    System,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NewDeal => write!(f, "new_deal"),
            Self::DealWon => write!(f, "deal_won"),
            Self::DealLost => write!(f, "deal_lost"),
            Self::ActivityDue => write!(f, "activity_due"),
            Self::ActivityOverdue => write!(f, "activity_overdue"),
            Self::ContactAdded => write!(f, "contact_added"),
            Self::System => write!(f, "system"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Queryable)]
#[diesel(table_name = notifications)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: Option<String>,
    pub link: Option<String>,
    pub is_read: bool,
    pub related_deal_id: Option<i32>,
    pub related_activity_id: Option<i32>,
    pub related_contact_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub struct NewNotification {
    pub user_id: i32,
    pub kind: String,
    pub title: String,
    pub message: Option<String>,
    pub link: Option<String>,
    pub related_deal_id: Option<i32>,
    pub related_activity_id: Option<i32>,
    pub related_contact_id: Option<i32>,
}

/// One business event, fanned out to every user except the actor.
#[derive(Debug, Clone)]
pub struct FanOut {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub link: String,
    pub related_deal_id: Option<i32>,
}

impl FanOut {
    pub fn new_deal(deal_title: &str, actor_name: &str, deal_id: i32) -> Self {
        Self {
            kind: NotificationKind::NewDeal,
            title: "New Deal Created".to_string(),
            message: format!("{} created a new deal: {}", actor_name, deal_title),
            link: "/deals".to_string(),
            related_deal_id: Some(deal_id),
        }
    }

    pub fn deal_won(deal_title: &str, deal_id: i32) -> Self {
        Self {
            kind: NotificationKind::DealWon,
            title: "Deal Won! 🎉".to_string(),
            message: format!("{} has been marked as won", deal_title),
            link: "/deals".to_string(),
            related_deal_id: Some(deal_id),
        }
    }

    pub fn deal_lost(deal_title: &str, deal_id: i32) -> Self {
        Self {
            kind: NotificationKind::DealLost,
            title: "Deal Lost".to_string(),
            message: format!("{} has been marked as lost", deal_title),
            link: "/deals".to_string(),
            related_deal_id: Some(deal_id),
        }
    }

    /// One insert row per recipient, skipping the actor.
    pub fn rows_for(&self, user_ids: &[i32], exclude_user_id: i32) -> Vec<NewNotification> {
        user_ids
            .iter()
            .filter(|&&id| id != exclude_user_id)
            .map(|&id| NewNotification {
                user_id: id,
                kind: self.kind.to_string(),
                title: self.title.clone(),
                message: Some(self.message.clone()),
                link: Some(self.link.clone()),
                related_deal_id: self.related_deal_id,
                related_activity_id: None,
                related_contact_id: None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationListQuery {
    pub limit: Option<i64>,
    pub unread_only: Option<bool>,
}
