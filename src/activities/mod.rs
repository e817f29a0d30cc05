mod handlers;
pub mod service;
mod types;

pub use handlers::configure;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use diesel::debug_query;
    use diesel::pg::Pg;

    fn activity(is_completed: bool, due_in: Option<Duration>) -> Activity {
        let now = Utc::now();
        Activity {
            id: 1,
            kind: "task".to_string(),
            subject: "Follow up".to_string(),
            description: None,
            due_date: due_in.map(|d| now + d),
            completed_at: None,
            is_completed,
            contact_id: None,
            company_id: None,
            deal_id: None,
            owner_id: Some(1),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_completed_wins_over_due_date() {
        let a = activity(true, Some(Duration::days(-3)));
        assert_eq!(a.derived_status(Utc::now()), "completed");
    }

    #[test]
    fn test_future_due_date_is_pending() {
        let a = activity(false, Some(Duration::days(2)));
        assert_eq!(a.derived_status(Utc::now()), "pending");
    }

    #[test]
    fn test_past_due_date_is_overdue() {
        let a = activity(false, Some(Duration::hours(-1)));
        assert_eq!(a.derived_status(Utc::now()), "overdue");
    }

    #[test]
    fn test_no_due_date_is_neither() {
        let a = activity(false, None);
        assert_eq!(a.derived_status(Utc::now()), "");
    }

    #[test]
    fn test_pending_filter_requires_future_due_date() {
        let params = ActivityListParams {
            status: Some(ActivityStatus::Pending),
            ..Default::default()
        };
        let q = debug_query::<Pg, _>(&service::filtered(&params, None, Utc::now())).to_string();
        assert!(q.contains("is_completed"));
        assert!(q.contains(">="));
    }

    #[test]
    fn test_overdue_filter_is_strictly_past() {
        let params = ActivityListParams {
            status: Some(ActivityStatus::Overdue),
            ..Default::default()
        };
        let q = debug_query::<Pg, _>(&service::filtered(&params, None, Utc::now())).to_string();
        assert!(q.contains("<"));
        assert!(!q.contains("<="));
    }

    #[test]
    fn test_types_filter_is_set_membership() {
        let params = ActivityListParams {
            types: Some(vec![ActivityKind::Call, ActivityKind::Meeting]),
            ..Default::default()
        };
        let q = debug_query::<Pg, _>(&service::filtered(&params, None, Utc::now())).to_string();
        assert!(q.contains("= ANY"));
    }

    #[test]
    fn test_list_orders_newest_first_with_default_page() {
        let q = debug_query::<Pg, _>(&service::paged(
            &ActivityListParams::default(),
            None,
            Utc::now(),
        ))
        .to_string();
        assert!(q.contains("ORDER BY \"activities\".\"created_at\" DESC"));
        assert!(q.contains("LIMIT $"));
        assert!(q.contains("[100, 0]"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ActivityKind::Meeting.to_string(), "meeting");
        assert_eq!(ActivityKind::Note.to_string(), "note");
    }
}
