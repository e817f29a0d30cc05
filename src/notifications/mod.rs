mod handlers;
pub mod service;
mod types;

pub use handlers::configure;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fanout_excludes_the_actor() {
        let fanout = FanOut::new_deal("Enterprise License", "Dana", 42);
        let rows = fanout.rows_for(&[1, 2, 3], 2);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.user_id != 2));
        assert!(rows.iter().all(|r| r.kind == "new_deal"));
        assert!(rows.iter().all(|r| r.related_deal_id == Some(42)));
    }

    #[test]
    fn test_fanout_to_nobody_is_empty() {
        let fanout = FanOut::deal_won("Enterprise License", 42);
        assert!(fanout.rows_for(&[7], 7).is_empty());
    }

    #[test]
    fn test_new_deal_message_names_the_actor() {
        let fanout = FanOut::new_deal("Enterprise License", "Dana", 42);
        assert_eq!(fanout.title, "New Deal Created");
        assert_eq!(fanout.message, "Dana created a new deal: Enterprise License");
        assert_eq!(fanout.link, "/deals");
    }

    #[test]
    fn test_won_and_lost_events() {
        assert_eq!(FanOut::deal_won("D", 1).kind, NotificationKind::DealWon);
        assert_eq!(
            FanOut::deal_lost("D", 1).message,
            "D has been marked as lost"
        );
    }

    #[test]
    fn test_kind_display_is_snake_case() {
        assert_eq!(NotificationKind::ActivityOverdue.to_string(), "activity_overdue");
        assert_eq!(NotificationKind::System.to_string(), "system");
    }
}
