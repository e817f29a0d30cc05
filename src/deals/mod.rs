mod handlers;
pub mod service;
mod types;

pub use handlers::configure;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::debug_query;
    use diesel::pg::Pg;

    #[test]
    fn test_stage_display_round_trip() {
        assert_eq!(DealStage::ClosedWon.to_string(), "closed_won");
        assert_eq!(
            serde_json::from_str::<DealStage>("\"closed_lost\"").unwrap(),
            DealStage::ClosedLost
        );
        assert_eq!(DealStage::default(), DealStage::Lead);
    }

    #[test]
    fn test_transition_into_won_fires() {
        assert_eq!(
            stage_event("negotiation", DealStage::ClosedWon),
            Some(StageEvent::Won)
        );
    }

    #[test]
    fn test_transition_into_lost_fires() {
        assert_eq!(
            stage_event("negotiation", DealStage::ClosedLost),
            Some(StageEvent::Lost)
        );
    }

    #[test]
    fn test_same_stage_is_silent() {
        assert_eq!(stage_event("closed_won", DealStage::ClosedWon), None);
    }

    #[test]
    fn test_ordinary_moves_are_silent() {
        assert_eq!(stage_event("lead", DealStage::Qualified), None);
        assert_eq!(stage_event("closed_won", DealStage::Negotiation), None);
    }

    #[test]
    fn test_value_bounds_are_open_ended() {
        let params = DealListParams {
            value_min: Some("1000".parse().unwrap()),
            ..Default::default()
        };
        let q = debug_query::<Pg, _>(&service::filtered(&params, None)).to_string();
        assert!(q.contains(">="));
        assert!(!q.contains("<="));
    }

    #[test]
    fn test_stages_filter_is_set_membership() {
        let params = DealListParams {
            stages: Some(vec![DealStage::Lead, DealStage::Proposal]),
            ..Default::default()
        };
        let q = debug_query::<Pg, _>(&service::filtered(&params, None)).to_string();
        assert!(q.contains("= ANY"));
    }

    #[test]
    fn test_list_orders_newest_first_with_default_page() {
        let q =
            debug_query::<Pg, _>(&service::paged(&DealListParams::default(), None)).to_string();
        assert!(q.contains("ORDER BY \"deals\".\"created_at\" DESC"));
        assert!(q.contains("LIMIT $"));
        assert!(q.contains("[100, 0]"));
    }

    #[test]
    fn test_probability_validation() {
        let mut req = CreateDealRequest {
            title: "Enterprise License".to_string(),
            value: None,
            currency: None,
            stage: None,
            probability: Some(101),
            expected_close_date: None,
            contact_id: None,
            company_id: None,
            description: None,
        };
        assert!(req.validate().is_err());
        req.probability = Some(100);
        assert!(req.validate().is_ok());
    }
}
