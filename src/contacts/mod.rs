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

    fn sql(params: &ContactListParams, owner: Option<i32>) -> String {
        debug_query::<Pg, _>(&service::filtered(params, owner)).to_string()
    }

    #[test]
    fn test_no_filters_is_plain_select() {
        let q = sql(&ContactListParams::default(), None);
        assert!(!q.contains("WHERE"));
    }

    #[test]
    fn test_search_matches_name_and_email() {
        let params = ContactListParams {
            search: Some("ana".to_string()),
            ..Default::default()
        };
        let q = sql(&params, None);
        assert!(q.contains("first_name"));
        assert!(q.contains("last_name"));
        assert!(q.contains("email"));
        assert!(q.contains("ILIKE"));
    }

    #[test]
    fn test_statuses_filter_is_set_membership() {
        let params = ContactListParams {
            statuses: Some(vec![ContactStatus::Lead, ContactStatus::Customer]),
            ..Default::default()
        };
        let q = sql(&params, None);
        // diesel renders eq_any as `= ANY($n)` on Postgres
        assert!(q.contains("= ANY"));
    }

    #[test]
    fn test_owner_scope_is_applied() {
        let q = sql(&ContactListParams::default(), Some(3));
        assert!(q.contains("owner_id"));
    }

    #[test]
    fn test_date_range_bounds() {
        let params = ContactListParams {
            date_from: Some("2024-01-01T00:00:00Z".parse().unwrap()),
            date_to: Some("2024-12-31T23:59:59Z".parse().unwrap()),
            ..Default::default()
        };
        let q = sql(&params, None);
        assert!(q.contains(">="));
        assert!(q.contains("<="));
    }

    #[test]
    fn test_list_orders_newest_first_with_default_page() {
        let q = debug_query::<Pg, _>(&service::paged(&ContactListParams::default(), None))
            .to_string();
        assert!(q.contains("ORDER BY \"contacts\".\"created_at\" DESC"));
        assert!(q.contains("LIMIT $"));
        assert!(q.contains("OFFSET $"));
        assert!(q.contains("[100, 0]"));
    }

    #[test]
    fn test_explicit_page_overrides_defaults() {
        let params = ContactListParams {
            limit: Some(25),
            offset: Some(50),
            ..Default::default()
        };
        let q = debug_query::<Pg, _>(&service::paged(&params, None)).to_string();
        assert!(q.contains("[25, 50]"));
    }

    #[test]
    fn test_status_serde_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&ContactStatus::Prospect).unwrap(),
            "\"prospect\""
        );
        let parsed: ContactStatus = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(parsed, ContactStatus::Inactive);
    }

    #[test]
    fn test_validate_rejects_blank_names() {
        let req = CreateContactRequest {
            first_name: "  ".to_string(),
            last_name: "Reyes".to_string(),
            email: None,
            phone: None,
            mobile: None,
            job_title: None,
            department: None,
            company_id: None,
            address: None,
            city: None,
            country: None,
            linked_in: None,
            twitter: None,
            notes: None,
            status: None,
            source: None,
            avatar: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let req = CreateContactRequest {
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            email: Some("not-an-address".to_string()),
            phone: None,
            mobile: None,
            job_title: None,
            department: None,
            company_id: None,
            address: None,
            city: None,
            country: None,
            linked_in: None,
            twitter: None,
            notes: None,
            status: None,
            source: None,
            avatar: None,
        };
        assert!(req.validate().is_err());
    }
}
