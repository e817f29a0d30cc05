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
    fn test_search_covers_name_and_industry() {
        let params = CompanyListParams {
            search: Some("tech".to_string()),
            ..Default::default()
        };
        let q = debug_query::<Pg, _>(&service::filtered(&params, None)).to_string();
        assert!(q.contains("name"));
        assert!(q.contains("industry"));
        assert!(q.contains("ILIKE"));
    }

    #[test]
    fn test_industries_filter_is_set_membership() {
        let params = CompanyListParams {
            industries: Some(vec!["saas".to_string(), "retail".to_string()]),
            ..Default::default()
        };
        let q = debug_query::<Pg, _>(&service::filtered(&params, None)).to_string();
        assert!(q.contains("= ANY"));
    }

    #[test]
    fn test_list_orders_newest_first_with_default_page() {
        let q = debug_query::<Pg, _>(&service::paged(&CompanyListParams::default(), None))
            .to_string();
        assert!(q.contains("ORDER BY \"companies\".\"created_at\" DESC"));
        assert!(q.contains("LIMIT $"));
        assert!(q.contains("[100, 0]"));
    }

    #[test]
    fn test_validate_requires_name() {
        let req = CreateCompanyRequest {
            name: "".to_string(),
            industry: None,
            website: None,
            phone: None,
            email: None,
            address: None,
            city: None,
            country: None,
            employee_count: None,
            annual_revenue: None,
            description: None,
            logo: None,
        };
        assert!(req.validate().is_err());
    }
}
