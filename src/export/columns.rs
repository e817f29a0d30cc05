use serde_json::{json, Value};

use crate::dashboard::DashboardStats;
use crate::shared::utils::format_euro;

/// One manifest entry: JSON key to project, spreadsheet header, and an
/// optional formatter applied before quoting.
pub struct ExportColumn {
    pub key: &'static str,
    pub header: &'static str,
    pub formatter: Option<fn(&Value) -> String>,
}

const fn col(key: &'static str, header: &'static str) -> ExportColumn {
    ExportColumn {
        key,
        header,
        formatter: None,
    }
}

const fn date_col(key: &'static str, header: &'static str) -> ExportColumn {
    ExportColumn {
        key,
        header,
        formatter: Some(date_only),
    }
}

/// RFC 3339 timestamp → `YYYY-MM-DD`; anything else renders empty.
pub fn date_only(value: &Value) -> String {
    match value {
        Value::String(s) => s.split('T').next().unwrap_or("").to_string(),
        _ => String::new(),
    }
}

pub const CONTACT_COLUMNS: &[ExportColumn] = &[
    col("id", "ID"),
    col("first_name", "First Name"),
    col("last_name", "Last Name"),
    col("email", "Email"),
    col("phone", "Phone"),
    col("mobile", "Mobile"),
    col("job_title", "Job Title"),
    col("department", "Department"),
    col("address", "Address"),
    col("city", "City"),
    col("country", "Country"),
    col("status", "Status"),
    col("source", "Source"),
    col("linked_in", "LinkedIn"),
    col("twitter", "Twitter"),
    col("notes", "Notes"),
    date_col("created_at", "Created At"),
];

pub const DEAL_COLUMNS: &[ExportColumn] = &[
    col("id", "ID"),
    col("title", "Title"),
    col("value", "Value"),
    col("currency", "Currency"),
    col("stage", "Stage"),
    col("probability", "Probability (%)"),
    date_col("expected_close_date", "Expected Close Date"),
    col("description", "Description"),
    col("lost_reason", "Lost Reason"),
    date_col("created_at", "Created At"),
];

pub const COMPANY_COLUMNS: &[ExportColumn] = &[
    col("id", "ID"),
    col("name", "Company Name"),
    col("industry", "Industry"),
    col("website", "Website"),
    col("phone", "Phone"),
    col("email", "Email"),
    col("address", "Address"),
    col("city", "City"),
    col("country", "Country"),
    col("employee_count", "Employee Count"),
    col("annual_revenue", "Annual Revenue"),
    col("description", "Description"),
    date_col("created_at", "Created At"),
];

pub const ACTIVITY_COLUMNS: &[ExportColumn] = &[
    col("id", "ID"),
    col("type", "Type"),
    col("subject", "Subject"),
    col("description", "Description"),
    col("status", "Status"),
    date_col("due_date", "Due Date"),
    date_col("completed_at", "Completed At"),
    date_col("created_at", "Created At"),
];

pub const REPORT_COLUMNS: &[ExportColumn] = &[
    col("metric", "Metric"),
    col("value", "Value"),
    col("description", "Description"),
];

/// Synthetic metric/value/description rows for the dashboard report export.
pub fn report_rows(stats: &DashboardStats) -> Vec<Value> {
    vec![
        json!({
            "metric": "Total Contacts",
            "value": stats.total_contacts,
            "description": "Active contacts in CRM",
        }),
        json!({
            "metric": "Total Companies",
            "value": stats.total_companies,
            "description": "Organizations tracked",
        }),
        json!({
            "metric": "Total Deals",
            "value": stats.total_deals,
            "description": "Opportunities in pipeline",
        }),
        json!({
            "metric": "Open Activities",
            "value": stats.open_activities,
            "description": "Tasks pending completion",
        }),
        json!({
            "metric": "Pipeline Value",
            "value": format_euro(&stats.pipeline_value),
            "description": "Total value of active opportunities",
        }),
        json!({
            "metric": "Won Deals Value",
            "value": format_euro(&stats.won_deals_value),
            "description": "Total revenue from closed deals",
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_only_strips_the_time_part() {
        assert_eq!(date_only(&json!("2024-03-05T12:30:00Z")), "2024-03-05");
        assert_eq!(date_only(&Value::Null), "");
        assert_eq!(date_only(&json!(42)), "");
    }

    #[test]
    fn test_report_rows_cover_all_metrics() {
        let rows = report_rows(&DashboardStats::default());
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[4]["value"], "€0");
        assert_eq!(rows[0]["metric"], "Total Contacts");
    }
}
