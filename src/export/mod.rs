mod columns;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use rust_xlsxwriter::Workbook;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub use columns::{
    date_only, report_rows, ExportColumn, ACTIVITY_COLUMNS, COMPANY_COLUMNS, CONTACT_COLUMNS,
    DEAL_COLUMNS, REPORT_COLUMNS,
};

use crate::auth::AuthUser;
use crate::dashboard;
use crate::shared::error::ApiError;
use crate::shared::state::AppState;
use crate::{activities, companies, contacts, deals};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportRequest {
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportFile {
    pub data: String,
    pub filename: String,
    pub mime_type: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_base64: bool,
}

fn cell(column: &ExportColumn, row: &Value) -> Option<String> {
    let raw = row.get(column.key).unwrap_or(&Value::Null);
    if let Some(format) = column.formatter {
        return Some(format(raw));
    }
    match raw {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// CSV with every field quote-wrapped and internal quotes doubled. The
/// header row is always present; an empty row set yields just the header.
pub fn generate_csv(rows: &[Value], columns: &[ExportColumn]) -> String {
    let header = columns
        .iter()
        .map(|c| format!("\"{}\"", c.header))
        .collect::<Vec<_>>()
        .join(",");
    if rows.is_empty() {
        return header + "\n";
    }
    let mut lines = vec![header];
    for row in rows {
        let line = columns
            .iter()
            .map(|column| match cell(column, row) {
                Some(value) => format!("\"{}\"", value.replace('"', "\"\"")),
                None => "\"\"".to_string(),
            })
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }
    lines.join("\n")
}

/// Single-sheet workbook with the same projection as the CSV path. Numbers
/// stay numeric; everything else is written as text.
pub fn generate_xlsx(
    rows: &[Value],
    columns: &[ExportColumn],
    sheet_name: &str,
) -> Result<Vec<u8>, ApiError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(sheet_name)
        .map_err(|e| ApiError::ExportFailed(e.to_string()))?;

    for (c, column) in columns.iter().enumerate() {
        sheet
            .write_string(0, c as u16, column.header)
            .map_err(|e| ApiError::ExportFailed(e.to_string()))?;
        sheet
            .set_column_width(c as u16, column.header.len().max(15) as f64)
            .map_err(|e| ApiError::ExportFailed(e.to_string()))?;
    }

    for (r, row) in rows.iter().enumerate() {
        for (c, column) in columns.iter().enumerate() {
            let row_num = (r + 1) as u32;
            let raw = row.get(column.key).unwrap_or(&Value::Null);
            if column.formatter.is_none() {
                if let Some(n) = raw.as_f64() {
                    sheet
                        .write_number(row_num, c as u16, n)
                        .map_err(|e| ApiError::ExportFailed(e.to_string()))?;
                    continue;
                }
            }
            let text = cell(column, row).unwrap_or_default();
            sheet
                .write_string(row_num, c as u16, &text)
                .map_err(|e| ApiError::ExportFailed(e.to_string()))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ApiError::ExportFailed(e.to_string()))
}

fn build_file(
    format: ExportFormat,
    prefix: &str,
    sheet_name: &str,
    rows: &[Value],
    columns: &[ExportColumn],
) -> Result<ExportFile, ApiError> {
    let today = Utc::now().format("%Y-%m-%d");
    match format {
        ExportFormat::Csv => Ok(ExportFile {
            data: generate_csv(rows, columns),
            filename: format!("{}_{}.csv", prefix, today),
            mime_type: "text/csv".to_string(),
            is_base64: false,
        }),
        ExportFormat::Xlsx => Ok(ExportFile {
            data: BASE64.encode(generate_xlsx(rows, columns, sheet_name)?),
            filename: format!("{}_{}.xlsx", prefix, today),
            mime_type: XLSX_MIME.to_string(),
            is_base64: true,
        }),
    }
}

fn to_rows<T: Serialize>(items: &[T]) -> Result<Vec<Value>, ApiError> {
    items
        .iter()
        .map(|item| serde_json::to_value(item).map_err(|e| ApiError::ExportFailed(e.to_string())))
        .collect()
}

pub fn configure() -> Router<Arc<AppState>> {
    Router::new()
        .route("/export/contacts", post(export_contacts))
        .route("/export/companies", post(export_companies))
        .route("/export/deals", post(export_deals))
        .route("/export/activities", post(export_activities))
        .route("/export/report", post(export_report))
}

async fn export_contacts(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<ExportRequest>,
) -> Result<Json<ExportFile>, ApiError> {
    let rows = match state.read_conn() {
        Some(mut conn) => to_rows(&contacts::service::list(
            &mut conn,
            &Default::default(),
            user.owner_scope(),
        )?)?,
        None => vec![],
    };
    Ok(Json(build_file(
        req.format,
        "contacts_export",
        "Contacts",
        &rows,
        CONTACT_COLUMNS,
    )?))
}

async fn export_companies(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<ExportRequest>,
) -> Result<Json<ExportFile>, ApiError> {
    let rows = match state.read_conn() {
        Some(mut conn) => to_rows(&companies::service::list(
            &mut conn,
            &Default::default(),
            user.owner_scope(),
        )?)?,
        None => vec![],
    };
    Ok(Json(build_file(
        req.format,
        "companies_export",
        "Companies",
        &rows,
        COMPANY_COLUMNS,
    )?))
}

async fn export_deals(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<ExportRequest>,
) -> Result<Json<ExportFile>, ApiError> {
    let rows = match state.read_conn() {
        Some(mut conn) => to_rows(&deals::service::list(
            &mut conn,
            &Default::default(),
            user.owner_scope(),
        )?)?,
        None => vec![],
    };
    Ok(Json(build_file(
        req.format,
        "deals_export",
        "Deals",
        &rows,
        DEAL_COLUMNS,
    )?))
}

async fn export_activities(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<ExportRequest>,
) -> Result<Json<ExportFile>, ApiError> {
    let rows = match state.read_conn() {
        Some(mut conn) => {
            let list =
                activities::service::list(&mut conn, &Default::default(), user.owner_scope())?;
            let now = Utc::now();
            list.iter()
                .map(|activity| {
                    let mut row = serde_json::to_value(activity)
                        .map_err(|e| ApiError::ExportFailed(e.to_string()))?;
                    if let Some(map) = row.as_object_mut() {
                        map.insert(
                            "status".to_string(),
                            Value::String(activity.derived_status(now).to_string()),
                        );
                    }
                    Ok(row)
                })
                .collect::<Result<Vec<_>, ApiError>>()?
        }
        None => vec![],
    };
    Ok(Json(build_file(
        req.format,
        "activities_export",
        "Activities",
        &rows,
        ACTIVITY_COLUMNS,
    )?))
}

async fn export_report(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<ExportRequest>,
) -> Result<Json<ExportFile>, ApiError> {
    let stats = match state.read_conn() {
        Some(mut conn) => dashboard::stats(&mut conn, user.owner_scope())?,
        None => Default::default(),
    };
    let rows = report_rows(&stats);
    Ok(Json(build_file(
        req.format,
        "crm_report",
        "CRM Report",
        &rows,
        REPORT_COLUMNS,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn simple_columns() -> Vec<ExportColumn> {
        vec![
            ExportColumn {
                key: "a",
                header: "A",
                formatter: None,
            },
            ExportColumn {
                key: "b",
                header: "B",
                formatter: None,
            },
        ]
    }

    #[test]
    fn test_empty_csv_is_just_the_quoted_header() {
        let csv = generate_csv(&[], &simple_columns());
        assert_eq!(csv, "\"A\",\"B\"\n");
    }

    #[test]
    fn test_internal_quotes_are_doubled() {
        let rows = vec![json!({ "a": "He said \"hi\"" })];
        let columns = vec![ExportColumn {
            key: "a",
            header: "A",
            formatter: None,
        }];
        let csv = generate_csv(&rows, &columns);
        let body = csv.lines().nth(1).unwrap();
        assert_eq!(body, "\"He said \"\"hi\"\"\"");
    }

    #[test]
    fn test_null_and_missing_render_empty_quotes() {
        let rows = vec![json!({ "a": Value::Null })];
        let csv = generate_csv(&rows, &simple_columns());
        assert_eq!(csv.lines().nth(1).unwrap(), "\"\",\"\"");
    }

    #[test]
    fn test_formatter_runs_before_quoting() {
        let rows = vec![json!({ "a": "2024-03-05T12:30:00Z" })];
        let columns = vec![ExportColumn {
            key: "a",
            header: "Created At",
            formatter: Some(date_only),
        }];
        let csv = generate_csv(&rows, &columns);
        assert_eq!(csv.lines().nth(1).unwrap(), "\"2024-03-05\"");
    }

    #[test]
    fn test_no_trailing_newline_with_data() {
        let rows = vec![json!({ "a": "x", "b": 2 })];
        let csv = generate_csv(&rows, &simple_columns());
        assert!(!csv.ends_with('\n'));
        assert_eq!(csv, "\"A\",\"B\"\n\"x\",\"2\"");
    }

    #[test]
    fn test_xlsx_empty_input_still_yields_a_workbook() {
        let buffer = generate_xlsx(&[], &simple_columns(), "Data").unwrap();
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_xlsx_with_rows() {
        let rows = vec![json!({ "a": "x", "b": 2 })];
        let buffer = generate_xlsx(&rows, &simple_columns(), "Data").unwrap();
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_base64_flag_omitted_for_csv() {
        let file = ExportFile {
            data: "\"A\"\n".to_string(),
            filename: "contacts_export_2024-03-05.csv".to_string(),
            mime_type: "text/csv".to_string(),
            is_base64: false,
        };
        let json = serde_json::to_value(&file).unwrap();
        assert!(json.get("is_base64").is_none());
    }

    #[test]
    fn test_format_parses_from_snake_case() {
        let req: ExportRequest = serde_json::from_str("{\"format\":\"xlsx\"}").unwrap();
        assert_eq!(req.format, ExportFormat::Xlsx);
        assert!(serde_json::from_str::<ExportRequest>("{\"format\":\"pdf\"}").is_err());
    }
}
