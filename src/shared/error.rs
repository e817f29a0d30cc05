use axum::http::StatusCode;
use axum::response::IntoResponse;
use log::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Authentication required")]
    Unauthorized,
    #[error("Admin access required")]
    Forbidden,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Database not available")]
    DatabaseUnavailable,
    #[error("Database error")]
    Database(#[from] diesel::result::Error),
    #[error("Connection pool error")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("Export failed: {0}")]
    ExportFailed(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(e) => {
                error!("Database error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Pool(e) => {
                error!("Connection pool error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::ExportFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_is_literal() {
        assert_eq!(ApiError::NotFound("Contact").to_string(), "Contact not found");
        assert_eq!(ApiError::NotFound("Deal").to_string(), "Deal not found");
    }

    #[test]
    fn test_forbidden_message() {
        assert_eq!(ApiError::Forbidden.to_string(), "Admin access required");
    }

    // A storage failure inside a mutation (including its notification
    // inserts) aborts that request with a 500; it is never downgraded.
    #[test]
    fn test_storage_failure_surfaces_as_500() {
        let resp = ApiError::Database(diesel::result::Error::BrokenTransactionManager)
            .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
