use crate::config::AppConfig;
use crate::email::Mailer;
use crate::shared::error::ApiError;
use crate::shared::utils::{DbConn, DbPool};
use log::warn;

/// Shared handler state. The pool is built once at startup and injected;
/// `None` means the service runs in degraded mode (no DATABASE_URL or the
/// pool could not be built): reads return empty defaults, writes fail.
pub struct AppState {
    pub config: AppConfig,
    pub db: Option<DbPool>,
    pub mailer: Mailer,
}

impl AppState {
    /// Connection for a write path. No configured store is an error the
    /// caller must surface.
    pub fn write_conn(&self) -> Result<DbConn, ApiError> {
        let pool = self.db.as_ref().ok_or(ApiError::DatabaseUnavailable)?;
        Ok(pool.get()?)
    }

    /// Connection for a read path. An unconfigured or unreachable store
    /// degrades to `None` so list/count handlers can answer with empty
    /// defaults instead of erroring.
    pub fn read_conn(&self) -> Option<DbConn> {
        let pool = self.db.as_ref()?;
        match pool.get() {
            Ok(conn) => Some(conn),
            Err(e) => {
                warn!("Database unavailable for read, returning empty result: {e}");
                None
            }
        }
    }
}
