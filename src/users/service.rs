use chrono::Utc;
use diesel::prelude::*;

use super::types::{EmailPreferences, EmailPreferencesView, User, UserRole};
use crate::shared::error::ApiError;
use crate::shared::schema::users;

pub fn list_users(conn: &mut PgConnection) -> Result<Vec<User>, ApiError> {
    Ok(users::table
        .order(users::created_at.desc())
        .load(conn)?)
}

pub fn update_role(conn: &mut PgConnection, user_id: i32, role: UserRole) -> Result<(), ApiError> {
    let updated = diesel::update(users::table.find(user_id))
        .set((
            users::role.eq(role.to_string()),
            users::updated_at.eq(Utc::now()),
        ))
        .execute(conn)?;
    if updated == 0 {
        return Err(ApiError::NotFound("User"));
    }
    Ok(())
}

pub fn get_email_preferences(
    conn: &mut PgConnection,
    user_id: i32,
) -> Result<EmailPreferencesView, ApiError> {
    let prefs = users::table
        .find(user_id)
        .select((
            users::email_notify_new_deal,
            users::email_notify_deal_won,
            users::email_notify_deal_lost,
            users::email_notify_overdue,
            users::email_notify_activity_due,
        ))
        .first::<EmailPreferencesView>(conn)
        .optional()?;
    prefs.ok_or(ApiError::NotFound("User"))
}

pub fn update_email_preferences(
    conn: &mut PgConnection,
    user_id: i32,
    prefs: &EmailPreferences,
) -> Result<(), ApiError> {
    // A patch with no fields set is a no-op, not an error.
    if prefs.email_notify_new_deal.is_none()
        && prefs.email_notify_deal_won.is_none()
        && prefs.email_notify_deal_lost.is_none()
        && prefs.email_notify_overdue.is_none()
        && prefs.email_notify_activity_due.is_none()
    {
        return Ok(());
    }
    diesel::update(users::table.find(user_id))
        .set((prefs, users::updated_at.eq(Utc::now())))
        .execute(conn)?;
    Ok(())
}
