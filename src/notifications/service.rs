use diesel::dsl::count_star;
use diesel::prelude::*;
use log::info;

use super::types::{FanOut, Notification, NotificationListQuery};
use crate::shared::error::ApiError;
use crate::shared::schema::{notifications, users};

const DEFAULT_LIMIT: i64 = 50;

/// Inserts one notification per user, excluding the actor. Runs inside the
/// caller's request but is not transactional with the triggering mutation.
pub fn create_for_all_users(
    conn: &mut PgConnection,
    fanout: &FanOut,
    actor_id: i32,
) -> Result<usize, ApiError> {
    let user_ids: Vec<i32> = users::table.select(users::id).load(conn)?;
    let rows = fanout.rows_for(&user_ids, actor_id);
    if rows.is_empty() {
        return Ok(0);
    }
    let inserted = diesel::insert_into(notifications::table)
        .values(&rows)
        .execute(conn)?;
    info!("fanned out {} notification(s) for {}", inserted, fanout.kind);
    Ok(inserted)
}

pub fn list(
    conn: &mut PgConnection,
    user_id: i32,
    query: &NotificationListQuery,
) -> Result<Vec<Notification>, ApiError> {
    let mut q = notifications::table
        .filter(notifications::user_id.eq(user_id))
        .into_boxed();
    if query.unread_only.unwrap_or(false) {
        q = q.filter(notifications::is_read.eq(false));
    }
    Ok(q.order(notifications::created_at.desc())
        .limit(query.limit.unwrap_or(DEFAULT_LIMIT))
        .load(conn)?)
}

pub fn unread_count(conn: &mut PgConnection, user_id: i32) -> Result<i64, ApiError> {
    Ok(notifications::table
        .filter(notifications::user_id.eq(user_id))
        .filter(notifications::is_read.eq(false))
        .select(count_star())
        .first(conn)?)
}

pub fn mark_read(conn: &mut PgConnection, id: i32, user_id: i32) -> Result<(), ApiError> {
    diesel::update(
        notifications::table
            .filter(notifications::id.eq(id))
            .filter(notifications::user_id.eq(user_id)),
    )
    .set(notifications::is_read.eq(true))
    .execute(conn)?;
    Ok(())
}

pub fn mark_all_read(conn: &mut PgConnection, user_id: i32) -> Result<(), ApiError> {
    diesel::update(notifications::table.filter(notifications::user_id.eq(user_id)))
        .set(notifications::is_read.eq(true))
        .execute(conn)?;
    Ok(())
}

pub fn delete(conn: &mut PgConnection, id: i32, user_id: i32) -> Result<(), ApiError> {
    diesel::delete(
        notifications::table
            .filter(notifications::id.eq(id))
            .filter(notifications::user_id.eq(user_id)),
    )
    .execute(conn)?;
    Ok(())
}
