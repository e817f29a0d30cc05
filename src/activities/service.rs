use chrono::{DateTime, Duration, Utc};
use diesel::dsl::count_star;
use diesel::pg::Pg;
use diesel::prelude::*;

use super::types::{
    Activity, ActivityChanges, ActivityListParams, ActivityStatus, NewActivity, TypeCount,
};
use crate::shared::error::ApiError;
use crate::shared::schema::activities;

const DEFAULT_LIMIT: i64 = 100;
const REMINDER_LIMIT: i64 = 20;

pub fn filtered(
    params: &ActivityListParams,
    owner_id: Option<i32>,
    now: DateTime<Utc>,
) -> activities::BoxedQuery<'static, Pg> {
    let mut query = activities::table.into_boxed();

    if let Some(kind) = params.kind {
        query = query.filter(activities::kind.eq(kind.to_string()));
    }
    if let Some(types) = &params.types {
        let values: Vec<String> = types.iter().map(|t| t.to_string()).collect();
        query = query.filter(activities::kind.eq_any(values));
    }
    if let Some(contact_id) = params.contact_id {
        query = query.filter(activities::contact_id.eq(contact_id));
    }
    if let Some(company_id) = params.company_id {
        query = query.filter(activities::company_id.eq(company_id));
    }
    if let Some(deal_id) = params.deal_id {
        query = query.filter(activities::deal_id.eq(deal_id));
    }
    if let Some(done) = params.is_completed {
        query = query.filter(activities::is_completed.eq(done));
    }
    // Derived status. An incomplete activity with no due date matches
    // neither pending nor overdue.
    match params.status {
        Some(ActivityStatus::Completed) => {
            query = query.filter(activities::is_completed.eq(true));
        }
        Some(ActivityStatus::Pending) => {
            query = query
                .filter(activities::is_completed.eq(false))
                .filter(activities::due_date.ge(now));
        }
        Some(ActivityStatus::Overdue) => {
            query = query
                .filter(activities::is_completed.eq(false))
                .filter(activities::due_date.lt(now));
        }
        None => {}
    }
    if let Some(from) = params.date_from {
        query = query.filter(activities::due_date.ge(from));
    }
    if let Some(to) = params.date_to {
        query = query.filter(activities::due_date.le(to));
    }
    if let Some(owner) = owner_id {
        query = query.filter(activities::owner_id.eq(owner));
    }
    query
}

pub fn paged(
    params: &ActivityListParams,
    owner_id: Option<i32>,
    now: DateTime<Utc>,
) -> activities::BoxedQuery<'static, Pg> {
    filtered(params, owner_id, now)
        .order(activities::created_at.desc())
        .limit(params.limit.unwrap_or(DEFAULT_LIMIT))
        .offset(params.offset.unwrap_or(0))
}

pub fn list(
    conn: &mut PgConnection,
    params: &ActivityListParams,
    owner_id: Option<i32>,
) -> Result<Vec<Activity>, ApiError> {
    Ok(paged(params, owner_id, Utc::now()).load(conn)?)
}

pub fn count(
    conn: &mut PgConnection,
    is_completed: Option<bool>,
    owner_id: Option<i32>,
) -> Result<i64, ApiError> {
    let mut query = activities::table.select(count_star()).into_boxed();
    if let Some(done) = is_completed {
        query = query.filter(activities::is_completed.eq(done));
    }
    if let Some(owner) = owner_id {
        query = query.filter(activities::owner_id.eq(owner));
    }
    Ok(query.first(conn)?)
}

pub fn count_by_type(
    conn: &mut PgConnection,
    owner_id: Option<i32>,
) -> Result<Vec<TypeCount>, ApiError> {
    let mut query = activities::table
        .group_by(activities::kind)
        .select((activities::kind, count_star()))
        .into_boxed();
    if let Some(owner) = owner_id {
        query = query.filter(activities::owner_id.eq(owner));
    }
    Ok(query.load(conn)?)
}

pub fn recent(conn: &mut PgConnection, limit: i64, owner_id: Option<i32>) -> Result<Vec<Activity>, ApiError> {
    let mut query = activities::table.into_boxed();
    if let Some(owner) = owner_id {
        query = query.filter(activities::owner_id.eq(owner));
    }
    Ok(query
        .order(activities::created_at.desc())
        .limit(limit)
        .load(conn)?)
}

/// Incomplete activities due up to the end of tomorrow, soonest first.
pub fn upcoming(conn: &mut PgConnection, user_id: i32) -> Result<Vec<Activity>, ApiError> {
    let horizon = (Utc::now() + Duration::days(1))
        .date_naive()
        .and_hms_opt(23, 59, 59)
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now);
    Ok(activities::table
        .filter(activities::owner_id.eq(user_id))
        .filter(activities::is_completed.eq(false))
        .filter(activities::due_date.is_not_null())
        .filter(activities::due_date.le(horizon))
        .order(activities::due_date.asc())
        .limit(REMINDER_LIMIT)
        .load(conn)?)
}

/// Incomplete activities whose due date has passed, soonest first.
pub fn overdue(conn: &mut PgConnection, user_id: i32) -> Result<Vec<Activity>, ApiError> {
    Ok(activities::table
        .filter(activities::owner_id.eq(user_id))
        .filter(activities::is_completed.eq(false))
        .filter(activities::due_date.is_not_null())
        .filter(activities::due_date.lt(Utc::now()))
        .order(activities::due_date.asc())
        .limit(REMINDER_LIMIT)
        .load(conn)?)
}

pub fn get(conn: &mut PgConnection, id: i32) -> Result<Activity, ApiError> {
    activities::table
        .find(id)
        .first(conn)
        .optional()?
        .ok_or(ApiError::NotFound("Activity"))
}

pub fn create(conn: &mut PgConnection, new: NewActivity) -> Result<Activity, ApiError> {
    Ok(diesel::insert_into(activities::table)
        .values(new)
        .get_result(conn)?)
}

pub fn update(
    conn: &mut PgConnection,
    id: i32,
    changes: ActivityChanges,
) -> Result<Activity, ApiError> {
    diesel::update(activities::table.find(id))
        .set((changes, activities::updated_at.eq(Utc::now())))
        .get_result(conn)
        .optional()?
        .ok_or(ApiError::NotFound("Activity"))
}

pub fn complete(conn: &mut PgConnection, id: i32) -> Result<Activity, ApiError> {
    let now = Utc::now();
    diesel::update(activities::table.find(id))
        .set((
            activities::is_completed.eq(true),
            activities::completed_at.eq(now),
            activities::updated_at.eq(now),
        ))
        .get_result(conn)
        .optional()?
        .ok_or(ApiError::NotFound("Activity"))
}

pub fn delete(conn: &mut PgConnection, id: i32) -> Result<(), ApiError> {
    let deleted = diesel::delete(activities::table.find(id)).execute(conn)?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Activity"));
    }
    Ok(())
}
