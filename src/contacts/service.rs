use chrono::Utc;
use diesel::dsl::count_star;
use diesel::pg::Pg;
use diesel::prelude::*;

use super::types::{
    Contact, ContactChanges, ContactListParams, NewContact, StatusCount,
};
use crate::shared::error::ApiError;
use crate::shared::schema::contacts;

const DEFAULT_LIMIT: i64 = 100;

/// Builds the shared predicate set for list queries. Every filter is
/// optional; present ones are ANDed together.
pub fn filtered(
    params: &ContactListParams,
    owner_id: Option<i32>,
) -> contacts::BoxedQuery<'static, Pg> {
    let mut query = contacts::table.into_boxed();

    if let Some(search) = &params.search {
        let pattern = format!("%{}%", search);
        query = query.filter(
            contacts::first_name
                .ilike(pattern.clone())
                .or(contacts::last_name.ilike(pattern.clone()))
                .or(contacts::email.ilike(pattern)),
        );
    }
    if let Some(status) = params.status {
        query = query.filter(contacts::status.eq(status.to_string()));
    }
    if let Some(statuses) = &params.statuses {
        let values: Vec<String> = statuses.iter().map(|s| s.to_string()).collect();
        query = query.filter(contacts::status.eq_any(values));
    }
    if let Some(sources) = &params.sources {
        query = query.filter(contacts::source.eq_any(sources.clone()));
    }
    if let Some(from) = params.date_from {
        query = query.filter(contacts::created_at.ge(from));
    }
    if let Some(to) = params.date_to {
        query = query.filter(contacts::created_at.le(to));
    }
    if let Some(owner) = owner_id {
        query = query.filter(contacts::owner_id.eq(owner));
    }
    query
}

/// The full list statement: filters, newest-first ordering, pagination.
pub fn paged(
    params: &ContactListParams,
    owner_id: Option<i32>,
) -> contacts::BoxedQuery<'static, Pg> {
    filtered(params, owner_id)
        .order(contacts::created_at.desc())
        .limit(params.limit.unwrap_or(DEFAULT_LIMIT))
        .offset(params.offset.unwrap_or(0))
}

pub fn list(
    conn: &mut PgConnection,
    params: &ContactListParams,
    owner_id: Option<i32>,
) -> Result<Vec<Contact>, ApiError> {
    Ok(paged(params, owner_id).load(conn)?)
}

pub fn count(
    conn: &mut PgConnection,
    status: Option<String>,
    owner_id: Option<i32>,
) -> Result<i64, ApiError> {
    let mut query = contacts::table.select(count_star()).into_boxed();
    if let Some(status) = status {
        query = query.filter(contacts::status.eq(status));
    }
    if let Some(owner) = owner_id {
        query = query.filter(contacts::owner_id.eq(owner));
    }
    Ok(query.first(conn)?)
}

pub fn count_by_status(
    conn: &mut PgConnection,
    owner_id: Option<i32>,
) -> Result<Vec<StatusCount>, ApiError> {
    let mut query = contacts::table
        .group_by(contacts::status)
        .select((contacts::status, count_star()))
        .into_boxed();
    if let Some(owner) = owner_id {
        query = query.filter(contacts::owner_id.eq(owner));
    }
    Ok(query.load(conn)?)
}

pub fn get(conn: &mut PgConnection, id: i32) -> Result<Contact, ApiError> {
    contacts::table
        .find(id)
        .first(conn)
        .optional()?
        .ok_or(ApiError::NotFound("Contact"))
}

pub fn create(conn: &mut PgConnection, new: NewContact) -> Result<Contact, ApiError> {
    Ok(diesel::insert_into(contacts::table)
        .values(new)
        .get_result(conn)?)
}

pub fn update(
    conn: &mut PgConnection,
    id: i32,
    changes: ContactChanges,
) -> Result<Contact, ApiError> {
    diesel::update(contacts::table.find(id))
        .set((changes, contacts::updated_at.eq(Utc::now())))
        .get_result(conn)
        .optional()?
        .ok_or(ApiError::NotFound("Contact"))
}

pub fn delete(conn: &mut PgConnection, id: i32) -> Result<(), ApiError> {
    let deleted = diesel::delete(contacts::table.find(id)).execute(conn)?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Contact"));
    }
    Ok(())
}
