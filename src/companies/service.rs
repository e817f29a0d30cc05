use chrono::Utc;
use diesel::dsl::count_star;
use diesel::pg::Pg;
use diesel::prelude::*;

use super::types::{Company, CompanyChanges, CompanyListParams, NewCompany};
use crate::shared::error::ApiError;
use crate::shared::schema::companies;

const DEFAULT_LIMIT: i64 = 100;

pub fn filtered(
    params: &CompanyListParams,
    owner_id: Option<i32>,
) -> companies::BoxedQuery<'static, Pg> {
    let mut query = companies::table.into_boxed();

    if let Some(search) = &params.search {
        let pattern = format!("%{}%", search);
        query = query.filter(
            companies::name
                .ilike(pattern.clone())
                .or(companies::industry.ilike(pattern)),
        );
    }
    if let Some(industry) = &params.industry {
        query = query.filter(companies::industry.eq(industry.clone()));
    }
    if let Some(industries) = &params.industries {
        query = query.filter(companies::industry.eq_any(industries.clone()));
    }
    if let Some(from) = params.date_from {
        query = query.filter(companies::created_at.ge(from));
    }
    if let Some(to) = params.date_to {
        query = query.filter(companies::created_at.le(to));
    }
    if let Some(owner) = owner_id {
        query = query.filter(companies::owner_id.eq(owner));
    }
    query
}

pub fn paged(
    params: &CompanyListParams,
    owner_id: Option<i32>,
) -> companies::BoxedQuery<'static, Pg> {
    filtered(params, owner_id)
        .order(companies::created_at.desc())
        .limit(params.limit.unwrap_or(DEFAULT_LIMIT))
        .offset(params.offset.unwrap_or(0))
}

pub fn list(
    conn: &mut PgConnection,
    params: &CompanyListParams,
    owner_id: Option<i32>,
) -> Result<Vec<Company>, ApiError> {
    Ok(paged(params, owner_id).load(conn)?)
}

pub fn count(conn: &mut PgConnection, owner_id: Option<i32>) -> Result<i64, ApiError> {
    let mut query = companies::table.select(count_star()).into_boxed();
    if let Some(owner) = owner_id {
        query = query.filter(companies::owner_id.eq(owner));
    }
    Ok(query.first(conn)?)
}

pub fn get(conn: &mut PgConnection, id: i32) -> Result<Company, ApiError> {
    companies::table
        .find(id)
        .first(conn)
        .optional()?
        .ok_or(ApiError::NotFound("Company"))
}

pub fn create(conn: &mut PgConnection, new: NewCompany) -> Result<Company, ApiError> {
    Ok(diesel::insert_into(companies::table)
        .values(new)
        .get_result(conn)?)
}

pub fn update(
    conn: &mut PgConnection,
    id: i32,
    changes: CompanyChanges,
) -> Result<Company, ApiError> {
    diesel::update(companies::table.find(id))
        .set((changes, companies::updated_at.eq(Utc::now())))
        .get_result(conn)
        .optional()?
        .ok_or(ApiError::NotFound("Company"))
}

pub fn delete(conn: &mut PgConnection, id: i32) -> Result<(), ApiError> {
    let deleted = diesel::delete(companies::table.find(id)).execute(conn)?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Company"));
    }
    Ok(())
}
