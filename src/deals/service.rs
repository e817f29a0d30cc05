use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::dsl::{count_star, sum};
use diesel::pg::Pg;
use diesel::prelude::*;

use super::types::{Deal, DealChanges, DealListParams, NewDeal, PipelineStat};
use crate::shared::error::ApiError;
use crate::shared::schema::{activities, deals, notifications};

const DEFAULT_LIMIT: i64 = 100;

pub fn filtered(
    params: &DealListParams,
    owner_id: Option<i32>,
) -> deals::BoxedQuery<'static, Pg> {
    let mut query = deals::table.into_boxed();

    if let Some(stage) = params.stage {
        query = query.filter(deals::stage.eq(stage.to_string()));
    }
    if let Some(stages) = &params.stages {
        let values: Vec<String> = stages.iter().map(|s| s.to_string()).collect();
        query = query.filter(deals::stage.eq_any(values));
    }
    if let Some(min) = &params.value_min {
        query = query.filter(deals::value.ge(min.clone()));
    }
    if let Some(max) = &params.value_max {
        query = query.filter(deals::value.le(max.clone()));
    }
    if let Some(from) = params.date_from {
        query = query.filter(deals::created_at.ge(from));
    }
    if let Some(to) = params.date_to {
        query = query.filter(deals::created_at.le(to));
    }
    if let Some(owner) = owner_id {
        query = query.filter(deals::owner_id.eq(owner));
    }
    query
}

pub fn paged(params: &DealListParams, owner_id: Option<i32>) -> deals::BoxedQuery<'static, Pg> {
    filtered(params, owner_id)
        .order(deals::created_at.desc())
        .limit(params.limit.unwrap_or(DEFAULT_LIMIT))
        .offset(params.offset.unwrap_or(0))
}

pub fn list(
    conn: &mut PgConnection,
    params: &DealListParams,
    owner_id: Option<i32>,
) -> Result<Vec<Deal>, ApiError> {
    Ok(paged(params, owner_id).load(conn)?)
}

pub fn count(conn: &mut PgConnection, owner_id: Option<i32>) -> Result<i64, ApiError> {
    let mut query = deals::table.select(count_star()).into_boxed();
    if let Some(owner) = owner_id {
        query = query.filter(deals::owner_id.eq(owner));
    }
    Ok(query.first(conn)?)
}

pub fn pipeline_stats(
    conn: &mut PgConnection,
    owner_id: Option<i32>,
) -> Result<Vec<PipelineStat>, ApiError> {
    let mut query = deals::table
        .group_by(deals::stage)
        .select((deals::stage, count_star(), sum(deals::value)))
        .into_boxed();
    if let Some(owner) = owner_id {
        query = query.filter(deals::owner_id.eq(owner));
    }
    let rows: Vec<(String, i64, Option<BigDecimal>)> = query.load(conn)?;
    Ok(rows
        .into_iter()
        .map(|(stage, count, total)| PipelineStat {
            stage,
            count,
            total_value: total
                .map(|v| v.to_string())
                .unwrap_or_else(|| "0".to_string()),
        })
        .collect())
}

pub fn get(conn: &mut PgConnection, id: i32) -> Result<Deal, ApiError> {
    deals::table
        .find(id)
        .first(conn)
        .optional()?
        .ok_or(ApiError::NotFound("Deal"))
}

pub fn create(conn: &mut PgConnection, new: NewDeal) -> Result<Deal, ApiError> {
    Ok(diesel::insert_into(deals::table)
        .values(new)
        .get_result(conn)?)
}

pub fn update(conn: &mut PgConnection, id: i32, changes: DealChanges) -> Result<Deal, ApiError> {
    diesel::update(deals::table.find(id))
        .set((changes, deals::updated_at.eq(Utc::now())))
        .get_result(conn)
        .optional()?
        .ok_or(ApiError::NotFound("Deal"))
}

/// Detaches dependent activities and notifications before removing the deal
/// row, so nothing cascades.
pub fn delete(conn: &mut PgConnection, id: i32) -> Result<(), ApiError> {
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::update(notifications::table.filter(notifications::related_deal_id.eq(id)))
            .set(notifications::related_deal_id.eq(None::<i32>))
            .execute(conn)?;
        diesel::update(activities::table.filter(activities::deal_id.eq(id)))
            .set(activities::deal_id.eq(None::<i32>))
            .execute(conn)?;
        diesel::delete(deals::table.find(id)).execute(conn)?;
        Ok(())
    })?;
    Ok(())
}
