use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::schema::companies;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
#[diesel(table_name = companies)]
pub struct Company {
    pub id: i32,
    pub name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub employee_count: Option<i32>,
    pub annual_revenue: Option<BigDecimal>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub owner_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub employee_count: Option<i32>,
    pub annual_revenue: Option<BigDecimal>,
    pub description: Option<String>,
    pub logo: Option<String>,
}

impl CreateCompanyRequest {
    pub fn validate(&self) -> Result<(), crate::shared::error::ApiError> {
        if self.name.trim().is_empty() {
            return Err(crate::shared::error::ApiError::Validation(
                "Company name is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = companies)]
pub struct NewCompany {
    pub name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub employee_count: Option<i32>,
    pub annual_revenue: Option<BigDecimal>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub owner_id: Option<i32>,
}

impl NewCompany {
    pub fn from_request(req: CreateCompanyRequest, owner_id: i32) -> Self {
        Self {
            name: req.name,
            industry: req.industry,
            website: req.website,
            phone: req.phone,
            email: req.email,
            address: req.address,
            city: req.city,
            country: req.country,
            employee_count: req.employee_count,
            annual_revenue: req.annual_revenue,
            description: req.description,
            logo: req.logo,
            owner_id: Some(owner_id),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, AsChangeset)]
#[diesel(table_name = companies)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub employee_count: Option<i32>,
    pub annual_revenue: Option<BigDecimal>,
    pub description: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
    pub industry: Option<String>,
    pub industries: Option<Vec<String>>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
    pub industry: Option<String>,
}

impl From<CompanyQuery> for CompanyListParams {
    fn from(q: CompanyQuery) -> Self {
        Self {
            limit: q.limit,
            offset: q.offset,
            search: q.search,
            industry: q.industry,
            ..Self::default()
        }
    }
}
