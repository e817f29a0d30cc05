pub mod activities;
pub mod api_router;
pub mod auth;
pub mod companies;
pub mod config;
pub mod contacts;
pub mod dashboard;
pub mod deals;
pub mod email;
pub mod export;
pub mod notifications;
pub mod shared;
pub mod tags;
pub mod users;
