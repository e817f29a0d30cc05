use dotenvy::dotenv;
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crmserver::api_router::configure_api_routes;
use crmserver::config::AppConfig;
use crmserver::email::Mailer;
use crmserver::shared::migration::run_migrations;
use crmserver::shared::state::AppState;
use crmserver::shared::utils::create_conn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();

    let db = match &config.database_url {
        Some(url) => match create_conn(url) {
            Ok(pool) => {
                match pool.get() {
                    Ok(mut conn) => run_migrations(&mut conn)?,
                    Err(e) => warn!("could not run migrations: {e}"),
                }
                Some(pool)
            }
            Err(e) => {
                warn!("could not build database pool, running degraded: {e}");
                None
            }
        },
        None => {
            warn!("DATABASE_URL not set, running degraded: reads empty, writes fail");
            None
        }
    };

    let mailer = Mailer::spawn(config.mail.clone(), db.clone());
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        mailer,
    });

    let app = axum::Router::new()
        .nest("/api", configure_api_routes())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("crmserver listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
