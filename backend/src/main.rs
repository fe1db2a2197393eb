//! Backend entry-point: loads settings, prepares storage and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pantry::inbound::http::health::HealthState;
use pantry::outbound::persistence::{DbPool, run_migrations};
use pantry::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    info!(?settings, "settings loaded");

    let mut config = ServerConfig::new(settings.bind_addr().wrap_err("invalid bind address")?);
    if let Some(pool_config) = settings.pool_config() {
        if settings.run_migrations() {
            let url = pool_config.database_url().to_owned();
            let applied = tokio::task::spawn_blocking(move || run_migrations(&url))
                .await
                .wrap_err("migration task panicked")??;
            info!(applied, "database schema up to date");
        }
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    } else {
        info!("no database configured; records are kept in memory");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    health_state.mark_ready();
    info!("server ready");
    server.await?;
    Ok(())
}
