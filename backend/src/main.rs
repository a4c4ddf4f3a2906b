//! Backend entry-point: loads settings, prepares storage and runs the HTTP
//! server.

mod server;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use laundry_backend::inbound::http::health::HealthState;
use laundry_backend::outbound::persistence::{DbPool, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let origins = settings
        .allowed_origins()
        .wrap_err("invalid cors_origin setting")?;
    let mut config = ServerConfig::new(settings.bind_addr(), settings.email_policy())
        .with_allowed_origins(origins);

    match settings.pool_config() {
        Some(pool_config) => {
            if settings.run_migrations {
                let url = pool_config.database_url().to_owned();
                let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
                    .await
                    .wrap_err("migration task panicked")??;
                info!(applied, "database migrations applied");
            }
            let pool = DbPool::new(pool_config)
                .await
                .wrap_err("failed to build database pool")?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; data is kept in memory"),
    }

    info!(addr = %settings.bind_addr(), "starting HTTP server");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await?;
    Ok(())
}
