//! Backend entry-point: loads settings, prepares persistence, seeds master
//! data and serves the REST API.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use recruit_admin::inbound::http::health::HealthState;
use recruit_admin::inbound::http::session_config::{BuildMode, session_settings_from_env};
use recruit_admin::master_data::{MasterDataSettings, SeedTarget, seed_master_data_on_startup};
use recruit_admin::outbound::memory::MemoryStore;
use recruit_admin::outbound::password::Argon2PasswordHasher;
use recruit_admin::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use recruit_admin::server::{ServerConfig, create_server};
use recruit_admin::settings::ServerSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let environment = settings.environment().map_err(io::Error::other)?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;

    let db_pool = match settings.database_url() {
        Some(url) => Some(connect(url, &settings).await?),
        None => None,
    };

    let memory_store = MemoryStore::new();
    let master_data = MasterDataSettings::load().map_err(io::Error::other)?;
    let target = match &db_pool {
        Some(pool) => SeedTarget::Database(pool),
        None => SeedTarget::Memory(&memory_store),
    };
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    seed_master_data_on_startup(
        &master_data,
        environment,
        target,
        Arc::new(Argon2PasswordHasher::new()),
        clock,
    )
    .await
    .map_err(io::Error::other)?;

    let mut health_state = HealthState::new();
    let mut config = ServerConfig::new(session, bind_addr).with_memory_store(memory_store);
    if let Some(pool) = db_pool {
        health_state = health_state.with_database(pool.clone());
        config = config.with_db_pool(pool);
    }

    info!(%environment, database = config.has_database(), "starting recruit-admin");
    create_server(web::Data::new(health_state), config)?.await
}

async fn connect(url: &str, settings: &ServerSettings) -> io::Result<DbPool> {
    if settings.run_migrations {
        run_pending_migrations(url)
            .await
            .map_err(io::Error::other)?;
    }
    let pool_size = settings.pool_size().map_err(io::Error::other)?;
    DbPool::new(PoolConfig::new(url).with_max_size(pool_size))
        .await
        .map_err(io::Error::other)
}
