//! Contact book entry-point: applies migrations, seeds the admin account and
//! serves the HTML pages.

mod server;

use std::path::Path;
use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use contact_book::domain::ports::PasswordHasher;
use contact_book::domain::{SeedOutcome, Username};
use contact_book::inbound::http::health::HealthState;
use contact_book::inbound::http::session_config::fingerprint::key_fingerprint;
use contact_book::inbound::http::session_config::{BuildMode, session_settings_from_env};
use contact_book::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use contact_book::outbound::security::Argon2PasswordHasher;
use contact_book::settings::AppSettings;

use server::state_builders::{build_http_state, seed_admin};
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
    let bind_addr = settings.bind_addr()?;
    let database_path = settings.database_path();
    let pool_size = settings.pool_size()?;
    info!(
        bind_addr = %bind_addr,
        database_path = %database_path.display(),
        pool_size,
        admin_username = settings.admin_username(),
        "settings loaded"
    );

    let database_url = prepare_database_file(database_path)?;
    let applied = run_pending_migrations(&database_url)
        .await
        .wrap_err("failed to apply migrations")?;
    info!(applied, "migrations applied");

    let pool = DbPool::new(PoolConfig::new(database_url.clone()).with_max_size(pool_size))
        .await
        .wrap_err("failed to build connection pool")?;

    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::default());
    let admin = Username::new(settings.admin_username()).wrap_err("invalid admin username")?;
    match seed_admin(&pool, hasher.clone(), &admin, settings.admin_password())
        .await
        .wrap_err("failed to seed admin user")?
    {
        SeedOutcome::Created(id) => info!(user_id = %id, username = %admin, "admin user created"),
        SeedOutcome::AlreadyPresent(id) => {
            info!(user_id = %id, username = %admin, "admin user already present");
        }
    }

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        ttl_minutes = session.ttl.num_minutes(),
        "session key loaded"
    );

    let http_state = build_http_state(&pool, hasher, Arc::new(DefaultClock), session.ttl);
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(
            session.key,
            session.cookie_secure,
            session.same_site,
            bind_addr,
            http_state,
        ),
    )?;

    health_state.mark_ready();
    info!(bind_addr = %bind_addr, "listening");
    server.await?;
    Ok(())
}

/// Create the database's parent directory and return the path as a URL.
fn prepare_database_file(path: &Path) -> Result<String> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }
    path.to_str()
        .map(str::to_owned)
        .ok_or_else(|| eyre!("database path {} is not valid UTF-8", path.display()))
}
