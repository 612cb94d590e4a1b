//! rms_server: REST server for the RMS rating management system.
//!
//! Configuration is read from the environment (optionally seeded from a
//! `.env` file); see `rms_server::config` for the variables.

use anyhow::{anyhow, Context};
use log::{info, warn};
use rms_server::{build_router, AppState, Database, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    rms_core::init_logging(&config.log_level, config.log_dir.as_deref())
        .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;
    info!(
        "event=config_load module=server status=ok dotenv={}",
        dotenv_loaded
    );

    let db = Database::open(&config.database).context("failed to open database")?;
    let state = AppState::new(db, &config.api_prefix);
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(
        "event=server_start module=server status=ok bind_addr={} api_prefix={} core_version={}",
        config.bind_addr,
        config.api_prefix,
        rms_core::core_version()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=shutdown_signal module=server status=error error={err}");
        // Without a signal handler, run until the process is killed.
        std::future::pending::<()>().await;
    }
}
