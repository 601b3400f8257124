pub mod api;
pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
pub use config::Config;
use config::GeneralConfig;
use state::SharedState;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run(config: Config) -> anyhow::Result<()> {
    init_tracing(&config.general)?;
    config.log_load_report();
    config.validate()?;

    info!("City Explorer v{} starting...", env!("CARGO_PKG_VERSION"));

    let shared = Arc::new(SharedState::new(&config).await?);
    let app = api::router(api::create_app_state(shared.clone()));

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("App is listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    shared.store.clone().close().await?;
    info!("Server stopped");

    Ok(())
}

fn init_tracing(general: &GeneralConfig) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if general.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }

    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Error listening for shutdown: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
