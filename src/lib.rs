pub mod config;
pub mod demo;
pub mod error;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod render;
pub mod server;
pub mod validation;

pub use config::{CliArgs, ServerConfig};
pub use demo::{DemoId, DemoReport, run_demo};
pub use error::{ApiError, ErrorCode};
pub use logging::{LoggingConfig, init_logging};
pub use server::{AppState, build_router};

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;

pub async fn run_server(config: ServerConfig) -> Result<()> {
    config.validate()?;

    let bind_addr = config.http_bind_address;
    let demo_path = config.demo_path.clone();
    let json_api = config.json_api;

    let state = Arc::new(AppState::new(config).context("failed to build the demo validator")?);
    let router = build_router(state);

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    let actual_addr = listener.local_addr()?;
    tracing::info!(
        bind = %actual_addr,
        demo_path = %demo_path,
        json_api,
        "listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await
        .map_err(anyhow::Error::from)?;

    tracing::info!("server stopped");
    Ok(())
}
