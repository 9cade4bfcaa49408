//! Coaster operations API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use coasters_app::config::AppConfig;
use coasters_app::error::AppError;
use coasters_app::infrastructure::Infrastructure;
use coasters_app::shutdown::shutdown_signal;
use coasters_app::state::AppState;
use coasters_app::{build_router, telemetry};
use coasters_core::clock::SystemClock;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    telemetry::init();

    let config = AppConfig::from_env()?;
    tracing::info!(environment = %config.environment, "Starting coaster operations API server");

    let infrastructure = Infrastructure::connect(&config).await?;
    let app_state = AppState::new(Arc::new(SystemClock), infrastructure.coaster_repository);
    let app = build_router(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}
