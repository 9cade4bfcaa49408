//! Configuration-change listener entry point.
//!
//! Analyzes every stored coaster once at startup, then re-analyzes each
//! coaster named on `coaster.configuration.changed`.

use std::sync::Arc;

use coasters_analysis::application::analysis_service::CoasterAnalysisService;
use coasters_analysis::application::listener::ConfigurationChangedListener;
use coasters_app::config::AppConfig;
use coasters_app::error::AppError;
use coasters_app::infrastructure::Infrastructure;
use coasters_app::shutdown::shutdown_receiver;
use coasters_app::telemetry;
use coasters_core::clock::SystemClock;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    telemetry::init();

    let config = AppConfig::from_env()?;
    tracing::info!(environment = %config.environment, "Starting configuration listener");

    let infrastructure = Infrastructure::connect(&config).await?;
    let analysis = CoasterAnalysisService::new(infrastructure.bus.clone(), Arc::new(SystemClock));
    let listener = ConfigurationChangedListener::new(
        infrastructure.coaster_repository,
        analysis,
        infrastructure.bus,
    )
    .with_retry_delay(config.listener_retry);

    let shutdown = shutdown_receiver();

    // Catch up on coasters changed while no listener was running.
    match listener.process_all_coasters().await {
        Ok(results) => tracing::info!(coasters = results.len(), "initial analysis complete"),
        Err(e) => tracing::error!(error = %e, "initial analysis failed"),
    }

    listener.listen(shutdown).await;
    Ok(())
}
