//! Console monitor entry point.

use std::sync::Arc;

use coasters_app::config::AppConfig;
use coasters_app::error::AppError;
use coasters_app::infrastructure::Infrastructure;
use coasters_app::shutdown::shutdown_receiver;
use coasters_app::telemetry;
use coasters_core::clock::SystemClock;
use coasters_monitoring::monitor::Monitor;
use coasters_monitoring::problem_log::ProblemLog;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    telemetry::init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        environment = %config.environment,
        notifications_log = %config.notifications_log.display(),
        "Starting monitor"
    );

    let infrastructure = Infrastructure::connect(&config).await?;
    let mut monitor = Monitor::new(
        infrastructure.bus,
        Arc::new(SystemClock),
        ProblemLog::new(config.notifications_log.clone()),
    )
    .with_refresh_interval(config.monitor_refresh)
    .with_retry_delay(config.listener_retry);

    println!("{}", monitor.render());
    monitor.run(shutdown_receiver()).await;
    Ok(())
}
