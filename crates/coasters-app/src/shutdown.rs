//! Process shutdown signalling.

use tokio::sync::broadcast;

/// Completes on Ctrl+C or, on Unix, SIGTERM.
///
/// If a handler cannot be installed the error is logged and that signal
/// source is ignored.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

/// Returns a receiver that fires once [`shutdown_signal`] completes.
///
/// Must be called from within a tokio runtime.
#[must_use]
pub fn shutdown_receiver() -> broadcast::Receiver<()> {
    let (tx, rx) = broadcast::channel(1);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = tx.send(());
    });
    rx
}
