//! Process shutdown signal

use std::future::Future;
use tracing::info;

/// Registers the interrupt (and, on unix, terminate) handlers immediately and
/// returns a future that resolves on the first signal. Signals that arrive
/// before the future is first polled are not lost.
#[cfg(unix)]
pub fn install_shutdown_handler() -> std::io::Result<impl Future<Output = ()> + Send + 'static> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => info!("📛 Received shutdown signal (Ctrl+C)..."),
            _ = terminate.recv() => info!("📛 Received shutdown signal (SIGTERM)..."),
        }
    })
}

#[cfg(not(unix))]
pub fn install_shutdown_handler() -> std::io::Result<impl Future<Output = ()> + Send + 'static> {
    use tracing::error;

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("📛 Received shutdown signal (Ctrl+C)...");
                let _ = shutdown_tx.send(());
            }
            Err(e) => {
                error!("Failed to listen for Ctrl+C: {}", e);
                // the sender stays alive here, so the keeper keeps running
                std::future::pending::<()>().await;
            }
        }
    });

    Ok(async move {
        let _ = shutdown_rx.await;
    })
}
