//! Varchive Server - Main entry point

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::signal;
use tokio::sync::Notify;
use tracing::info;
use varchive_common::logging::{init_logging, LogConfig};

use varchive_server::{api, config::Config, db, features::FeatureState, VariantDbRouter};

#[tokio::main]
async fn main() -> Result<()> {
    let log_config = LogConfig::from_env()?
        .with_file_prefix("varchive-server")
        .with_filter_directives("varchive_server=debug,tower_http=debug,sqlx=info");

    init_logging(&log_config)?;

    info!("Starting Varchive Server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let archive = db::create_archive_pool(&config.archive).await?;

    let variants = VariantDbRouter::from_archive(&archive, &config.variant).await?;
    info!(
        species = variants.species_count(),
        "Variant database router ready"
    );

    let state = FeatureState {
        archive,
        variants: Arc::new(variants),
    };

    let app = api::create_router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // The notify marks the moment a shutdown signal arrived, so the drain
    // window is bounded from the signal, not from server start.
    let signalled = Arc::new(Notify::new());
    let on_signal = Arc::clone(&signalled);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        on_signal.notify_one();
    });

    tokio::select! {
        result = server => {
            result?;
            info!("Server shut down gracefully");
        },
        _ = drain_deadline(signalled, config.server.shutdown_timeout_secs) => {
            tracing::warn!(
                "Drain window of {}s elapsed, closing remaining connections",
                config.server.shutdown_timeout_secs
            );
        },
    }

    Ok(())
}

/// Cap on how long open connections may drain after a shutdown signal
async fn drain_deadline(signalled: Arc<Notify>, timeout_secs: u64) {
    signalled.notified().await;
    tokio::time::sleep(Duration::from_secs(timeout_secs)).await;
}

/// Resolves when a shutdown signal (Ctrl+C or SIGTERM) arrives
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_drain_deadline_starts_at_the_signal() {
        let signalled = Arc::new(Notify::new());
        let deadline = tokio::spawn(drain_deadline(Arc::clone(&signalled), 30));

        // Long past the drain window, but no signal yet: must not fire.
        tokio::time::advance(Duration::from_secs(300)).await;
        tokio::task::yield_now().await;
        assert!(!deadline.is_finished());

        signalled.notify_one();
        tokio::time::advance(Duration::from_secs(30)).await;
        deadline.await.unwrap();
    }
}
