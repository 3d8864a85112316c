use crate::adapters::http::create_router;
use crate::core::inference::InferenceService;
use crate::domain::ports::Classifier;
use crate::utils::error::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    let listener = TcpListener::bind((host, port)).await?;
    tracing::info!(address = %listener.local_addr()?, "🚀 Listening");
    Ok(listener)
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<M, F>(
    listener: TcpListener,
    service: Arc<InferenceService<M>>,
    shutdown: F,
) -> Result<()>
where
    M: Classifier + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let started_at = chrono::Utc::now();
    let app = create_router(service);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    let uptime = chrono::Utc::now().signed_duration_since(started_at);
    tracing::info!(uptime_secs = uptime.num_seconds(), "Server shut down cleanly");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received, stopping server gracefully");
}
