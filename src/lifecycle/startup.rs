//! Startup orchestration.

use std::net::SocketAddr;

use metrics_exporter_prometheus::BuildError;
use tokio::net::TcpListener;

use crate::config::{ListenerConfig, ObservabilityConfig};
use crate::observability::metrics;

/// Fatal startup failures.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("invalid metrics address `{0}`")]
    MetricsAddress(String),
}

/// Bind the service listener.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, StartupError> {
    let listener = TcpListener::bind(&config.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.bind_address.clone(),
            source,
        })?;

    if let Ok(addr) = listener.local_addr() {
        tracing::info!(address = %addr, "Listening for connections");
    }
    Ok(listener)
}

/// Start the metrics exporter when enabled.
pub fn init_metrics(config: &ObservabilityConfig) -> Result<(), StartupError> {
    if !config.metrics_enabled {
        return Ok(());
    }
    let addr: SocketAddr = config
        .metrics_address
        .parse()
        .map_err(|_| StartupError::MetricsAddress(config.metrics_address.clone()))?;
    metrics::init_metrics(addr)?;
    Ok(())
}
