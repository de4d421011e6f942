//! # treffpunkt-observability
//!
//! Observability-Crate fuer Treffpunkt:
//! - Prometheus-kompatible Metriken (`/metrics`)
//! - Health-Check-Endpunkt (`/health`)
//! - Structured Logging via tracing-subscriber
//! - Request-Timing Middleware

pub mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;

pub use health::{health_router, HealthResponse, HealthStatus, StatistikQuelle};
pub use logging::logging_initialisieren;
pub use metrics::{metrics_router, RelayMetrics};
pub use middleware::{request_timing_layer, timing_middleware};

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::watch;

/// Startet den Observability-HTTP-Server (Metriken + Health)
///
/// Endpunkte:
/// - `GET /metrics` – Prometheus scrape format
/// - `GET /health`  – Health-Check JSON
///
/// Laeuft bis `shutdown_rx` auf `true` springt.
pub async fn observability_server_starten(
    bind_addr: SocketAddr,
    metriken: RelayMetrics,
    quelle: Arc<dyn StatistikQuelle>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> Result<()> {
    use axum::Router;

    let app = Router::new()
        .merge(metrics_router(metriken))
        .merge(health_router(quelle))
        .layer(request_timing_layer());

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Observability-Server gestartet");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.wait_for(|aktiv| *aktiv).await;
        })
        .await?;

    tracing::info!("Observability-Server beendet");
    Ok(())
}
