//! Health-Check-Endpunkt fuer Treffpunkt
//!
//! Endpoint: `GET /health`
//! Response: JSON mit Status, Version, Uptime sowie Raum- und Verbindungszahl

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Liefert Laufzeitzahlen fuer den Health-Check
///
/// Wird vom Signaling-Zustand implementiert, damit dieses Crate keine
/// Abhaengigkeit auf die Signaling-Typen braucht.
pub trait StatistikQuelle: Send + Sync + 'static {
    fn raum_anzahl(&self) -> usize;
    fn verbindungs_anzahl(&self) -> usize;
}

/// Status des Health-Checks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Antwort des Health-Check-Endpunkts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub rooms: usize,
    pub connections: usize,
}

/// Geteilter Zustand fuer den Health-Check-Handler
#[derive(Clone)]
struct HealthState {
    start_time: Instant,
    quelle: Arc<dyn StatistikQuelle>,
}

/// Axum-Router fuer den `/health`-Endpunkt
pub fn health_router(quelle: Arc<dyn StatistikQuelle>) -> Router {
    let state = HealthState {
        start_time: Instant::now(),
        quelle,
    };
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

/// `GET /health` – gibt den Serverstatus zurueck
async fn health_handler(State(state): State<HealthState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        rooms: state.quelle.raum_anzahl(),
        connections: state.quelle.verbindungs_anzahl(),
    };

    (StatusCode::OK, Json(response))
}
