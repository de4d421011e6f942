//! Request-Timing Middleware fuer Axum
//!
//! Misst die Antwortzeit jeder HTTP-Anfrage, loggt sie strukturiert und
//! zaehlt sie in den Prometheus-Metriken.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::TraceLayer;

use crate::metrics::RelayMetrics;

/// Tracing-Layer fuer HTTP-Anfragen
pub fn request_timing_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}

/// Axum-Middleware-Funktion: misst Antwortzeit, loggt und zaehlt.
///
/// Als Pfad-Label dient das Routen-Muster (`/room-exists/:room_id`), nicht
/// der konkrete Pfad, damit die Label-Kardinalitaet begrenzt bleibt.
///
/// Verwendung:
/// ```ignore
/// Router::new()
///     .route("/", get(handler))
///     .layer(axum::middleware::from_fn_with_state(metriken, timing_middleware))
/// ```
pub async fn timing_middleware(
    State(metriken): State<RelayMetrics>,
    req: Request,
    next: Next,
) -> Response {
    let methode = req.method().to_string();
    let pfad = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unbekannt".to_string());
    let start = Instant::now();

    let response = next.run(req).await;

    let dauer = start.elapsed();
    let status = response.status().as_u16();

    metriken
        .http_requests_total
        .with_label_values(&[&methode, &pfad, &status.to_string()])
        .inc();
    metriken
        .http_request_duration_seconds
        .with_label_values(&[&methode, &pfad])
        .observe(dauer.as_secs_f64());

    tracing::debug!(
        method = %methode,
        path = %pfad,
        status = status,
        duration_ms = dauer.as_millis() as u64,
        "HTTP-Anfrage abgeschlossen"
    );

    response
}
