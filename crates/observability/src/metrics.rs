//! Prometheus-kompatible Metriken fuer Treffpunkt
//!
//! Registrierte Metriken:
//! - `treffpunkt_connections_active` – Gauge: Offene WebSocket-Verbindungen
//! - `treffpunkt_rooms_active` – Gauge: Existierende Raeume
//! - `treffpunkt_participants_active` – Gauge: Teilnehmer in Raeumen
//! - `treffpunkt_events_received_total` – Counter: Eingehende Events (event)
//! - `treffpunkt_events_sent_total` – Counter: Zugestellte Events (event)
//! - `treffpunkt_events_dropped_total` – Counter: Verworfene Zustellungen
//! - `treffpunkt_chat_messages_total` – Counter: Angenommene Chat-Nachrichten
//! - `treffpunkt_http_requests_total` – Counter: HTTP-Anfragen (method, path, status)
//! - `treffpunkt_http_request_duration_seconds` – Histogram: HTTP-Antwortzeit

use anyhow::Result;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;

/// Alle Treffpunkt-Prometheus-Metriken
///
/// Clone teilt die Registry und alle Metrik-Handles.
#[derive(Clone)]
pub struct RelayMetrics {
    pub registry: Arc<Registry>,

    // Zustand
    pub connections_active: IntGauge,
    pub rooms_active: IntGauge,
    pub participants_active: IntGauge,

    // Events
    pub events_received_total: IntCounterVec,
    pub events_sent_total: IntCounterVec,
    pub events_dropped_total: IntCounter,
    pub chat_messages_total: IntCounter,

    // HTTP
    pub http_requests_total: IntCounterVec,
    pub http_request_duration_seconds: HistogramVec,
}

impl RelayMetrics {
    /// Erstellt und registriert alle Metriken in einer neuen Registry
    pub fn neu() -> Result<Self> {
        let registry = Registry::new();

        // --- Zustand ---
        let connections_active = IntGauge::with_opts(Opts::new(
            "treffpunkt_connections_active",
            "Anzahl offener WebSocket-Verbindungen",
        ))?;
        registry.register(Box::new(connections_active.clone()))?;

        let rooms_active = IntGauge::with_opts(Opts::new(
            "treffpunkt_rooms_active",
            "Anzahl existierender Raeume",
        ))?;
        registry.register(Box::new(rooms_active.clone()))?;

        let participants_active = IntGauge::with_opts(Opts::new(
            "treffpunkt_participants_active",
            "Anzahl Teilnehmer in Raeumen",
        ))?;
        registry.register(Box::new(participants_active.clone()))?;

        // --- Events ---
        let events_received_total = IntCounterVec::new(
            Opts::new(
                "treffpunkt_events_received_total",
                "Eingehende Signaling-Events",
            ),
            &["event"],
        )?;
        registry.register(Box::new(events_received_total.clone()))?;

        let events_sent_total = IntCounterVec::new(
            Opts::new("treffpunkt_events_sent_total", "Zugestellte Signaling-Events"),
            &["event"],
        )?;
        registry.register(Box::new(events_sent_total.clone()))?;

        let events_dropped_total = IntCounter::with_opts(Opts::new(
            "treffpunkt_events_dropped_total",
            "Verworfene Zustellungen (Queue voll oder Empfaenger weg)",
        ))?;
        registry.register(Box::new(events_dropped_total.clone()))?;

        let chat_messages_total = IntCounter::with_opts(Opts::new(
            "treffpunkt_chat_messages_total",
            "Angenommene Chat-Nachrichten",
        ))?;
        registry.register(Box::new(chat_messages_total.clone()))?;

        // --- HTTP ---
        let http_requests_total = IntCounterVec::new(
            Opts::new("treffpunkt_http_requests_total", "Gesamtanzahl HTTP-Anfragen"),
            &["method", "path", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "treffpunkt_http_request_duration_seconds",
                "HTTP-Antwortzeit in Sekunden",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
            &["method", "path"],
        )?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            connections_active,
            rooms_active,
            participants_active,
            events_received_total,
            events_sent_total,
            events_dropped_total,
            chat_messages_total,
            http_requests_total,
            http_request_duration_seconds,
        })
    }

    /// Exportiert alle Metriken im Prometheus-Textformat
    pub fn exportieren(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// Axum-Router fuer den `/metrics`-Endpunkt
pub fn metrics_router(metriken: RelayMetrics) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metriken)
}

async fn metrics_handler(State(metriken): State<RelayMetrics>) -> impl IntoResponse {
    match metriken.exportieren() {
        Ok(text) => (
            StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(err) => {
            tracing::error!("Metriken-Export fehlgeschlagen: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
