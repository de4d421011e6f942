//! HTTP-Server – WebSocket-Upgrade und Raum-Abfrage
//!
//! Der `SignalingServer` bindet einen TCP-Socket und bedient per axum:
//! - `GET /ws` – WebSocket-Upgrade, pro Verbindung ein `ClientConnection`-Task
//! - `GET /room-exists/:room_id` – Existenz und Belegung eines Raums
//! - `GET /api/room-exists/:room_id` – dasselbe unter dem API-Praefix

use axum::extract::{ConnectInfo, Path, State, WebSocketUpgrade};
use axum::http::{HeaderValue, Method};
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use treffpunkt_core::RoomId;
use treffpunkt_observability::timing_middleware;
use treffpunkt_protocol::RoomExistsResponse;

use crate::connection::ClientConnection;
use crate::error::SignalingResult;
use crate::server_state::SignalingState;

/// Axum-State fuer alle Routen
#[derive(Clone)]
pub struct HttpZustand {
    pub signaling: Arc<SignalingState>,
    pub shutdown_rx: watch::Receiver<bool>,
}

/// Baut den Router mit allen Routen und Layern
///
/// Leere `cors_origins` erlauben alle Origins.
pub fn router(zustand: HttpZustand, cors_origins: &[String]) -> Router {
    let cors = if cors_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(tower_http::cors::Any)
    };

    let metriken = zustand.signaling.metriken.clone();

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/room-exists/:room_id", get(room_exists_handler))
        .route("/api/room-exists/:room_id", get(room_exists_handler))
        .layer(axum::middleware::from_fn_with_state(
            metriken,
            timing_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(zustand)
}

/// `GET /ws` – WebSocket-Upgrade
async fn ws_handler(
    ws: WebSocketUpgrade,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    State(zustand): State<HttpZustand>,
) -> impl IntoResponse {
    let peer_addr = connect_info.map(|ConnectInfo(addr)| addr);
    ws.on_upgrade(move |socket| {
        ClientConnection::neu(zustand.signaling, peer_addr).verarbeiten(socket, zustand.shutdown_rx)
    })
}

/// `GET /room-exists/:room_id`
async fn room_exists_handler(
    Path(room_id): Path<String>,
    State(zustand): State<HttpZustand>,
) -> Json<RoomExistsResponse> {
    Json(raum_abfragen(&zustand.signaling, &room_id))
}

/// Beantwortet die Raum-Abfrage
///
/// Eine nicht parsebare ID ist ein unbekannter Raum.
pub fn raum_abfragen(state: &SignalingState, roh: &str) -> RoomExistsResponse {
    let Ok(room_id) = roh.parse::<RoomId>() else {
        return RoomExistsResponse::nicht_vorhanden();
    };

    let belegung = state.registry.belegung(&room_id);
    if belegung.existiert {
        RoomExistsResponse::vorhanden(state.ist_voll(belegung.mitglieder))
    } else {
        RoomExistsResponse::nicht_vorhanden()
    }
}

// ---------------------------------------------------------------------------
// SignalingServer
// ---------------------------------------------------------------------------

/// HTTP/WebSocket-Signaling-Server
pub struct SignalingServer {
    state: Arc<SignalingState>,
    bind_addr: SocketAddr,
    cors_origins: Vec<String>,
}

impl SignalingServer {
    /// Erstellt einen neuen SignalingServer
    pub fn neu(state: Arc<SignalingState>, bind_addr: SocketAddr, cors_origins: Vec<String>) -> Self {
        Self {
            state,
            bind_addr,
            cors_origins,
        }
    }

    /// Bindet den Socket und bedient Anfragen
    ///
    /// Laeuft bis `shutdown_rx` ein `true`-Signal empfaengt.
    pub async fn starten(self, shutdown_rx: watch::Receiver<bool>) -> SignalingResult<()> {
        let listener = TcpListener::bind(self.bind_addr).await?;
        self.mit_listener_starten(listener, shutdown_rx).await
    }

    /// Bedient Anfragen auf einem bereits gebundenen Listener
    pub async fn mit_listener_starten(
        self,
        listener: TcpListener,
        shutdown_rx: watch::Receiver<bool>,
    ) -> SignalingResult<()> {
        let lokale_addr = listener.local_addr()?;
        let zustand = HttpZustand {
            signaling: self.state,
            shutdown_rx: shutdown_rx.clone(),
        };
        let app = router(zustand, &self.cors_origins);

        tracing::info!(adresse = %lokale_addr, "Signaling-Server gestartet");

        let mut stopp_rx = shutdown_rx;
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            let _ = stopp_rx.wait_for(|aktiv| *aktiv).await;
            tracing::info!("Signaling-Server: Shutdown-Signal empfangen");
        })
        .await?;

        tracing::info!("Signaling-Server beendet");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
