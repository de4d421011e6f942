//! Client-Connection – Verwaltet eine einzelne WebSocket-Verbindung
//!
//! Jede Verbindung laeuft in einem eigenen tokio-Task. Die Schleife liest
//! Text-Frames, dekodiert sie und uebergibt sie dem Dispatcher; parallel
//! schreibt sie die Events aus der Broadcaster-Queue auf den Socket.
//!
//! ## Keepalive
//! - Server sendet alle `keepalive_sek` einen Ping
//! - Kommt `verbindungs_timeout_sek` lang nichts an, wird getrennt
//! - Trennung aus jedem Grund fuehrt zum selben Aufraeumen

use axum::extract::ws::{close_code, CloseFrame, Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use treffpunkt_core::ConnectionId;
use treffpunkt_protocol::{client_event_dekodieren, server_event_kodieren, ProtocolError};

use crate::dispatcher::{DispatcherContext, MessageDispatcher};
use crate::server_state::SignalingState;

/// Verarbeitet eine einzelne WebSocket-Verbindung
pub struct ClientConnection {
    state: Arc<SignalingState>,
    peer_addr: Option<SocketAddr>,
}

impl ClientConnection {
    /// Erstellt eine neue ClientConnection
    pub fn neu(state: Arc<SignalingState>, peer_addr: Option<SocketAddr>) -> Self {
        Self { state, peer_addr }
    }

    /// Startet die Verarbeitungsschleife
    ///
    /// Laeuft bis der Client trennt, der Timeout greift oder ein
    /// Shutdown-Signal eingeht.
    pub async fn verarbeiten(self, socket: WebSocket, mut shutdown_rx: watch::Receiver<bool>) {
        let peer = self.peer_addr;
        let connection_id = ConnectionId::new();
        let keepalive = sekunden(self.state.config.keepalive_sek);
        let timeout = sekunden(self.state.config.verbindungs_timeout_sek);

        let mut sende_rx = self.state.broadcaster.client_registrieren(connection_id);
        self.state.metriken.connections_active.inc();
        tracing::info!(peer = ?peer, connection_id = %connection_id, "Neue Verbindung");

        let dispatcher = MessageDispatcher::neu(Arc::clone(&self.state));
        let mut ctx = DispatcherContext::neu(connection_id);
        let (mut schreiber, mut leser) = socket.split();

        let mut takt = takt_erstellen(keepalive, timeout);
        let mut letzter_empfang = Instant::now();

        loop {
            tokio::select! {
                // Eingehender Frame vom Client
                frame = leser.next() => {
                    match frame {
                        Some(Ok(Message::Text(text))) => {
                            letzter_empfang = Instant::now();
                            match client_event_dekodieren(&text) {
                                Ok(event) => dispatcher.dispatch(event, &mut ctx),
                                Err(fehler) => {
                                    tracing::debug!(
                                        connection_id = %connection_id,
                                        fehler = %fehler,
                                        "Ungueltiger Frame"
                                    );
                                    dispatcher.protokollfehler_melden(&ctx, fehler);
                                }
                            }
                        }
                        Some(Ok(Message::Binary(_))) => {
                            letzter_empfang = Instant::now();
                            dispatcher.protokollfehler_melden(&ctx, ProtocolError::KeinTextFrame);
                        }
                        Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {
                            letzter_empfang = Instant::now();
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            tracing::info!(connection_id = %connection_id, "Verbindung vom Client getrennt");
                            break;
                        }
                        Some(Err(e)) => {
                            tracing::warn!(
                                connection_id = %connection_id,
                                fehler = %e,
                                "WebSocket-Lesefehler"
                            );
                            break;
                        }
                    }
                }

                // Ausgehendes Event aus dem Broadcaster
                ausgehend = sende_rx.recv() => {
                    let Some(event) = ausgehend else { break };
                    let text = match server_event_kodieren(&event) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::error!(event = event.name(), fehler = %e, "Kodieren fehlgeschlagen");
                            continue;
                        }
                    };
                    if let Err(e) = schreiber.send(Message::Text(text)).await {
                        tracing::warn!(
                            connection_id = %connection_id,
                            fehler = %e,
                            "Senden fehlgeschlagen"
                        );
                        break;
                    }
                }

                // Keepalive-Ping und Timeout-Pruefung
                _ = naechster_takt(&mut takt) => {
                    if let Some(timeout) = timeout {
                        if letzter_empfang.elapsed() > timeout {
                            tracing::warn!(connection_id = %connection_id, "Verbindungs-Timeout");
                            break;
                        }
                    }
                    if keepalive.is_some() {
                        if let Err(e) = schreiber.send(Message::Ping(Vec::new())).await {
                            tracing::warn!(
                                connection_id = %connection_id,
                                fehler = %e,
                                "Ping-Senden fehlgeschlagen"
                            );
                            break;
                        }
                    }
                }

                // Shutdown-Signal
                Ok(()) = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        tracing::info!(connection_id = %connection_id, "Shutdown-Signal – Verbindung wird getrennt");
                        let abschied = Message::Close(Some(CloseFrame {
                            code: close_code::AWAY,
                            reason: "Server wird heruntergefahren".into(),
                        }));
                        let _ = schreiber.send(abschied).await;
                        break;
                    }
                }
            }
        }

        // Aufraeumen beim Verbindungsende
        dispatcher.trennen(&mut ctx);
        self.state.broadcaster.client_entfernen(&connection_id);
        self.state.metriken.connections_active.dec();

        tracing::info!(peer = ?peer, connection_id = %connection_id, "Verbindungs-Task beendet");
    }
}

fn sekunden(wert: u64) -> Option<Duration> {
    (wert > 0).then(|| Duration::from_secs(wert))
}

/// Taktgeber fuer Ping und Timeout-Pruefung
///
/// Laeuft im Keepalive-Intervall, ohne Keepalive im Timeout-Intervall.
fn takt_erstellen(keepalive: Option<Duration>, timeout: Option<Duration>) -> Option<Interval> {
    let periode = keepalive.or(timeout)?;
    let mut takt = tokio::time::interval_at(Instant::now() + periode, periode);
    takt.set_missed_tick_behavior(MissedTickBehavior::Delay);
    Some(takt)
}

async fn naechster_takt(takt: &mut Option<Interval>) {
    match takt {
        Some(takt) => {
            takt.tick().await;
        }
        None => std::future::pending().await,
    }
}
