//! Signal-Handler – conn-signal und conn-init
//!
//! Die Quelle ist immer die eigene Verbindung, das Ziel kommt vom Client.
//! Eine nicht parsebare Ziel-ID wird wie ein unerreichbares Ziel verworfen.

use treffpunkt_core::ConnectionId;
use treffpunkt_protocol::events::{ConnInitRequest, ConnSignalRequest};

use crate::dispatcher::DispatcherContext;
use crate::server_state::SignalingState;

/// Leitet Verhandlungsdaten an die Ziel-Verbindung weiter
pub fn handle_conn_signal(
    request: ConnSignalRequest,
    ctx: &DispatcherContext,
    state: &SignalingState,
) {
    let zugestellt = match ziel_parsen(&request.conn_user_connection_id) {
        Some(ziel) => state
            .router
            .signal_weiterleiten(&ziel, ctx.connection_id, request.signal),
        None => false,
    };
    tracing::trace!(
        connection_id = %ctx.connection_id,
        ziel = %request.conn_user_connection_id,
        zugestellt,
        "conn-signal weitergeleitet"
    );
}

/// Fordert die Ziel-Verbindung auf, die Verhandlung zu starten
pub fn handle_conn_init(request: ConnInitRequest, ctx: &DispatcherContext, state: &SignalingState) {
    let zugestellt = match ziel_parsen(&request.conn_user_connection_id) {
        Some(ziel) => state.router.initialisieren(&ziel, ctx.connection_id),
        None => false,
    };
    tracing::trace!(
        connection_id = %ctx.connection_id,
        ziel = %request.conn_user_connection_id,
        zugestellt,
        "conn-init weitergeleitet"
    );
}

fn ziel_parsen(roh: &str) -> Option<ConnectionId> {
    match roh.parse() {
        Ok(ziel) => Some(ziel),
        Err(_) => {
            tracing::debug!(ziel = roh, "Ziel-ID nicht parsebar, Signal verworfen");
            None
        }
    }
}
