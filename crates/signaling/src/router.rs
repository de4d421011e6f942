//! SignalingRouter – Punkt-zu-Punkt-Weiterleitung der Verhandlungsdaten
//!
//! Der Router interpretiert die Nutzdaten nicht. Ziele die nicht (mehr)
//! verbunden sind, werden stillschweigend uebergangen.

use treffpunkt_core::{ConnectionId, Participant};
use treffpunkt_protocol::ServerEvent;

use crate::broadcast::EventBroadcaster;

#[derive(Clone)]
pub struct SignalingRouter {
    broadcaster: EventBroadcaster,
}

impl SignalingRouter {
    pub fn neu(broadcaster: EventBroadcaster) -> Self {
        Self { broadcaster }
    }

    /// Fordert alle bestehenden Mitglieder auf, eine Verbindung zum
    /// Neuling vorzubereiten
    ///
    /// Gibt die Anzahl erreichter Mitglieder zurueck.
    pub fn vorbereiten(&self, neuling: ConnectionId, mitglieder: &[Participant]) -> usize {
        mitglieder
            .iter()
            .filter(|t| t.connection_id != neuling)
            .filter(|t| {
                self.zustellen(
                    &t.connection_id,
                    ServerEvent::ConnPrepare {
                        conn_user_connection_id: neuling,
                    },
                )
            })
            .count()
    }

    /// Fordert `ziel` auf, die Verhandlung mit `quelle` zu starten
    pub fn initialisieren(&self, ziel: &ConnectionId, quelle: ConnectionId) -> bool {
        self.zustellen(
            ziel,
            ServerEvent::ConnInit {
                conn_user_connection_id: quelle,
            },
        )
    }

    /// Leitet opake Verhandlungsdaten von `quelle` an `ziel` weiter
    pub fn signal_weiterleiten(
        &self,
        ziel: &ConnectionId,
        quelle: ConnectionId,
        signal: serde_json::Value,
    ) -> bool {
        self.zustellen(
            ziel,
            ServerEvent::ConnSignal {
                signal,
                conn_user_connection_id: quelle,
            },
        )
    }

    fn zustellen(&self, ziel: &ConnectionId, event: ServerEvent) -> bool {
        let zugestellt = self.broadcaster.an_client_senden(ziel, event);
        if !zugestellt {
            tracing::debug!(ziel = %ziel, "Ziel nicht erreichbar, Signal verworfen");
        }
        zugestellt
    }
}
