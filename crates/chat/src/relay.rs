//! ChatRelay – Nachrichten anhaengen und Verlauf liefern
//!
//! Alle Nachrichten landen in einer einzigen, global geordneten Sequenz
//! (Reihenfolge des Anhaengens). Eine Aufteilung nach Raum passiert erst
//! beim Auslesen.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use treffpunkt_core::{ConnectionId, RoomId};

use crate::types::{ChatNachricht, VerlaufModus};

/// Fluechtiger Chat-Verlauf
///
/// Thread-safe via Arc + RwLock. Clone teilt den inneren Zustand.
#[derive(Clone, Default)]
pub struct ChatRelay {
    nachrichten: Arc<RwLock<Vec<ChatNachricht>>>,
}

impl ChatRelay {
    /// Erstellt einen leeren ChatRelay
    pub fn neu() -> Self {
        Self::default()
    }

    /// Haengt eine Nachricht an; `sent_at` ist der Empfangszeitpunkt
    pub fn nachricht_anhaengen(
        &self,
        identity: impl Into<String>,
        connection_id: ConnectionId,
        room_id: RoomId,
        content: impl Into<String>,
    ) -> ChatNachricht {
        let nachricht = ChatNachricht {
            identity: identity.into(),
            connection_id,
            room_id,
            content: content.into(),
            sent_at: Utc::now(),
        };

        let mut nachrichten = self.nachrichten.write();
        nachrichten.push(nachricht.clone());

        tracing::debug!(
            connection_id = %connection_id,
            room_id = %room_id,
            gesamt = nachrichten.len(),
            "Chat-Nachricht angehaengt"
        );
        nachricht
    }

    /// Gibt den Verlauf fuer einen Raum in Anhaenge-Reihenfolge zurueck
    pub fn verlauf(&self, modus: VerlaufModus, raum: &RoomId) -> Vec<ChatNachricht> {
        let nachrichten = self.nachrichten.read();
        match modus {
            VerlaufModus::Global => nachrichten.clone(),
            VerlaufModus::Raum => nachrichten
                .iter()
                .filter(|n| &n.room_id == raum)
                .cloned()
                .collect(),
        }
    }

    /// Anzahl aller gespeicherten Nachrichten
    pub fn anzahl(&self) -> usize {
        self.nachrichten.read().len()
    }
}
