//! Oeffentliche Typen fuer den Chat-Relay

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use treffpunkt_core::{ConnectionId, RoomId};

/// Welcher Verlauf an einen Raum verteilt wird
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerlaufModus {
    /// Nur Nachrichten des eigenen Raums
    #[default]
    Raum,
    /// Gesamter Verlauf ueber alle Raeume
    Global,
}

/// Eine Chat-Nachricht
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatNachricht {
    /// Anzeigename wie vom Absender angegeben
    pub identity: String,
    pub connection_id: ConnectionId,
    pub room_id: RoomId,
    pub content: String,
    /// Zeitpunkt des Empfangs auf dem Server
    pub sent_at: DateTime<Utc>,
}
