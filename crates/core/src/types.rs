//! Identifikationstypen und Teilnehmer-Datensatz
//!
//! Alle IDs verwenden das Newtype-Pattern um Verwechslungen zwischen
//! Raum-, Verbindungs- und Teilnehmer-IDs zur Compilezeit auszuschliessen.
//! Auf dem Draht erscheinen sie als nackte UUID-Strings.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

macro_rules! id_typ {
    ($(#[$doc:meta])* $name:ident, $praefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Erstellt eine neue zufaellige ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Gibt die innere UUID zurueck
            pub fn inner(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($praefix, ":{}"), self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }
    };
}

id_typ!(
    /// Eindeutige Raum-ID, stabil fuer die gesamte Lebensdauer des Raums
    RoomId,
    "room"
);

id_typ!(
    /// Vom Transport vergebene Verbindungs-ID (Routing-Schluessel fuer Unicast)
    ConnectionId,
    "conn"
);

id_typ!(
    /// Sitzungsbezogene Teilnehmer-ID, unabhaengig von der Verbindungs-ID
    ParticipantId,
    "participant"
);

/// Ein verbundener Client, der genau einem Raum angehoert
///
/// Gehoert exklusiv dem Benutzerverzeichnis; Raum-Mitgliederlisten
/// referenzieren ihn nur ueber die `connection_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Vom Client gewaehlter Anzeigename
    pub identity: String,
    pub id: ParticipantId,
    pub connection_id: ConnectionId,
    pub room_id: RoomId,
    /// Client nimmt nur mit Audio teil (kein Video)
    pub audio_only: bool,
}

impl Participant {
    /// Erstellt einen neuen Teilnehmer mit frischer Teilnehmer-ID
    pub fn neu(
        identity: impl Into<String>,
        connection_id: ConnectionId,
        room_id: RoomId,
        audio_only: bool,
    ) -> Self {
        Self {
            identity: identity.into(),
            id: ParticipantId::new(),
            connection_id,
            room_id,
            audio_only,
        }
    }
}
