//! Antwortformat der Raum-Abfrage (`GET /room-exists/{roomId}`)

use serde::{Deserialize, Serialize};

/// Existenz und Belegung eines Raums
///
/// `full` wird nur mitgesendet wenn der Raum existiert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomExistsResponse {
    pub room_exists: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<bool>,
}

impl RoomExistsResponse {
    /// Raum existiert
    pub fn vorhanden(voll: bool) -> Self {
        Self {
            room_exists: true,
            full: Some(voll),
        }
    }

    /// Raum existiert nicht
    pub fn nicht_vorhanden() -> Self {
        Self {
            room_exists: false,
            full: None,
        }
    }
}
