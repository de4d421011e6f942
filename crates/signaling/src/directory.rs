//! UserDirectory – Verbindungs-ID -> Teilnehmer
//!
//! Einzige Quelle der Wahrheit dafuer, wer verbunden ist und in welchem
//! Raum. Nicht selbst synchronisiert; lebt im `RoomRegistry` hinter dessen
//! Lock.

use std::collections::HashMap;

use treffpunkt_core::{ConnectionId, Participant};

#[derive(Debug, Default)]
pub struct UserDirectory {
    teilnehmer: HashMap<ConnectionId, Participant>,
}

impl UserDirectory {
    pub fn neu() -> Self {
        Self::default()
    }

    /// Traegt einen Teilnehmer ein und gibt einen eventuell ersetzten zurueck
    pub fn eintragen(&mut self, teilnehmer: Participant) -> Option<Participant> {
        self.teilnehmer.insert(teilnehmer.connection_id, teilnehmer)
    }

    pub fn entfernen(&mut self, connection_id: &ConnectionId) -> Option<Participant> {
        self.teilnehmer.remove(connection_id)
    }

    pub fn suchen(&self, connection_id: &ConnectionId) -> Option<&Participant> {
        self.teilnehmer.get(connection_id)
    }

    pub fn enthaelt(&self, connection_id: &ConnectionId) -> bool {
        self.teilnehmer.contains_key(connection_id)
    }

    pub fn anzahl(&self) -> usize {
        self.teilnehmer.len()
    }
}
