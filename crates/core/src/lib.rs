//! treffpunkt-core – Gemeinsame Typen
//!
//! Dieses Crate stellt die Identifikationstypen und den Teilnehmer-Datensatz
//! bereit, die von allen anderen Treffpunkt-Crates gemeinsam genutzt werden.

pub mod types;

// Re-Exporte fuer bequemen Zugriff
pub use types::{ConnectionId, Participant, ParticipantId, RoomId};
