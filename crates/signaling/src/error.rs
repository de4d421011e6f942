//! Fehlertypen fuer den Signaling-Service

use thiserror::Error;
use treffpunkt_core::RoomId;
use treffpunkt_protocol::{ErrorCode, ProtocolError, ServerEvent};

/// Fehlertyp fuer den Signaling-Service
#[derive(Debug, Error)]
pub enum SignalingError {
    /// Beitritt zu einem Raum der nicht existiert (roher Wert vom Client)
    #[error("Raum nicht gefunden: {0}")]
    RaumNichtGefunden(String),

    /// Raum hat die konfigurierte Kapazitaet erreicht
    #[error("Raum ist voll: {0}")]
    RaumVoll(RoomId),

    /// Verbindung ist schon Mitglied eines Raums
    #[error("Verbindung ist bereits in einem Raum")]
    BereitsImRaum,

    /// Verbindung ist nicht Mitglied des adressierten Raums
    #[error("Verbindung ist nicht im Raum {0}")]
    NichtImRaum(String),

    /// Ungueltiger Frame
    #[error("Protokollfehler: {0}")]
    Protokoll(#[from] ProtocolError),

    /// IO-Fehler (Socket, Listener)
    #[error("IO-Fehler: {0}")]
    Io(#[from] std::io::Error),
}

impl SignalingError {
    /// Event das dem Ausloeser des Fehlers zugestellt wird
    pub fn als_event(&self) -> ServerEvent {
        match self {
            Self::RaumNichtGefunden(roh) => ServerEvent::RoomNotFound {
                room_id: roh.clone(),
            },
            Self::RaumVoll(room_id) => ServerEvent::RoomFull { room_id: *room_id },
            Self::BereitsImRaum => ServerEvent::fehler(ErrorCode::AlreadyInRoom, self.to_string()),
            Self::NichtImRaum(_) => ServerEvent::fehler(ErrorCode::NotInRoom, self.to_string()),
            Self::Protokoll(_) => ServerEvent::fehler(ErrorCode::InvalidRequest, self.to_string()),
            Self::Io(_) => ServerEvent::fehler(ErrorCode::InternalError, "Interner Fehler"),
        }
    }
}

/// Result-Typ fuer den Signaling-Service
pub type SignalingResult<T> = Result<T, SignalingError>;
