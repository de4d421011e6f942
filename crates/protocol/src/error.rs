//! Fehlertypen fuer das Protokoll-Crate

use thiserror::Error;

/// Fehler beim Kodieren oder Dekodieren eines Events
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Frame ist kein gueltiges JSON oder hat kein Event-Feld
    #[error("Ungueltiges JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Event-Name ist nicht Teil des Protokolls
    #[error("Unbekanntes Event: {0}")]
    UnbekanntesEvent(String),

    /// Nutzdaten passen nicht zum Event (fehlende oder falsche Felder)
    #[error("Ungueltige Nutzdaten fuer '{event}': {grund}")]
    UngueltigeNutzdaten { event: String, grund: String },

    /// Binaer-Frame statt JSON-Text
    #[error("Nur Text-Frames werden unterstuetzt")]
    KeinTextFrame,
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
