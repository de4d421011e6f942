//! JSON-Codec fuer WebSocket-Text-Frames
//!
//! Dekodiert in zwei Schritten, damit ein unbekannter Event-Name von
//! fehlenden oder falsch typisierten Feldern unterschieden werden kann.

use serde::Deserialize;

use crate::error::{ProtocolError, ProtocolResult};
use crate::events::{ClientEvent, ServerEvent};

/// Aeusserer Rahmen eines Frames, ohne Interpretation der Nutzdaten
#[derive(Deserialize)]
struct Rahmen {
    event: String,
}

/// Dekodiert einen eingehenden Text-Frame
pub fn client_event_dekodieren(text: &str) -> ProtocolResult<ClientEvent> {
    let wert: serde_json::Value = serde_json::from_str(text)?;
    let rahmen = Rahmen::deserialize(&wert)?;

    if !ClientEvent::ist_bekannt(&rahmen.event) {
        return Err(ProtocolError::UnbekanntesEvent(rahmen.event));
    }

    serde_json::from_value(wert).map_err(|e| ProtocolError::UngueltigeNutzdaten {
        event: rahmen.event,
        grund: e.to_string(),
    })
}

/// Kodiert ein ausgehendes Event als Text-Frame
pub fn server_event_kodieren(event: &ServerEvent) -> ProtocolResult<String> {
    Ok(serde_json::to_string(event)?)
}
