//! treffpunkt-protocol – Event-Definitionen fuer das Signaling
//!
//! Dieses Crate definiert alle Events, die zwischen Client und Server ueber
//! die WebSocket-Verbindung ausgetauscht werden, sowie das JSON-Format der
//! Raum-Abfrage.
//!
//! ## Rahmenformat
//! Jedes Event ist ein JSON-Text-Frame der Form
//! `{"event": "<name>", "data": {...}}`.

pub mod codec;
pub mod error;
pub mod events;
pub mod query;

pub use codec::{client_event_dekodieren, server_event_kodieren};
pub use error::{ProtocolError, ProtocolResult};
pub use events::{ChatMessageInfo, ClientEvent, ErrorCode, ServerEvent};
pub use query::RoomExistsResponse;
