//! treffpunkt-signaling – WebSocket-Signaling-Relay
//!
//! Dieser Crate implementiert den Signaling-Service fuer Treffpunkt. Er
//! verwaltet Raeume und Teilnehmer, leitet Verhandlungsdaten (Offer,
//! Answer, ICE-Kandidaten) zwischen Peers weiter und verteilt den Chat.
//! Medien laufen nie ueber den Server.
//!
//! ## Architektur
//!
//! ```text
//! HTTP-Server (SignalingServer, axum)
//!     |  GET /ws, GET /room-exists/:room_id
//!     v
//! ClientConnection (pro WebSocket ein Task)
//!     |  Zustand: Verbunden -> ImRaum -> Getrennt
//!     v
//! MessageDispatcher
//!     |
//!     +-- RoomHandler   (create-room, join-room)
//!     +-- SignalHandler (conn-signal, conn-init)
//!     +-- ChatHandler   (send-message)
//!
//! RoomRegistry     – Raeume + UserDirectory
//! SignalingRouter  – Punkt-zu-Punkt an eine Verbindung
//! EventBroadcaster – Send-Queues und Raum-Gruppen
//! ```

pub mod broadcast;
pub mod connection;
pub mod directory;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod http;
pub mod registry;
pub mod router;
pub mod server_state;

// Bequeme Re-Exporte
pub use broadcast::EventBroadcaster;
pub use connection::ClientConnection;
pub use directory::UserDirectory;
pub use dispatcher::{DispatcherContext, MessageDispatcher, VerbindungsZustand};
pub use error::{SignalingError, SignalingResult};
pub use http::SignalingServer;
pub use registry::{RaumBelegung, Room, RoomRegistry, VerlassenErgebnis};
pub use router::SignalingRouter;
pub use server_state::{SignalingConfig, SignalingState};
