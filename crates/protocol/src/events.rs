//! Signaling-Events (WebSocket)
//!
//! Definiert alle Events die ueber die WebSocket-Verbindung zwischen Client
//! und Server ausgetauscht werden.
//!
//! ## Design
//! - Adjacently tagged Enums: `{"event": "join-room", "data": {...}}`
//! - Event-Namen in kebab-case, Feldnamen in camelCase
//! - Signal-Nutzdaten werden als opakes JSON durchgereicht

use serde::{Deserialize, Serialize};
use treffpunkt_core::{ConnectionId, Participant, RoomId};

// ---------------------------------------------------------------------------
// Fehler-Codes
// ---------------------------------------------------------------------------

/// Standardisierte Fehler-Codes fuer `error`-Events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InternalError,
    InvalidRequest,
    AlreadyInRoom,
    NotInRoom,
}

// ---------------------------------------------------------------------------
// Client -> Server
// ---------------------------------------------------------------------------

/// Neuen Raum erstellen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub identity: String,
    #[serde(default, alias = "onlyAudio")]
    pub audio_only: bool,
}

/// Bestehendem Raum beitreten
///
/// Die Raum-ID bleibt hier ein String: eine nicht parsebare ID ist fuer den
/// Client ein unbekannter Raum, kein Protokollfehler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomRequest {
    pub identity: String,
    pub room_id: String,
    #[serde(default, alias = "onlyAudio")]
    pub audio_only: bool,
}

/// Chat-Nachricht an den eigenen Raum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub identity: String,
    pub room_id: String,
    pub message: String,
}

/// Verhandlungsdaten (SDP, ICE-Kandidaten) an eine Ziel-Verbindung
///
/// Das Ziel bleibt roh, eine unbekannte ID ist ein unerreichbares Ziel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnSignalRequest {
    #[serde(alias = "connUserSocketId")]
    pub conn_user_connection_id: String,
    pub signal: serde_json::Value,
}

/// Ziel-Verbindung auffordern, die Verhandlung zu starten
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnInitRequest {
    #[serde(alias = "connUserSocketId")]
    pub conn_user_connection_id: String,
}

/// Alle Events die ein Client senden darf
///
/// `disconnect` ist kein Frame, sondern das Ende des WebSocket-Streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    #[serde(alias = "create-new-room")]
    CreateRoom(CreateRoomRequest),
    JoinRoom(JoinRoomRequest),
    SendMessage(SendMessageRequest),
    ConnSignal(ConnSignalRequest),
    ConnInit(ConnInitRequest),
}

impl ClientEvent {
    /// Alle akzeptierten Event-Namen inklusive Aliase
    pub const NAMEN: &'static [&'static str] = &[
        "create-room",
        "create-new-room",
        "join-room",
        "send-message",
        "conn-signal",
        "conn-init",
    ];

    /// Kanonischer Event-Name (fuer Logs und Metriken)
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateRoom(_) => "create-room",
            Self::JoinRoom(_) => "join-room",
            Self::SendMessage(_) => "send-message",
            Self::ConnSignal(_) => "conn-signal",
            Self::ConnInit(_) => "conn-init",
        }
    }

    /// Prueft ob ein Event-Name zum Protokoll gehoert
    pub fn ist_bekannt(name: &str) -> bool {
        Self::NAMEN.contains(&name)
    }
}

// ---------------------------------------------------------------------------
// Server -> Client
// ---------------------------------------------------------------------------

/// Chat-Nachricht wie sie an Clients ausgeliefert wird
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageInfo {
    pub identity: String,
    pub connection_id: ConnectionId,
    pub room_id: RoomId,
    pub content: String,
    /// Empfangszeitpunkt in Millisekunden seit der Unix-Epoche
    pub sent_at: i64,
}

/// Alle Events die der Server sendet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Teilt dem Ersteller die neue Raum-ID mit
    #[serde(rename_all = "camelCase")]
    RoomId { room_id: RoomId },

    /// Vollstaendiger Mitglieder-Schnappschuss des Raums
    #[serde(rename_all = "camelCase")]
    RoomUpdate { connected_users: Vec<Participant> },

    /// Empfaenger soll eine Verbindung zum Neuling vorbereiten
    #[serde(rename_all = "camelCase")]
    ConnPrepare {
        conn_user_connection_id: ConnectionId,
    },

    #[serde(rename_all = "camelCase")]
    ConnInit {
        conn_user_connection_id: ConnectionId,
    },

    #[serde(rename_all = "camelCase")]
    ConnSignal {
        signal: serde_json::Value,
        conn_user_connection_id: ConnectionId,
    },

    #[serde(rename_all = "camelCase")]
    UserDisconnected { connection_id: ConnectionId },

    /// Gespeicherter Chat-Verlauf
    GetAllMessages { messages: Vec<ChatMessageInfo> },

    /// Beitritt zu einem unbekannten Raum abgelehnt
    #[serde(rename_all = "camelCase")]
    RoomNotFound { room_id: String },

    /// Beitritt abgelehnt, Raum hat seine Kapazitaet erreicht
    #[serde(rename_all = "camelCase")]
    RoomFull { room_id: RoomId },

    Error { code: ErrorCode, message: String },
}

impl ServerEvent {
    /// Event-Name auf dem Draht
    pub fn name(&self) -> &'static str {
        match self {
            Self::RoomId { .. } => "room-id",
            Self::RoomUpdate { .. } => "room-update",
            Self::ConnPrepare { .. } => "conn-prepare",
            Self::ConnInit { .. } => "conn-init",
            Self::ConnSignal { .. } => "conn-signal",
            Self::UserDisconnected { .. } => "user-disconnected",
            Self::GetAllMessages { .. } => "get-all-messages",
            Self::RoomNotFound { .. } => "room-not-found",
            Self::RoomFull { .. } => "room-full",
            Self::Error { .. } => "error",
        }
    }

    /// Erstellt ein `error`-Event
    pub fn fehler(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Error {
            code,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
