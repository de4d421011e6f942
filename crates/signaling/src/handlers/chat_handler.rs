//! Chat-Handler – send-message
//!
//! Haengt die Nachricht an den Verlauf an und verteilt danach den
//! Verlauf an alle Verbindungen im Raum.

use treffpunkt_chat::ChatNachricht;
use treffpunkt_core::RoomId;
use treffpunkt_protocol::events::SendMessageRequest;
use treffpunkt_protocol::{ChatMessageInfo, ServerEvent};

use crate::dispatcher::DispatcherContext;
use crate::error::{SignalingError, SignalingResult};
use crate::server_state::SignalingState;

/// Verarbeitet eine Chat-Nachricht
///
/// Nur erlaubt wenn die Verbindung im adressierten Raum ist.
pub fn handle_send_message(
    request: SendMessageRequest,
    ctx: &DispatcherContext,
    state: &SignalingState,
) -> SignalingResult<()> {
    let adressiert = request.room_id.parse::<RoomId>().ok();
    let room_id = match ctx.raum() {
        Some(eigener) if Some(eigener) == adressiert => eigener,
        _ => return Err(SignalingError::NichtImRaum(request.room_id)),
    };

    state.chat.nachricht_anhaengen(
        request.identity,
        ctx.connection_id,
        room_id,
        request.message,
    );
    state.metriken.chat_messages_total.inc();

    let messages = state
        .chat
        .verlauf(state.config.chat_verlauf, &room_id)
        .into_iter()
        .map(nachricht_info)
        .collect();

    state
        .broadcaster
        .an_gruppe_senden(&room_id, ServerEvent::GetAllMessages { messages });
    Ok(())
}

fn nachricht_info(nachricht: ChatNachricht) -> ChatMessageInfo {
    ChatMessageInfo {
        identity: nachricht.identity,
        connection_id: nachricht.connection_id,
        room_id: nachricht.room_id,
        content: nachricht.content,
        sent_at: nachricht.sent_at.timestamp_millis(),
    }
}
