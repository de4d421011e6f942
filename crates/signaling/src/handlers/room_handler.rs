//! Raum-Handler – create-room und join-room

use treffpunkt_core::RoomId;
use treffpunkt_protocol::events::{CreateRoomRequest, JoinRoomRequest};
use treffpunkt_protocol::ServerEvent;

use crate::dispatcher::{DispatcherContext, VerbindungsZustand};
use crate::error::{SignalingError, SignalingResult};
use crate::server_state::SignalingState;

/// Erstellt einen Raum mit dem Absender als einzigem Mitglied
///
/// Der Absender erhaelt `room-id` und danach `room-update`.
pub fn handle_create_room(
    request: CreateRoomRequest,
    ctx: &mut DispatcherContext,
    state: &SignalingState,
) -> SignalingResult<()> {
    noch_ohne_raum(ctx)?;

    let (room_id, teilnehmer) =
        state
            .registry
            .raum_erstellen(request.identity, request.audio_only, ctx.connection_id)?;

    state.broadcaster.gruppe_beitreten(ctx.connection_id, room_id);
    ctx.zustand = VerbindungsZustand::ImRaum(room_id);

    state
        .broadcaster
        .an_client_senden(&ctx.connection_id, ServerEvent::RoomId { room_id });
    state.broadcaster.an_gruppe_senden(
        &room_id,
        ServerEvent::RoomUpdate {
            connected_users: vec![teilnehmer],
        },
    );
    Ok(())
}

/// Tritt einem bestehenden Raum bei
///
/// Bestehende Mitglieder erhalten `conn-prepare` fuer den Neuling, danach
/// alle Mitglieder (inklusive Neuling) den neuen Mitgliederstand.
pub fn handle_join_room(
    request: JoinRoomRequest,
    ctx: &mut DispatcherContext,
    state: &SignalingState,
) -> SignalingResult<()> {
    noch_ohne_raum(ctx)?;

    let JoinRoomRequest {
        identity,
        room_id: roh,
        audio_only,
    } = request;

    let room_id: RoomId = roh
        .parse()
        .map_err(|_| SignalingError::RaumNichtGefunden(roh.clone()))?;

    if state.config.kapazitaet_erzwingen {
        let belegung = state.registry.belegung(&room_id);
        if belegung.existiert && state.ist_voll(belegung.mitglieder) {
            return Err(SignalingError::RaumVoll(room_id));
        }
    }

    let (teilnehmer, raum) = state
        .registry
        .raum_beitreten(&room_id, identity, audio_only, ctx.connection_id)
        .map_err(|e| match e {
            SignalingError::RaumNichtGefunden(_) => SignalingError::RaumNichtGefunden(roh),
            andere => andere,
        })?;

    state.router.vorbereiten(ctx.connection_id, &raum.mitglieder);
    state.broadcaster.gruppe_beitreten(ctx.connection_id, room_id);
    ctx.zustand = VerbindungsZustand::ImRaum(room_id);

    tracing::debug!(
        connection_id = %ctx.connection_id,
        participant_id = %teilnehmer.id,
        room_id = %room_id,
        "Teilnehmer angelegt"
    );

    state.broadcaster.an_gruppe_senden(
        &room_id,
        ServerEvent::RoomUpdate {
            connected_users: raum.mitglieder,
        },
    );
    Ok(())
}

fn noch_ohne_raum(ctx: &DispatcherContext) -> SignalingResult<()> {
    match ctx.zustand {
        VerbindungsZustand::Verbunden => Ok(()),
        _ => Err(SignalingError::BereitsImRaum),
    }
}
