//! Message-Dispatcher – Verbindungs-Lebenszyklus und Event-Routing
//!
//! Der Dispatcher empfaengt dekodierte Events einer ClientConnection,
//! prueft den Verbindungszustand und ruft den passenden Handler auf.
//! Fehler gehen als Event an den Absender zurueck.
//!
//! ## Zustandsmaschine
//! ```text
//! Verbunden --create/join--> ImRaum(raum)
//!     |                          |
//!     +-------> Getrennt <-------+
//! ```
//!
//! Jeder Aufruf laeuft komplett unter der Schritt-Sperre des
//! SignalingState und suspendiert nie.

use std::sync::Arc;

use treffpunkt_core::{ConnectionId, RoomId};
use treffpunkt_protocol::{ClientEvent, ProtocolError, ServerEvent};

use crate::error::{SignalingError, SignalingResult};
use crate::handlers::{chat_handler, room_handler, signal_handler};
use crate::registry::VerlassenErgebnis;
use crate::server_state::SignalingState;

// ---------------------------------------------------------------------------
// Verbindungszustand
// ---------------------------------------------------------------------------

/// Zustand einer Verbindung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbindungsZustand {
    /// Verbunden, noch in keinem Raum
    Verbunden,
    /// Mitglied eines Raums
    ImRaum(RoomId),
    /// Verbindung beendet, Aufraeumen erledigt
    Getrennt,
}

/// Dispatcher-Kontext – Informationen ueber die aktuelle Verbindung
#[derive(Debug)]
pub struct DispatcherContext {
    pub connection_id: ConnectionId,
    pub zustand: VerbindungsZustand,
}

impl DispatcherContext {
    pub fn neu(connection_id: ConnectionId) -> Self {
        Self {
            connection_id,
            zustand: VerbindungsZustand::Verbunden,
        }
    }

    /// Raum der Verbindung, falls vorhanden
    pub fn raum(&self) -> Option<RoomId> {
        match self.zustand {
            VerbindungsZustand::ImRaum(room_id) => Some(room_id),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// MessageDispatcher
// ---------------------------------------------------------------------------

/// Zentraler Event-Dispatcher
pub struct MessageDispatcher {
    state: Arc<SignalingState>,
}

impl MessageDispatcher {
    /// Erstellt einen neuen Dispatcher
    pub fn neu(state: Arc<SignalingState>) -> Self {
        Self { state }
    }

    /// Verarbeitet ein eingehendes Event
    pub fn dispatch(&self, event: ClientEvent, ctx: &mut DispatcherContext) {
        let name = event.name();
        self.state
            .metriken
            .events_received_total
            .with_label_values(&[name])
            .inc();

        if ctx.zustand == VerbindungsZustand::Getrennt {
            tracing::debug!(
                connection_id = %ctx.connection_id,
                event = name,
                "Event nach Trennung ignoriert"
            );
            return;
        }

        let _schritt = self.state.schritt_sperre.lock();
        let state = self.state.as_ref();

        let ergebnis: SignalingResult<()> = match event {
            ClientEvent::CreateRoom(req) => room_handler::handle_create_room(req, ctx, state),
            ClientEvent::JoinRoom(req) => room_handler::handle_join_room(req, ctx, state),
            ClientEvent::SendMessage(req) => chat_handler::handle_send_message(req, ctx, state),
            ClientEvent::ConnSignal(req) => {
                signal_handler::handle_conn_signal(req, ctx, state);
                Ok(())
            }
            ClientEvent::ConnInit(req) => {
                signal_handler::handle_conn_init(req, ctx, state);
                Ok(())
            }
        };

        if let Err(fehler) = ergebnis {
            self.fehler_senden(ctx, name, &fehler);
        }
        state.gauges_aktualisieren();
    }

    /// Meldet einen nicht dekodierbaren Frame an den Absender
    ///
    /// Die Verbindung bleibt offen.
    pub fn protokollfehler_melden(&self, ctx: &DispatcherContext, fehler: ProtocolError) {
        self.state
            .metriken
            .events_received_total
            .with_label_values(&["ungueltig"])
            .inc();
        self.fehler_senden(ctx, "ungueltig", &SignalingError::from(fehler));
    }

    fn fehler_senden(&self, ctx: &DispatcherContext, event: &str, fehler: &SignalingError) {
        tracing::debug!(
            connection_id = %ctx.connection_id,
            event,
            fehler = %fehler,
            "Event abgelehnt"
        );
        self.state
            .broadcaster
            .an_client_senden(&ctx.connection_id, fehler.als_event());
    }

    /// Raeumt eine beendete Verbindung auf
    ///
    /// Bleibt der Raum bestehen, erhalten die restlichen Mitglieder
    /// `user-disconnected` und danach `room-update`. Wurde der Raum
    /// geloescht, geht nichts raus. Mehrfacher Aufruf ist harmlos.
    pub fn trennen(&self, ctx: &mut DispatcherContext) {
        if ctx.zustand == VerbindungsZustand::Getrennt {
            return;
        }

        let _schritt = self.state.schritt_sperre.lock();
        let connection_id = ctx.connection_id;
        ctx.zustand = VerbindungsZustand::Getrennt;

        self.state.broadcaster.gruppe_verlassen(&connection_id);

        match self.state.registry.verlassen(&connection_id) {
            VerlassenErgebnis::NichtVorhanden => {
                tracing::debug!(connection_id = %connection_id, "Getrennt ohne Raum");
            }
            VerlassenErgebnis::RaumGeschlossen { raum_id, .. } => {
                tracing::info!(
                    connection_id = %connection_id,
                    room_id = %raum_id,
                    "Getrennt, Raum geschlossen"
                );
            }
            VerlassenErgebnis::Verlassen { raum, .. } => {
                tracing::info!(
                    connection_id = %connection_id,
                    room_id = %raum.id,
                    verbleibend = raum.mitglieder.len(),
                    "Getrennt, Raum besteht weiter"
                );
                self.state
                    .broadcaster
                    .an_gruppe_senden(&raum.id, ServerEvent::UserDisconnected { connection_id });
                self.state.broadcaster.an_gruppe_senden(
                    &raum.id,
                    ServerEvent::RoomUpdate {
                        connected_users: raum.mitglieder,
                    },
                );
            }
        }

        self.state.gauges_aktualisieren();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use treffpunkt_chat::VerlaufModus;
    use treffpunkt_observability::RelayMetrics;
    use treffpunkt_protocol::events::{
        ConnInitRequest, ConnSignalRequest, CreateRoomRequest, JoinRoomRequest,
        SendMessageRequest,
    };
    use treffpunkt_protocol::ErrorCode;

    use crate::server_state::SignalingConfig;

    /// Eine simulierte Verbindung mit eigener Empfangs-Queue
    struct TestClient {
        ctx: DispatcherContext,
        rx: mpsc::Receiver<ServerEvent>,
    }

    impl TestClient {
        fn id(&self) -> ConnectionId {
            self.ctx.connection_id
        }

        fn alle_empfangen(&mut self) -> Vec<ServerEvent> {
            let mut events = Vec::new();
            while let Ok(event) = self.rx.try_recv() {
                events.push(event);
            }
            events
        }
    }

    struct Aufbau {
        state: Arc<SignalingState>,
        dispatcher: MessageDispatcher,
    }

    impl Aufbau {
        fn neu(config: SignalingConfig) -> Self {
            let state = SignalingState::neu(config, RelayMetrics::neu().unwrap());
            let dispatcher = MessageDispatcher::neu(Arc::clone(&state));
            Self { state, dispatcher }
        }

        fn verbinden(&self) -> TestClient {
            let connection_id = ConnectionId::new();
            let rx = self.state.broadcaster.client_registrieren(connection_id);
            TestClient {
                ctx: DispatcherContext::neu(connection_id),
                rx,
            }
        }

        fn erstellen(&self, client: &mut TestClient, identity: &str) -> RoomId {
            self.dispatcher.dispatch(
                ClientEvent::CreateRoom(CreateRoomRequest {
                    identity: identity.into(),
                    audio_only: false,
                }),
                &mut client.ctx,
            );
            client.ctx.raum().expect("Raum muss erstellt sein")
        }

        fn beitreten(&self, client: &mut TestClient, room_id: &str, identity: &str) {
            self.dispatcher.dispatch(
                ClientEvent::JoinRoom(JoinRoomRequest {
                    identity: identity.into(),
                    room_id: room_id.into(),
                    audio_only: false,
                }),
                &mut client.ctx,
            );
        }

        fn trennen(&self, client: &mut TestClient) {
            self.dispatcher.trennen(&mut client.ctx);
            self.state.broadcaster.client_entfernen(&client.id());
        }
    }

    fn mitglieder_ids(event: &ServerEvent) -> Vec<ConnectionId> {
        match event {
            ServerEvent::RoomUpdate { connected_users } => {
                connected_users.iter().map(|t| t.connection_id).collect()
            }
            andere => panic!("room-update erwartet, bekommen: {andere:?}"),
        }
    }

    fn fehler_code(event: &ServerEvent) -> ErrorCode {
        match event {
            ServerEvent::Error { code, .. } => *code,
            andere => panic!("error erwartet, bekommen: {andere:?}"),
        }
    }

    #[test]
    fn erstellen_sendet_room_id_und_update() {
        let aufbau = Aufbau::neu(SignalingConfig::default());
        let mut anna = aufbau.verbinden();

        let room_id = aufbau.erstellen(&mut anna, "anna");

        let events = anna.alle_empfangen();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], ServerEvent::RoomId { room_id });
        assert_eq!(mitglieder_ids(&events[1]), vec![anna.id()]);
        assert_eq!(aufbau.state.metriken.rooms_active.get(), 1);
    }

    #[test]
    fn szenario_erstellen_beitreten_trennen() {
        let aufbau = Aufbau::neu(SignalingConfig::default());
        let mut a = aufbau.verbinden();
        let mut b = aufbau.verbinden();

        // A erstellt R
        let room_id = aufbau.erstellen(&mut a, "anna");
        a.alle_empfangen();

        // B tritt bei
        aufbau.beitreten(&mut b, &room_id.inner().to_string(), "ben");

        let events_a = a.alle_empfangen();
        assert_eq!(
            events_a[0],
            ServerEvent::ConnPrepare {
                conn_user_connection_id: b.id()
            }
        );
        assert_eq!(mitglieder_ids(&events_a[1]), vec![a.id(), b.id()]);
        assert_eq!(events_a.len(), 2);

        let events_b = b.alle_empfangen();
        assert_eq!(events_b.len(), 1, "Neuling bekommt kein conn-prepare");
        assert_eq!(mitglieder_ids(&events_b[0]), vec![a.id(), b.id()]);

        // B trennt
        aufbau.trennen(&mut b);
        let events_a = a.alle_empfangen();
        assert_eq!(
            events_a[0],
            ServerEvent::UserDisconnected {
                connection_id: b.id()
            }
        );
        assert_eq!(mitglieder_ids(&events_a[1]), vec![a.id()]);
        assert!(aufbau.state.registry.belegung(&room_id).existiert);

        // A trennt, Raum ist weg
        aufbau.trennen(&mut a);
        assert!(!aufbau.state.registry.belegung(&room_id).existiert);
        assert_eq!(aufbau.state.metriken.rooms_active.get(), 0);
        assert_eq!(aufbau.state.metriken.participants_active.get(), 0);
    }

    #[test]
    fn beitritt_unbekannter_raum() {
        let aufbau = Aufbau::neu(SignalingConfig::default());
        let mut ben = aufbau.verbinden();

        let unbekannt = RoomId::new().inner().to_string();
        aufbau.beitreten(&mut ben, &unbekannt, "ben");

        assert_eq!(
            ben.alle_empfangen(),
            vec![ServerEvent::RoomNotFound { room_id: unbekannt }]
        );
        assert_eq!(ben.ctx.zustand, VerbindungsZustand::Verbunden);
    }

    #[test]
    fn beitritt_mit_unparsebarer_raum_id() {
        let aufbau = Aufbau::neu(SignalingConfig::default());
        let mut ben = aufbau.verbinden();

        aufbau.beitreten(&mut ben, "kein-raum", "ben");
        assert_eq!(
            ben.alle_empfangen(),
            vec![ServerEvent::RoomNotFound {
                room_id: "kein-raum".into()
            }]
        );
    }

    #[test]
    fn doppeltes_erstellen_wird_abgelehnt() {
        let aufbau = Aufbau::neu(SignalingConfig::default());
        let mut anna = aufbau.verbinden();
        aufbau.erstellen(&mut anna, "anna");
        anna.alle_empfangen();

        aufbau.dispatcher.dispatch(
            ClientEvent::CreateRoom(CreateRoomRequest {
                identity: "anna".into(),
                audio_only: false,
            }),
            &mut anna.ctx,
        );

        let events = anna.alle_empfangen();
        assert_eq!(events.len(), 1);
        assert_eq!(fehler_code(&events[0]), ErrorCode::AlreadyInRoom);
        assert_eq!(aufbau.state.registry.raum_anzahl(), 1);
    }

    #[test]
    fn beitritt_aus_einem_raum_wird_abgelehnt() {
        let aufbau = Aufbau::neu(SignalingConfig::default());
        let mut anna = aufbau.verbinden();
        let mut ben = aufbau.verbinden();
        let raum_anna = aufbau.erstellen(&mut anna, "anna");
        aufbau.erstellen(&mut ben, "ben");
        ben.alle_empfangen();

        aufbau.beitreten(&mut ben, &raum_anna.inner().to_string(), "ben");

        let events = ben.alle_empfangen();
        assert_eq!(fehler_code(&events[0]), ErrorCode::AlreadyInRoom);
        assert_eq!(aufbau.state.registry.belegung(&raum_anna).mitglieder, 1);
    }

    #[test]
    fn kapazitaet_ohne_erzwingen_unbegrenzt() {
        let aufbau = Aufbau::neu(SignalingConfig::default());
        let mut anna = aufbau.verbinden();
        let room_id = aufbau.erstellen(&mut anna, "anna");
        let roh = room_id.inner().to_string();

        let mut gaeste: Vec<TestClient> = (0..5).map(|_| aufbau.verbinden()).collect();
        for gast in &mut gaeste {
            aufbau.beitreten(gast, &roh, "gast");
        }
        assert_eq!(aufbau.state.registry.belegung(&room_id).mitglieder, 6);
    }

    #[test]
    fn kapazitaet_erzwingen_sendet_room_full() {
        let aufbau = Aufbau::neu(SignalingConfig {
            kapazitaet_erzwingen: true,
            max_teilnehmer: 2,
            ..SignalingConfig::default()
        });
        let mut anna = aufbau.verbinden();
        let mut ben = aufbau.verbinden();
        let mut cem = aufbau.verbinden();
        let room_id = aufbau.erstellen(&mut anna, "anna");
        let roh = room_id.inner().to_string();

        aufbau.beitreten(&mut ben, &roh, "ben");
        aufbau.beitreten(&mut cem, &roh, "cem");

        assert_eq!(
            cem.alle_empfangen(),
            vec![ServerEvent::RoomFull { room_id }]
        );
        assert_eq!(cem.ctx.zustand, VerbindungsZustand::Verbunden);
        assert_eq!(aufbau.state.registry.belegung(&room_id).mitglieder, 2);
    }

    #[test]
    fn signale_erreichen_nur_das_ziel() {
        let aufbau = Aufbau::neu(SignalingConfig::default());
        let mut a = aufbau.verbinden();
        let mut b = aufbau.verbinden();
        let mut c = aufbau.verbinden();
        let room_id = aufbau.erstellen(&mut a, "a");
        let roh = room_id.inner().to_string();
        aufbau.beitreten(&mut b, &roh, "b");
        aufbau.beitreten(&mut c, &roh, "c");
        a.alle_empfangen();
        b.alle_empfangen();
        c.alle_empfangen();

        let signal = serde_json::json!({ "candidate": "x" });
        aufbau.dispatcher.dispatch(
            ClientEvent::ConnSignal(ConnSignalRequest {
                conn_user_connection_id: b.id().inner().to_string(),
                signal: signal.clone(),
            }),
            &mut a.ctx,
        );
        aufbau.dispatcher.dispatch(
            ClientEvent::ConnInit(ConnInitRequest {
                conn_user_connection_id: b.id().inner().to_string(),
            }),
            &mut a.ctx,
        );

        assert_eq!(
            b.alle_empfangen(),
            vec![
                ServerEvent::ConnSignal {
                    signal,
                    conn_user_connection_id: a.id()
                },
                ServerEvent::ConnInit {
                    conn_user_connection_id: a.id()
                },
            ]
        );
        assert!(a.alle_empfangen().is_empty());
        assert!(c.alle_empfangen().is_empty());
    }

    #[test]
    fn signal_an_unbekanntes_ziel_wird_verworfen() {
        let aufbau = Aufbau::neu(SignalingConfig::default());
        let mut a = aufbau.verbinden();

        aufbau.dispatcher.dispatch(
            ClientEvent::ConnInit(ConnInitRequest {
                conn_user_connection_id: ConnectionId::new().inner().to_string(),
            }),
            &mut a.ctx,
        );
        assert!(a.alle_empfangen().is_empty());
    }

    #[test]
    fn signal_an_unparsebares_ziel_wird_still_verworfen() {
        let aufbau = Aufbau::neu(SignalingConfig::default());
        let mut a = aufbau.verbinden();
        let mut b = aufbau.verbinden();
        let room_id = aufbau.erstellen(&mut a, "a");
        aufbau.beitreten(&mut b, &room_id.inner().to_string(), "b");
        a.alle_empfangen();
        b.alle_empfangen();

        aufbau.dispatcher.dispatch(
            ClientEvent::ConnSignal(ConnSignalRequest {
                conn_user_connection_id: "kein-uuid".into(),
                signal: serde_json::json!({ "type": "offer" }),
            }),
            &mut a.ctx,
        );
        aufbau.dispatcher.dispatch(
            ClientEvent::ConnInit(ConnInitRequest {
                conn_user_connection_id: String::new(),
            }),
            &mut a.ctx,
        );

        assert!(a.alle_empfangen().is_empty(), "kein error-Event an den Absender");
        assert!(b.alle_empfangen().is_empty());
    }

    fn nachricht(room_id: RoomId, text: &str) -> ClientEvent {
        ClientEvent::SendMessage(SendMessageRequest {
            identity: "anna".into(),
            room_id: room_id.inner().to_string(),
            message: text.into(),
        })
    }

    fn verlauf_inhalte(event: &ServerEvent) -> Vec<String> {
        match event {
            ServerEvent::GetAllMessages { messages } => {
                messages.iter().map(|m| m.content.clone()).collect()
            }
            andere => panic!("get-all-messages erwartet, bekommen: {andere:?}"),
        }
    }

    #[test]
    fn chat_verlauf_an_alle_im_raum() {
        let aufbau = Aufbau::neu(SignalingConfig::default());
        let mut a = aufbau.verbinden();
        let mut b = aufbau.verbinden();
        let room_id = aufbau.erstellen(&mut a, "anna");
        aufbau.beitreten(&mut b, &room_id.inner().to_string(), "ben");
        a.alle_empfangen();
        b.alle_empfangen();

        aufbau.dispatcher.dispatch(nachricht(room_id, "hallo"), &mut a.ctx);
        aufbau.dispatcher.dispatch(nachricht(room_id, "welt"), &mut a.ctx);

        let events_b = b.alle_empfangen();
        assert_eq!(events_b.len(), 2);
        assert_eq!(verlauf_inhalte(&events_b[1]), vec!["hallo", "welt"]);

        let events_a = a.alle_empfangen();
        assert_eq!(verlauf_inhalte(&events_a[1]), vec!["hallo", "welt"]);
        assert_eq!(aufbau.state.metriken.chat_messages_total.get(), 2);
    }

    #[test]
    fn chat_verlauf_pro_raum_getrennt() {
        let aufbau = Aufbau::neu(SignalingConfig::default());
        let mut a = aufbau.verbinden();
        let mut b = aufbau.verbinden();
        let raum_a = aufbau.erstellen(&mut a, "anna");
        let raum_b = aufbau.erstellen(&mut b, "ben");
        a.alle_empfangen();
        b.alle_empfangen();

        aufbau.dispatcher.dispatch(nachricht(raum_a, "a1"), &mut a.ctx);
        aufbau.dispatcher.dispatch(nachricht(raum_b, "b1"), &mut b.ctx);

        let events_b = b.alle_empfangen();
        assert_eq!(verlauf_inhalte(&events_b[0]), vec!["b1"]);
    }

    #[test]
    fn chat_verlauf_global() {
        let aufbau = Aufbau::neu(SignalingConfig {
            chat_verlauf: VerlaufModus::Global,
            ..SignalingConfig::default()
        });
        let mut a = aufbau.verbinden();
        let mut b = aufbau.verbinden();
        let raum_a = aufbau.erstellen(&mut a, "anna");
        let raum_b = aufbau.erstellen(&mut b, "ben");
        a.alle_empfangen();
        b.alle_empfangen();

        aufbau.dispatcher.dispatch(nachricht(raum_a, "a1"), &mut a.ctx);
        aufbau.dispatcher.dispatch(nachricht(raum_b, "b1"), &mut b.ctx);

        let events_b = b.alle_empfangen();
        assert_eq!(verlauf_inhalte(&events_b[0]), vec!["a1", "b1"]);
        // Raum A bekommt die Nachricht aus Raum B nicht zugestellt
        assert_eq!(a.alle_empfangen().len(), 1);
    }

    #[test]
    fn chat_ohne_raum_wird_abgelehnt() {
        let aufbau = Aufbau::neu(SignalingConfig::default());
        let mut a = aufbau.verbinden();

        aufbau
            .dispatcher
            .dispatch(nachricht(RoomId::new(), "hallo"), &mut a.ctx);

        let events = a.alle_empfangen();
        assert_eq!(fehler_code(&events[0]), ErrorCode::NotInRoom);
        assert_eq!(aufbau.state.chat.anzahl(), 0);
    }

    #[test]
    fn chat_an_fremden_raum_wird_abgelehnt() {
        let aufbau = Aufbau::neu(SignalingConfig::default());
        let mut a = aufbau.verbinden();
        let mut b = aufbau.verbinden();
        aufbau.erstellen(&mut a, "anna");
        let raum_b = aufbau.erstellen(&mut b, "ben");
        a.alle_empfangen();
        b.alle_empfangen();

        aufbau.dispatcher.dispatch(nachricht(raum_b, "eindringen"), &mut a.ctx);

        assert_eq!(fehler_code(&a.alle_empfangen()[0]), ErrorCode::NotInRoom);
        assert!(b.alle_empfangen().is_empty());
    }

    #[test]
    fn protokollfehler_an_absender() {
        let aufbau = Aufbau::neu(SignalingConfig::default());
        let mut a = aufbau.verbinden();

        aufbau
            .dispatcher
            .protokollfehler_melden(&a.ctx, ProtocolError::UnbekanntesEvent("x".into()));

        assert_eq!(fehler_code(&a.alle_empfangen()[0]), ErrorCode::InvalidRequest);
        assert_eq!(a.ctx.zustand, VerbindungsZustand::Verbunden);
    }

    #[test]
    fn trennen_ohne_raum_sendet_nichts() {
        let aufbau = Aufbau::neu(SignalingConfig::default());
        let mut a = aufbau.verbinden();
        let mut b = aufbau.verbinden();
        aufbau.erstellen(&mut b, "ben");
        b.alle_empfangen();

        aufbau.trennen(&mut a);
        assert!(b.alle_empfangen().is_empty());
        assert_eq!(a.ctx.zustand, VerbindungsZustand::Getrennt);
    }

    #[test]
    fn doppeltes_trennen_ist_harmlos() {
        let aufbau = Aufbau::neu(SignalingConfig::default());
        let mut a = aufbau.verbinden();
        let mut b = aufbau.verbinden();
        let room_id = aufbau.erstellen(&mut a, "anna");
        aufbau.beitreten(&mut b, &room_id.inner().to_string(), "ben");
        a.alle_empfangen();

        aufbau.dispatcher.trennen(&mut b.ctx);
        aufbau.dispatcher.trennen(&mut b.ctx);

        assert_eq!(a.alle_empfangen().len(), 2);
    }

    #[test]
    fn events_nach_trennung_werden_ignoriert() {
        let aufbau = Aufbau::neu(SignalingConfig::default());
        let mut a = aufbau.verbinden();
        aufbau.dispatcher.trennen(&mut a.ctx);

        aufbau.dispatcher.dispatch(
            ClientEvent::CreateRoom(CreateRoomRequest {
                identity: "anna".into(),
                audio_only: false,
            }),
            &mut a.ctx,
        );
        assert_eq!(aufbau.state.registry.raum_anzahl(), 0);
    }
}
