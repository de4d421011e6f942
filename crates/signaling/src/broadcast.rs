//! Event-Broadcaster – Transport-Gruppen und Send-Queues
//!
//! Der EventBroadcaster verwaltet die Send-Queues aller offenen
//! WebSocket-Verbindungen und die Zugehoerigkeit zu Multicast-Gruppen.
//! Gruppen entsprechen 1:1 den Raum-IDs.
//!
//! ## Zustellung
//! - An eine Verbindung: `an_client_senden`
//! - An eine Gruppe: `an_gruppe_senden`
//!
//! Zustellen ist immer nicht-blockierend (`try_send`). Volle oder
//! geschlossene Queues verwerfen das Event.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use treffpunkt_core::{ConnectionId, RoomId};
use treffpunkt_observability::RelayMetrics;
use treffpunkt_protocol::ServerEvent;

// ---------------------------------------------------------------------------
// Konfiguration
// ---------------------------------------------------------------------------

/// Groesse der Send-Queue pro Verbindung
const SEND_QUEUE_GROESSE: usize = 64;

// ---------------------------------------------------------------------------
// ClientSender
// ---------------------------------------------------------------------------

/// Handle auf die Send-Queue einer Verbindung
#[derive(Clone, Debug)]
pub struct ClientSender {
    pub connection_id: ConnectionId,
    pub tx: mpsc::Sender<ServerEvent>,
}

impl ClientSender {
    /// Reiht ein Event nicht-blockierend ein
    ///
    /// Gibt `false` zurueck wenn die Queue voll oder geschlossen ist.
    pub fn senden(&self, event: ServerEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(event)) => {
                tracing::warn!(
                    connection_id = %self.connection_id,
                    event = event.name(),
                    "Send-Queue voll – Event verworfen"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!(
                    connection_id = %self.connection_id,
                    "Send-Queue geschlossen (Verbindung getrennt)"
                );
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// EventBroadcaster
// ---------------------------------------------------------------------------

/// Zentraler Event-Broadcaster fuer alle offenen Verbindungen
///
/// Thread-safe via Arc + DashMap. Clone teilt den inneren Zustand.
#[derive(Clone)]
pub struct EventBroadcaster {
    inner: Arc<EventBroadcasterInner>,
}

struct EventBroadcasterInner {
    /// Send-Queues, indiziert nach Verbindungs-ID
    clients: DashMap<ConnectionId, ClientSender>,
    /// Gruppen-Mitgliedschaft: room_id -> Vec<ConnectionId>
    gruppen: DashMap<RoomId, Vec<ConnectionId>>,
    metriken: RelayMetrics,
}

impl EventBroadcaster {
    /// Erstellt einen neuen EventBroadcaster
    pub fn neu(metriken: RelayMetrics) -> Self {
        Self {
            inner: Arc::new(EventBroadcasterInner {
                clients: DashMap::new(),
                gruppen: DashMap::new(),
                metriken,
            }),
        }
    }

    /// Registriert eine Verbindung und gibt ihre Empfangs-Queue zurueck
    ///
    /// Die `ClientConnection` liest aus dieser Queue und schreibt auf den
    /// WebSocket.
    pub fn client_registrieren(&self, connection_id: ConnectionId) -> mpsc::Receiver<ServerEvent> {
        let (tx, rx) = mpsc::channel(SEND_QUEUE_GROESSE);
        let sender = ClientSender { connection_id, tx };
        self.inner.clients.insert(connection_id, sender);
        tracing::debug!(connection_id = %connection_id, "Verbindung im Broadcaster registriert");
        rx
    }

    /// Entfernt eine Verbindung samt Gruppen-Zugehoerigkeit
    pub fn client_entfernen(&self, connection_id: &ConnectionId) {
        self.inner.clients.remove(connection_id);
        self.gruppe_verlassen(connection_id);
        tracing::debug!(connection_id = %connection_id, "Verbindung aus Broadcaster entfernt");
    }

    /// Fuegt eine Verbindung einer Gruppe hinzu
    ///
    /// Eine Verbindung ist in hoechstens einer Gruppe.
    pub fn gruppe_beitreten(&self, connection_id: ConnectionId, room_id: RoomId) {
        self.gruppe_verlassen(&connection_id);
        self.inner
            .gruppen
            .entry(room_id)
            .or_default()
            .push(connection_id);
    }

    /// Entfernt eine Verbindung aus ihrer Gruppe
    pub fn gruppe_verlassen(&self, connection_id: &ConnectionId) {
        self.inner.gruppen.iter_mut().for_each(|mut entry| {
            entry.value_mut().retain(|cid| cid != connection_id);
        });
        self.inner.gruppen.retain(|_, mitglieder| !mitglieder.is_empty());
    }

    /// Sendet ein Event an eine einzelne Verbindung
    ///
    /// Gibt `true` zurueck wenn die Verbindung bekannt ist und das Event
    /// eingereiht wurde.
    pub fn an_client_senden(&self, connection_id: &ConnectionId, event: ServerEvent) -> bool {
        let name = event.name();
        let eingereiht = match self.inner.clients.get(connection_id) {
            Some(sender) => sender.senden(event),
            None => {
                tracing::debug!(connection_id = %connection_id, "Senden an unbekannte Verbindung");
                false
            }
        };
        self.zaehlen(name, eingereiht);
        eingereiht
    }

    /// Sendet ein Event an alle Verbindungen einer Gruppe
    ///
    /// Gibt die Anzahl der erfolgreichen Zustellungen zurueck.
    pub fn an_gruppe_senden(&self, room_id: &RoomId, event: ServerEvent) -> usize {
        let connection_ids = match self.inner.gruppen.get(room_id) {
            Some(ids) => ids.clone(),
            None => return 0,
        };

        connection_ids
            .iter()
            .filter(|connection_id| self.an_client_senden(connection_id, event.clone()))
            .count()
    }

    fn zaehlen(&self, event: &str, eingereiht: bool) {
        if eingereiht {
            self.inner
                .metriken
                .events_sent_total
                .with_label_values(&[event])
                .inc();
        } else {
            self.inner.metriken.events_dropped_total.inc();
        }
    }

    /// Anzahl registrierter Verbindungen
    pub fn client_anzahl(&self) -> usize {
        self.inner.clients.len()
    }

    #[cfg(test)]
    pub(crate) fn ist_registriert(&self, connection_id: &ConnectionId) -> bool {
        self.inner.clients.contains_key(connection_id)
    }

    #[cfg(test)]
    pub(crate) fn gruppen_mitglieder(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        self.inner
            .gruppen
            .get(room_id)
            .map(|ids| ids.clone())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
