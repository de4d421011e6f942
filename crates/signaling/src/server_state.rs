//! Gemeinsamer Server-Zustand fuer den Signaling-Service
//!
//! Haelt Registry, Broadcaster, Router und Chat als geteilte Handles,
//! die sicher zwischen tokio-Tasks geteilt werden koennen.

use parking_lot::Mutex;
use std::sync::Arc;
use treffpunkt_chat::{ChatRelay, VerlaufModus};
use treffpunkt_observability::{RelayMetrics, StatistikQuelle};

use crate::broadcast::EventBroadcaster;
use crate::registry::RoomRegistry;
use crate::router::SignalingRouter;

/// Konfiguration fuer den Signaling-Service
#[derive(Debug, Clone)]
pub struct SignalingConfig {
    /// Mitgliederzahl ab der ein Raum als voll gilt
    pub max_teilnehmer: usize,
    /// Beitritte zu vollen Raeumen mit `room-full` ablehnen
    pub kapazitaet_erzwingen: bool,
    /// Welcher Chat-Verlauf an einen Raum verteilt wird
    pub chat_verlauf: VerlaufModus,
    /// Keepalive-Intervall in Sekunden (0 = aus)
    pub keepalive_sek: u64,
    /// Timeout fuer inaktive Verbindungen in Sekunden (0 = aus)
    pub verbindungs_timeout_sek: u64,
}

impl Default for SignalingConfig {
    fn default() -> Self {
        Self {
            max_teilnehmer: 4,
            kapazitaet_erzwingen: false,
            chat_verlauf: VerlaufModus::Raum,
            keepalive_sek: 30,
            verbindungs_timeout_sek: 90,
        }
    }
}

/// Gemeinsamer Server-Zustand (thread-safe, Arc-geteilt)
pub struct SignalingState {
    pub config: Arc<SignalingConfig>,
    pub registry: RoomRegistry,
    pub broadcaster: EventBroadcaster,
    pub router: SignalingRouter,
    pub chat: ChatRelay,
    pub metriken: RelayMetrics,
    /// Serialisiert die Verarbeitung eingehender Events
    pub(crate) schritt_sperre: Mutex<()>,
}

impl SignalingState {
    /// Erstellt einen neuen SignalingState
    pub fn neu(config: SignalingConfig, metriken: RelayMetrics) -> Arc<Self> {
        let broadcaster = EventBroadcaster::neu(metriken.clone());
        Arc::new(Self {
            config: Arc::new(config),
            registry: RoomRegistry::neu(),
            router: SignalingRouter::neu(broadcaster.clone()),
            broadcaster,
            chat: ChatRelay::neu(),
            metriken,
            schritt_sperre: Mutex::new(()),
        })
    }

    /// Ob ein Raum mit dieser Mitgliederzahl als voll gilt
    pub fn ist_voll(&self, mitglieder: usize) -> bool {
        mitglieder >= self.config.max_teilnehmer
    }

    /// Setzt die Zustands-Gauges auf die aktuellen Registry-Werte
    pub(crate) fn gauges_aktualisieren(&self) {
        self.metriken
            .rooms_active
            .set(self.registry.raum_anzahl() as i64);
        self.metriken
            .participants_active
            .set(self.registry.teilnehmer_anzahl() as i64);
    }
}

impl StatistikQuelle for SignalingState {
    fn raum_anzahl(&self) -> usize {
        self.registry.raum_anzahl()
    }

    fn verbindungs_anzahl(&self) -> usize {
        self.broadcaster.client_anzahl()
    }
}
