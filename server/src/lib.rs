//! treffpunkt-server – Bibliotheks-Root
//!
//! Verdrahtet Konfiguration, Signaling-Server und Observability-Server
//! und stellt den Einstiegspunkt fuer Tests bereit.

pub mod config;

use anyhow::Result;
use config::ServerConfig;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use treffpunkt_observability::{observability_server_starten, RelayMetrics, StatistikQuelle};
use treffpunkt_signaling::{SignalingServer, SignalingState};

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Startet alle Subsysteme und laeuft bis Ctrl-C
    pub async fn starten(self) -> Result<()> {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Shutdown-Signal empfangen, Server wird beendet"),
                Err(e) => tracing::error!(fehler = %e, "Ctrl-C-Handler nicht verfuegbar"),
            }
            let _ = shutdown_tx.send(true);
        });

        self.laufen(shutdown_rx).await
    }

    /// Startet alle Subsysteme und laeuft bis `shutdown_rx` auf `true` springt
    ///
    /// Reihenfolge:
    /// 1. Signaling-Socket binden
    /// 2. Metriken und Signaling-Zustand anlegen
    /// 3. Observability-Server starten (falls aktiviert)
    /// 4. Signaling-Server bis zum Shutdown bedienen
    ///
    /// Scheitert der Signaling-Server, wird der Observability-Task abgebrochen.
    pub async fn laufen(self, shutdown_rx: watch::Receiver<bool>) -> Result<()> {
        let signaling_addr = self.config.signaling_bind_adresse()?;
        tracing::info!(
            server_name = %self.config.server.name,
            adresse = %signaling_addr,
            max_teilnehmer = self.config.signaling.max_teilnehmer,
            kapazitaet_erzwingen = self.config.signaling.kapazitaet_erzwingen,
            "Server startet"
        );

        let listener = TcpListener::bind(signaling_addr).await?;
        let metriken = RelayMetrics::neu()?;
        let state = SignalingState::neu(self.config.signaling_config(), metriken.clone());

        let observability = if self.config.observability.aktiviert {
            let addr = self.config.observability_bind_adresse()?;
            let quelle: Arc<dyn StatistikQuelle> = state.clone();
            let rx = shutdown_rx.clone();
            Some(tokio::spawn(async move {
                if let Err(e) = observability_server_starten(addr, metriken, quelle, rx).await {
                    tracing::error!(fehler = %e, "Observability-Server fehlgeschlagen");
                }
            }))
        } else {
            tracing::info!("Observability-Server deaktiviert");
            None
        };

        let server = SignalingServer::neu(state, signaling_addr, self.config.netzwerk.cors_origins);
        let ergebnis = server.mit_listener_starten(listener, shutdown_rx).await;

        if let Some(task) = observability {
            if ergebnis.is_err() {
                task.abort();
            } else {
                task.await?;
            }
        }
        ergebnis?;

        tracing::info!("Server beendet");
        Ok(())
    }
}
