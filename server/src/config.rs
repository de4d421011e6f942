//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist.

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use treffpunkt_chat::VerlaufModus;
use treffpunkt_observability::logging::{log_format_gueltig, log_level_gueltig};
use treffpunkt_signaling::SignalingConfig;

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Allgemeine Server-Einstellungen
    pub server: ServerEinstellungen,
    /// Netzwerk-Einstellungen
    pub netzwerk: NetzwerkEinstellungen,
    /// Raeume, Kapazitaet und Keepalive
    pub signaling: SignalingEinstellungen,
    /// Chat-Einstellungen
    pub chat: ChatEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
    /// Observability-Einstellungen (Metriken, Health)
    pub observability: ObservabilityEinstellungen,
}

/// Allgemeine Server-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    /// Anzeigename des Servers (nur fuer Logs)
    pub name: String,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self {
            name: "Treffpunkt".into(),
        }
    }
}

/// Netzwerk-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetzwerkEinstellungen {
    /// Bind-Adresse fuer HTTP und WebSocket
    pub bind_adresse: String,
    /// Port fuer HTTP und WebSocket (ueberschreibbar per `PORT`)
    pub port: u16,
    /// Erlaubte CORS-Origins (leer = alle erlaubt)
    pub cors_origins: Vec<String>,
}

impl Default for NetzwerkEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 5002,
            cors_origins: vec![],
        }
    }
}

/// Signaling-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalingEinstellungen {
    /// Mitgliederzahl ab der ein Raum als voll gemeldet wird
    pub max_teilnehmer: usize,
    /// Beitritte zu vollen Raeumen ablehnen
    pub kapazitaet_erzwingen: bool,
    /// Keepalive-Ping-Intervall in Sekunden (0 = aus)
    pub keepalive_sek: u64,
    /// Trennen nach so vielen Sekunden ohne Empfang (0 = aus)
    pub verbindungs_timeout_sek: u64,
}

impl Default for SignalingEinstellungen {
    fn default() -> Self {
        Self {
            max_teilnehmer: 4,
            kapazitaet_erzwingen: false,
            keepalive_sek: 30,
            verbindungs_timeout_sek: 90,
        }
    }
}

/// Chat-Einstellungen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatEinstellungen {
    /// "raum" oder "global"
    pub verlauf: VerlaufModus,
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

/// Observability-Einstellungen (Metriken + Health-Check)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityEinstellungen {
    /// Aktiviert den Observability-Server
    pub aktiviert: bool,
    /// Port fuer Metriken und Health (Standard: 9300)
    pub port: u16,
}

impl Default for ObservabilityEinstellungen {
    fn default() -> Self {
        Self {
            aktiviert: true,
            port: 9300,
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> Result<Self> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config: Self = toml::from_str(&inhalt)
                    .map_err(|e| anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Ok(Self::default())
            }
            Err(e) => Err(anyhow!("Konfigurationsdatei '{pfad}' nicht lesbar: {e}")),
        }
    }

    /// Ueberschreibt den Port (Wert der Umgebungsvariable `PORT`)
    pub fn port_ueberschreiben(&mut self, wert: &str) -> Result<()> {
        self.netzwerk.port = wert
            .trim()
            .parse()
            .map_err(|e| anyhow!("Ungueltiger Port '{wert}': {e}"))?;
        Ok(())
    }

    /// Prueft die Konfiguration auf unzulaessige Werte
    pub fn validieren(&self) -> Result<()> {
        if !log_level_gueltig(&self.logging.level) {
            bail!("Unbekannter Log-Level '{}'", self.logging.level);
        }
        if !log_format_gueltig(&self.logging.format) {
            bail!("Unbekanntes Log-Format '{}'", self.logging.format);
        }
        if self.signaling.max_teilnehmer == 0 {
            bail!("signaling.max_teilnehmer muss groesser als 0 sein");
        }
        let s = &self.signaling;
        if s.keepalive_sek > 0 && s.verbindungs_timeout_sek > 0 && s.verbindungs_timeout_sek <= s.keepalive_sek {
            bail!(
                "signaling.verbindungs_timeout_sek ({}) muss groesser als keepalive_sek ({}) sein",
                s.verbindungs_timeout_sek,
                s.keepalive_sek
            );
        }
        self.signaling_bind_adresse()?;
        if self.observability.aktiviert {
            self.observability_bind_adresse()?;
        }
        Ok(())
    }

    /// Gibt die Bind-Adresse fuer HTTP und WebSocket zurueck
    pub fn signaling_bind_adresse(&self) -> Result<SocketAddr> {
        bind_adresse(&self.netzwerk.bind_adresse, self.netzwerk.port)
    }

    /// Gibt die Bind-Adresse fuer den Observability-Server zurueck
    pub fn observability_bind_adresse(&self) -> Result<SocketAddr> {
        bind_adresse(&self.netzwerk.bind_adresse, self.observability.port)
    }

    /// Laufzeit-Konfiguration fuer den Signaling-Service
    pub fn signaling_config(&self) -> SignalingConfig {
        SignalingConfig {
            max_teilnehmer: self.signaling.max_teilnehmer,
            kapazitaet_erzwingen: self.signaling.kapazitaet_erzwingen,
            chat_verlauf: self.chat.verlauf,
            keepalive_sek: self.signaling.keepalive_sek,
            verbindungs_timeout_sek: self.signaling.verbindungs_timeout_sek,
        }
    }
}

fn bind_adresse(host: &str, port: u16) -> Result<SocketAddr> {
    format!("{host}:{port}")
        .parse()
        .map_err(|e| anyhow!("Ungueltige Bind-Adresse '{host}:{port}': {e}"))
}
