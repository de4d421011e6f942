//! RoomRegistry – Raum-Lebenszyklus (erstellen, beitreten, verlassen)
//!
//! Raeume werden als Mitgliederlisten von Verbindungs-IDs gehalten, die
//! Teilnehmer-Datensaetze selbst liegen im `UserDirectory`. Beide Maps sitzen
//! hinter einem gemeinsamen Lock, jede Operation ist atomar.
//!
//! ## Invarianten
//! - Ein Raum ohne Mitglieder existiert nicht (Loeschen passiert im selben
//!   Schritt wie der letzte Austritt)
//! - Mitgliederlisten und Verzeichnis enthalten genau dieselben Verbindungen
//! - Mitglieder behalten ihre Beitrittsreihenfolge

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use treffpunkt_core::{ConnectionId, Participant, RoomId};

use crate::directory::UserDirectory;
use crate::error::{SignalingError, SignalingResult};

// ---------------------------------------------------------------------------
// Schnappschuesse
// ---------------------------------------------------------------------------

/// Momentaufnahme eines Raums mit aufgeloesten Teilnehmern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    /// In Beitrittsreihenfolge
    pub mitglieder: Vec<Participant>,
}

/// Ergebnis von `RoomRegistry::verlassen`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerlassenErgebnis {
    /// Verbindung war in keinem Raum
    NichtVorhanden,
    /// Teilnehmer entfernt, der Raum besteht weiter
    Verlassen { raum: Room, teilnehmer: Participant },
    /// Letzter Teilnehmer entfernt, der Raum wurde geloescht
    RaumGeschlossen {
        raum_id: RoomId,
        teilnehmer: Participant,
    },
}

/// Existenz und Mitgliederzahl eines Raums
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaumBelegung {
    pub existiert: bool,
    pub mitglieder: usize,
}

// ---------------------------------------------------------------------------
// RoomRegistry
// ---------------------------------------------------------------------------

/// Raum-Registry
///
/// Thread-safe via Arc + Mutex. Clone teilt den inneren Zustand.
#[derive(Clone, Default)]
pub struct RoomRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

#[derive(Default)]
struct RegistryInner {
    verzeichnis: UserDirectory,
    raeume: HashMap<RoomId, Vec<ConnectionId>>,
}

impl RegistryInner {
    fn schnappschuss(&self, raum_id: &RoomId) -> Option<Room> {
        let ids = self.raeume.get(raum_id)?;
        let mitglieder = ids
            .iter()
            .filter_map(|cid| self.verzeichnis.suchen(cid).cloned())
            .collect();
        Some(Room {
            id: *raum_id,
            mitglieder,
        })
    }

    #[cfg(test)]
    fn konsistent(&self) -> bool {
        let mitglieder: usize = self.raeume.values().map(Vec::len).sum();
        let keine_leeren = self.raeume.values().all(|m| !m.is_empty());
        let alle_bekannt = self.raeume.iter().all(|(rid, ids)| {
            ids.iter().all(|cid| {
                self.verzeichnis
                    .suchen(cid)
                    .is_some_and(|t| &t.room_id == rid)
            })
        });
        keine_leeren && alle_bekannt && mitglieder == self.verzeichnis.anzahl()
    }
}

impl RoomRegistry {
    /// Erstellt eine leere Registry
    pub fn neu() -> Self {
        Self::default()
    }

    /// Erstellt einen neuen Raum mit dem Ersteller als einzigem Mitglied
    ///
    /// Schlaegt nur fehl, wenn die Verbindung bereits in einem Raum ist.
    pub fn raum_erstellen(
        &self,
        identity: impl Into<String>,
        audio_only: bool,
        connection_id: ConnectionId,
    ) -> SignalingResult<(RoomId, Participant)> {
        let mut inner = self.inner.lock();
        if inner.verzeichnis.enthaelt(&connection_id) {
            return Err(SignalingError::BereitsImRaum);
        }

        let raum_id = RoomId::new();
        let teilnehmer = Participant::neu(identity, connection_id, raum_id, audio_only);

        inner.verzeichnis.eintragen(teilnehmer.clone());
        inner.raeume.insert(raum_id, vec![connection_id]);

        tracing::info!(
            room_id = %raum_id,
            connection_id = %connection_id,
            "Raum erstellt"
        );
        Ok((raum_id, teilnehmer))
    }

    /// Haengt einen Teilnehmer an einen bestehenden Raum an
    ///
    /// Prueft keine Kapazitaet. Eine Verbindung, die schon in einem Raum
    /// ist, wird abgelehnt. Gibt den neuen Teilnehmer und einen
    /// Schnappschuss des Raums nach dem Beitritt zurueck.
    pub fn raum_beitreten(
        &self,
        raum_id: &RoomId,
        identity: impl Into<String>,
        audio_only: bool,
        connection_id: ConnectionId,
    ) -> SignalingResult<(Participant, Room)> {
        let mut inner = self.inner.lock();
        if inner.verzeichnis.enthaelt(&connection_id) {
            return Err(SignalingError::BereitsImRaum);
        }

        let Some(mitglieder) = inner.raeume.get_mut(raum_id) else {
            return Err(SignalingError::RaumNichtGefunden(raum_id.inner().to_string()));
        };
        mitglieder.push(connection_id);

        let teilnehmer = Participant::neu(identity, connection_id, *raum_id, audio_only);
        inner.verzeichnis.eintragen(teilnehmer.clone());

        let raum = inner
            .schnappschuss(raum_id)
            .ok_or_else(|| SignalingError::RaumNichtGefunden(raum_id.inner().to_string()))?;

        tracing::info!(
            room_id = %raum_id,
            connection_id = %connection_id,
            mitglieder = raum.mitglieder.len(),
            "Raum beigetreten"
        );
        Ok((teilnehmer, raum))
    }

    /// Entfernt die Verbindung aus ihrem Raum
    ///
    /// Loescht den Raum wenn er dadurch leer wird. Unbekannte Verbindungen
    /// sind ein No-op.
    pub fn verlassen(&self, connection_id: &ConnectionId) -> VerlassenErgebnis {
        let mut inner = self.inner.lock();

        let Some(teilnehmer) = inner.verzeichnis.entfernen(connection_id) else {
            return VerlassenErgebnis::NichtVorhanden;
        };
        let raum_id = teilnehmer.room_id;

        let leer = match inner.raeume.get_mut(&raum_id) {
            Some(mitglieder) => {
                mitglieder.retain(|cid| cid != connection_id);
                mitglieder.is_empty()
            }
            None => true,
        };

        if leer {
            inner.raeume.remove(&raum_id);
            tracing::info!(
                room_id = %raum_id,
                connection_id = %connection_id,
                "Letzter Teilnehmer gegangen, Raum geloescht"
            );
            return VerlassenErgebnis::RaumGeschlossen {
                raum_id,
                teilnehmer,
            };
        }

        tracing::info!(
            room_id = %raum_id,
            connection_id = %connection_id,
            "Raum verlassen"
        );
        match inner.schnappschuss(&raum_id) {
            Some(raum) => VerlassenErgebnis::Verlassen { raum, teilnehmer },
            None => VerlassenErgebnis::RaumGeschlossen {
                raum_id,
                teilnehmer,
            },
        }
    }

    /// Existenz und Mitgliederzahl eines Raums
    pub fn belegung(&self, raum_id: &RoomId) -> RaumBelegung {
        let inner = self.inner.lock();
        match inner.raeume.get(raum_id) {
            Some(mitglieder) => RaumBelegung {
                existiert: true,
                mitglieder: mitglieder.len(),
            },
            None => RaumBelegung {
                existiert: false,
                mitglieder: 0,
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn raum(&self, raum_id: &RoomId) -> Option<Room> {
        self.inner.lock().schnappschuss(raum_id)
    }

    pub fn raum_anzahl(&self) -> usize {
        self.inner.lock().raeume.len()
    }

    pub fn teilnehmer_anzahl(&self) -> usize {
        self.inner.lock().verzeichnis.anzahl()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ist_konsistent(registry: &RoomRegistry) -> bool {
        registry.inner.lock().konsistent()
    }

    #[test]
    fn raum_erstellen_mit_einem_mitglied() {
        let registry = RoomRegistry::neu();
        let conn = ConnectionId::new();

        let (raum_id, teilnehmer) = registry.raum_erstellen("anna", true, conn).unwrap();

        assert_eq!(teilnehmer.room_id, raum_id);
        assert_eq!(teilnehmer.connection_id, conn);
        assert!(teilnehmer.audio_only);

        let raum = registry.raum(&raum_id).unwrap();
        assert_eq!(raum.mitglieder, vec![teilnehmer]);
        assert!(ist_konsistent(&registry));
    }

    #[test]
    fn n_beitritte_ergeben_n_plus_eins_mitglieder() {
        let registry = RoomRegistry::neu();
        let (raum_id, _) = registry.raum_erstellen("anna", false, ConnectionId::new()).unwrap();

        for i in 0..5 {
            registry
                .raum_beitreten(&raum_id, format!("gast{i}"), false, ConnectionId::new())
                .unwrap();
        }

        let raum = registry.raum(&raum_id).unwrap();
        assert_eq!(raum.mitglieder.len(), 6);
        let eindeutig: HashSet<_> = raum.mitglieder.iter().map(|t| t.connection_id).collect();
        assert_eq!(eindeutig.len(), 6);
        assert!(ist_konsistent(&registry));
    }

    #[test]
    fn beitritt_haengt_am_ende_an() {
        let registry = RoomRegistry::neu();
        let (raum_id, _) = registry.raum_erstellen("anna", false, ConnectionId::new()).unwrap();
        registry
            .raum_beitreten(&raum_id, "ben", false, ConnectionId::new())
            .unwrap();
        let (_, raum) = registry
            .raum_beitreten(&raum_id, "cem", false, ConnectionId::new())
            .unwrap();

        let namen: Vec<&str> = raum.mitglieder.iter().map(|t| t.identity.as_str()).collect();
        assert_eq!(namen, vec!["anna", "ben", "cem"]);
    }

    #[test]
    fn beitritt_unbekannter_raum() {
        let registry = RoomRegistry::neu();
        let ergebnis = registry.raum_beitreten(&RoomId::new(), "ben", false, ConnectionId::new());
        assert!(matches!(ergebnis, Err(SignalingError::RaumNichtGefunden(_))));
        assert_eq!(registry.teilnehmer_anzahl(), 0);
    }

    #[test]
    fn beitritt_prueft_keine_kapazitaet() {
        let registry = RoomRegistry::neu();
        let (raum_id, _) = registry.raum_erstellen("anna", false, ConnectionId::new()).unwrap();
        for _ in 0..10 {
            assert!(registry
                .raum_beitreten(&raum_id, "gast", false, ConnectionId::new())
                .is_ok());
        }
        assert_eq!(registry.belegung(&raum_id).mitglieder, 11);
    }

    #[test]
    fn letzter_austritt_loescht_raum() {
        let registry = RoomRegistry::neu();
        let conn = ConnectionId::new();
        let (raum_id, _) = registry.raum_erstellen("anna", false, conn).unwrap();

        let ergebnis = registry.verlassen(&conn);
        assert!(matches!(
            ergebnis,
            VerlassenErgebnis::RaumGeschlossen { raum_id: r, .. } if r == raum_id
        ));

        let belegung = registry.belegung(&raum_id);
        assert!(!belegung.existiert);
        assert_eq!(registry.raum_anzahl(), 0);
        assert!(ist_konsistent(&registry));
    }

    #[test]
    fn austritt_mit_verbleibenden_mitgliedern() {
        let registry = RoomRegistry::neu();
        let anna = ConnectionId::new();
        let ben = ConnectionId::new();
        let (raum_id, _) = registry.raum_erstellen("anna", false, anna).unwrap();
        registry.raum_beitreten(&raum_id, "ben", false, ben).unwrap();

        match registry.verlassen(&ben) {
            VerlassenErgebnis::Verlassen { raum, teilnehmer } => {
                assert_eq!(teilnehmer.connection_id, ben);
                assert_eq!(raum.mitglieder.len(), 1);
                assert_eq!(raum.mitglieder[0].connection_id, anna);
            }
            andere => panic!("Falsches Ergebnis: {andere:?}"),
        }
        assert!(registry.belegung(&raum_id).existiert);
        assert!(ist_konsistent(&registry));
    }

    #[test]
    fn austritt_unbekannter_verbindung_ist_noop() {
        let registry = RoomRegistry::neu();
        let (raum_id, _) = registry.raum_erstellen("anna", false, ConnectionId::new()).unwrap();

        assert_eq!(
            registry.verlassen(&ConnectionId::new()),
            VerlassenErgebnis::NichtVorhanden
        );
        assert_eq!(registry.belegung(&raum_id).mitglieder, 1);
    }

    #[test]
    fn doppelter_austritt_ist_noop() {
        let registry = RoomRegistry::neu();
        let conn = ConnectionId::new();
        registry.raum_erstellen("anna", false, conn).unwrap();
        registry.verlassen(&conn);
        assert_eq!(registry.verlassen(&conn), VerlassenErgebnis::NichtVorhanden);
    }

    #[test]
    fn verbindung_in_raum_kann_nicht_erneut_erstellen_oder_beitreten() {
        let registry = RoomRegistry::neu();
        let anna = ConnectionId::new();
        let (raum_a, _) = registry.raum_erstellen("anna", false, anna).unwrap();
        let (raum_b, _) = registry.raum_erstellen("ben", false, ConnectionId::new()).unwrap();

        assert!(matches!(
            registry.raum_erstellen("anna", false, anna),
            Err(SignalingError::BereitsImRaum)
        ));
        assert!(matches!(
            registry.raum_beitreten(&raum_b, "anna", false, anna),
            Err(SignalingError::BereitsImRaum)
        ));

        assert_eq!(registry.raum_anzahl(), 2);
        assert_eq!(registry.belegung(&raum_a).mitglieder, 1);
        assert_eq!(registry.belegung(&raum_b).mitglieder, 1);
        assert!(ist_konsistent(&registry));
    }

    #[test]
    fn gemischte_ablaeufe_bleiben_konsistent() {
        let registry = RoomRegistry::neu();
        let mut verbindungen = Vec::new();

        for r in 0..3 {
            let ersteller = ConnectionId::new();
            let (raum_id, _) = registry.raum_erstellen(format!("raum{r}"), false, ersteller).unwrap();
            verbindungen.push(ersteller);
            for _ in 0..r {
                let gast = ConnectionId::new();
                registry.raum_beitreten(&raum_id, "gast", false, gast).unwrap();
                verbindungen.push(gast);
            }
        }
        assert!(ist_konsistent(&registry));

        for (i, conn) in verbindungen.iter().enumerate() {
            if i % 2 == 0 {
                registry.verlassen(conn);
                assert!(ist_konsistent(&registry));
            }
        }
        for conn in &verbindungen {
            registry.verlassen(conn);
        }
        assert_eq!(registry.raum_anzahl(), 0);
        assert_eq!(registry.teilnehmer_anzahl(), 0);
    }
}
