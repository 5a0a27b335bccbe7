//! Connection-Registry – Menge aller aktiven Verbindungen
//!
//! Die Registry haelt pro Verbindung die Sende-Queue, aus der die
//! `ClientConnection` liest und auf den Socket schreibt. Hinweise an andere
//! Clients werden nur eingereiht, nie direkt auf einen fremden Socket
//! geschrieben.
//!
//! ## Broadcast
//! 1. Mitglieder unter der Sperre als Snapshot kopieren
//! 2. Sperre freigeben, dann an jedes Mitglied ausser dem Ausloeser
//!    nicht-blockierend einreihen (`try_send`)
//! 3. Geschlossene Queues (Client getrennt) danach entfernen
//!
//! Eine volle Queue (langsamer Client) verwirft nur diesen einen Hinweis.

use dashmap::DashMap;
use smarttv_core::ConnectionId;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Konfiguration
// ---------------------------------------------------------------------------

/// Standard-Groesse der Send-Queue pro Verbindung
pub const SEND_QUEUE_GROESSE: usize = 32;

// ---------------------------------------------------------------------------
// ClientSender
// ---------------------------------------------------------------------------

/// Ergebnis eines einzelnen Sendeversuchs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendeErgebnis {
    Eingereiht,
    /// Queue voll, Nachricht verworfen
    Voll,
    /// Empfaenger existiert nicht mehr
    Geschlossen,
}

/// Handle auf die Send-Queue einer Verbindung
#[derive(Clone, Debug)]
pub struct ClientSender {
    pub id: ConnectionId,
    pub peer_addr: SocketAddr,
    pub tx: mpsc::Sender<String>,
}

impl ClientSender {
    /// Reiht eine Nachricht nicht-blockierend ein
    pub fn senden(&self, nachricht: String) -> SendeErgebnis {
        match self.tx.try_send(nachricht) {
            Ok(()) => SendeErgebnis::Eingereiht,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(
                    verbindung = %self.id,
                    peer = %self.peer_addr,
                    "Send-Queue voll – Hinweis verworfen"
                );
                SendeErgebnis::Voll
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!(
                    verbindung = %self.id,
                    "Send-Queue geschlossen (Client getrennt)"
                );
                SendeErgebnis::Geschlossen
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ConnectionRegistry
// ---------------------------------------------------------------------------

/// Thread-sichere Registry aller verbundenen Clients
///
/// Clone teilt den inneren Zustand.
#[derive(Clone)]
pub struct ConnectionRegistry {
    inner: Arc<RegistryInner>,
}

struct RegistryInner {
    clients: DashMap<ConnectionId, ClientSender>,
    queue_groesse: usize,
}

impl ConnectionRegistry {
    pub fn neu() -> Self {
        Self::mit_queue_groesse(SEND_QUEUE_GROESSE)
    }

    /// Registry mit eigener Queue-Groesse (mindestens 1)
    pub fn mit_queue_groesse(queue_groesse: usize) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                clients: DashMap::new(),
                queue_groesse: queue_groesse.max(1),
            }),
        }
    }

    /// Registriert eine Verbindung und gibt ihre Empfangs-Queue zurueck
    pub fn registrieren(
        &self,
        id: ConnectionId,
        peer_addr: SocketAddr,
    ) -> mpsc::Receiver<String> {
        let (tx, rx) = mpsc::channel(self.inner.queue_groesse);
        self.inner
            .clients
            .insert(id, ClientSender { id, peer_addr, tx });
        tracing::debug!(verbindung = %id, peer = %peer_addr, "Verbindung registriert");
        rx
    }

    /// Entfernt eine Verbindung, kein Fehler wenn sie fehlt
    pub fn entfernen(&self, id: &ConnectionId) {
        if self.inner.clients.remove(id).is_some() {
            tracing::debug!(verbindung = %id, "Verbindung aus Registry entfernt");
        }
    }

    /// Sendet einen Hinweis an alle Verbindungen ausser `ausgeschlossen`
    ///
    /// Gibt die Anzahl der eingereihten Nachrichten zurueck. Schlaegt nie fehl.
    pub fn an_alle_ausser_senden(
        &self,
        ausgeschlossen: Option<&ConnectionId>,
        nachricht: &str,
    ) -> usize {
        let empfaenger: Vec<ClientSender> = self
            .inner
            .clients
            .iter()
            .filter(|entry| Some(entry.key()) != ausgeschlossen)
            .map(|entry| entry.value().clone())
            .collect();

        let mut gesendet = 0;
        let mut getrennt = Vec::new();
        for sender in &empfaenger {
            match sender.senden(nachricht.to_string()) {
                SendeErgebnis::Eingereiht => gesendet += 1,
                SendeErgebnis::Voll => {}
                SendeErgebnis::Geschlossen => getrennt.push(sender.id),
            }
        }

        for id in &getrennt {
            self.entfernen(id);
        }

        gesendet
    }

    /// Anzahl registrierter Verbindungen
    pub fn anzahl(&self) -> usize {
        self.inner.clients.len()
    }

    pub fn ist_registriert(&self, id: &ConnectionId) -> bool {
        self.inner.clients.contains_key(id)
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::neu()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    #[tokio::test]
    async fn registrieren_und_entfernen() {
        let registry = ConnectionRegistry::neu();
        let id = ConnectionId::new();

        let _rx = registry.registrieren(id, addr());
        assert!(registry.ist_registriert(&id));
        assert_eq!(registry.anzahl(), 1);

        registry.entfernen(&id);
        assert!(!registry.ist_registriert(&id));
        // zweites Entfernen ist ein No-Op
        registry.entfernen(&id);
        assert_eq!(registry.anzahl(), 0);
    }

    #[tokio::test]
    async fn ausloeser_bekommt_nichts() {
        let registry = ConnectionRegistry::neu();
        let a = ConnectionId::new();
        let b = ConnectionId::new();
        let c = ConnectionId::new();

        let mut rx_a = registry.registrieren(a, addr());
        let mut rx_b = registry.registrieren(b, addr());
        let mut rx_c = registry.registrieren(c, addr());

        let gesendet = registry.an_alle_ausser_senden(Some(&a), "hinweis");
        assert_eq!(gesendet, 2);

        assert!(rx_a.try_recv().is_err(), "Ausloeser darf nichts empfangen");
        assert_eq!(rx_b.try_recv().unwrap(), "hinweis");
        assert_eq!(rx_c.try_recv().unwrap(), "hinweis");
    }

    #[tokio::test]
    async fn ohne_ausschluss_an_alle() {
        let registry = ConnectionRegistry::neu();
        let mut receivers: Vec<_> = (0..4)
            .map(|_| registry.registrieren(ConnectionId::new(), addr()))
            .collect();

        assert_eq!(registry.an_alle_ausser_senden(None, "x"), 4);
        for rx in &mut receivers {
            assert!(rx.try_recv().is_ok());
        }
    }

    #[tokio::test]
    async fn geschlossene_queue_wird_entfernt() {
        let registry = ConnectionRegistry::neu();
        let lebendig = ConnectionId::new();
        let getrennt = ConnectionId::new();

        let mut rx = registry.registrieren(lebendig, addr());
        drop(registry.registrieren(getrennt, addr()));

        let gesendet = registry.an_alle_ausser_senden(None, "hinweis");
        assert_eq!(gesendet, 1);
        assert!(rx.try_recv().is_ok());
        assert!(!registry.ist_registriert(&getrennt));
        assert!(registry.ist_registriert(&lebendig));
    }

    #[tokio::test]
    async fn volle_queue_verwirft_nur_den_hinweis() {
        let registry = ConnectionRegistry::mit_queue_groesse(1);
        let langsam = ConnectionId::new();
        let mut rx = registry.registrieren(langsam, addr());

        assert_eq!(registry.an_alle_ausser_senden(None, "eins"), 1);
        assert_eq!(registry.an_alle_ausser_senden(None, "zwei"), 0);

        assert!(registry.ist_registriert(&langsam));
        assert_eq!(rx.try_recv().unwrap(), "eins");
        assert!(rx.try_recv().is_err());
    }
}
