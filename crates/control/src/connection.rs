//! Client-Connection – Verwaltet eine einzelne TCP-Verbindung
//!
//! Jede TCP-Verbindung bekommt eine `ClientConnection` in einem eigenen
//! tokio-Task.
//!
//! ## State Machine
//! ```text
//! Begruessung -> Aktiv -> Geschlossen
//! ```
//!
//! - `Begruessung`: in der Registry eintragen, Willkommenszeile senden
//! - `Aktiv`: gleichzeitig auf Socket, Hinweis-Queue und Shutdown warten
//! - `Geschlossen`: aus der Registry austragen, Socket schliessen. Dieser
//!   Schritt laeuft auf jedem Pfad (quit, Client weg, IO-Fehler, Shutdown).
//!
//! Es gibt keinen Leerlauf-Timeout: ein stiller Client belegt seinen Task
//! bis er die Verbindung schliesst.

use smarttv_core::ConnectionId;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};

use crate::error::ControlResult;
use crate::server_state::ControlState;

pub const WILLKOMMEN: &str = "Welcome to the Smart TV server. Type 'ON' to begin.\n";
pub const ABSCHIED: &str = "Until next time!\n";
pub const INTERNER_FEHLER: &str = "ERROR: Internal handler bug (no response)";

// ---------------------------------------------------------------------------
// Verbindungszustand
// ---------------------------------------------------------------------------

/// Zustand der TCP-Verbindung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbindungsZustand {
    /// Registriert, Willkommenszeile wird gesendet
    Begruessung,
    /// Befehle werden verarbeitet
    Aktiv,
    /// Verbindung beendet
    Geschlossen,
}

/// Warum eine Sitzung regulaer endete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trennungsgrund {
    /// Client hat `quit` gesendet
    Quit,
    /// Client hat den Socket geschlossen
    ClientGetrennt,
    /// Server faehrt herunter
    Shutdown,
}

// ---------------------------------------------------------------------------
// ClientConnection
// ---------------------------------------------------------------------------

/// Verarbeitet eine einzelne TCP-Verbindung
pub struct ClientConnection {
    state: Arc<ControlState>,
    peer_addr: SocketAddr,
    id: ConnectionId,
    zustand: VerbindungsZustand,
}

impl ClientConnection {
    pub fn neu(state: Arc<ControlState>, peer_addr: SocketAddr) -> Self {
        Self {
            state,
            peer_addr,
            id: ConnectionId::new(),
            zustand: VerbindungsZustand::Begruessung,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn zustand(&self) -> VerbindungsZustand {
        self.zustand
    }

    /// Startet die Verarbeitungsschleife und raeumt danach immer auf
    pub async fn verarbeiten(
        mut self,
        mut stream: TcpStream,
        shutdown_rx: watch::Receiver<bool>,
    ) {
        let peer_addr = self.peer_addr;
        tracing::info!(peer = %peer_addr, verbindung = %self.id, "Neue Verbindung");

        let hinweis_rx = self.state.registry.registrieren(self.id, peer_addr);

        let (mut leser, mut schreiber) = stream.split();
        let ergebnis = self
            .sitzung(&mut leser, &mut schreiber, hinweis_rx, shutdown_rx)
            .await;

        self.schliessen();
        if let Err(e) = stream.shutdown().await {
            tracing::trace!(peer = %peer_addr, fehler = %e, "Socket-Shutdown fehlgeschlagen");
        }

        match ergebnis {
            Ok(grund) => {
                tracing::info!(peer = %peer_addr, grund = ?grund, "Verbindung beendet");
            }
            Err(e) => {
                tracing::warn!(peer = %peer_addr, fehler = %e, "Verbindung wegen Fehler beendet");
            }
        }
    }

    /// Die eigentliche Sitzung: Begruessung, dann Befehlsschleife
    ///
    /// Generisch ueber Lese- und Schreibhaelfte, damit sie ohne echten
    /// Socket testbar ist.
    pub async fn sitzung<R, W>(
        &mut self,
        leser: &mut R,
        schreiber: &mut W,
        mut hinweis_rx: mpsc::Receiver<String>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> ControlResult<Trennungsgrund>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        schreiber.write_all(WILLKOMMEN.as_bytes()).await?;
        self.zustand = VerbindungsZustand::Aktiv;

        let mut puffer = vec![0u8; self.state.config.lese_puffer_bytes];

        loop {
            tokio::select! {
                // Eingehender Befehl vom Client
                gelesen = leser.read(&mut puffer) => {
                    let n = gelesen?;
                    if n == 0 {
                        return Ok(Trennungsgrund::ClientGetrennt);
                    }

                    let befehl = String::from_utf8_lossy(&puffer[..n]);
                    let befehl = befehl.trim();

                    if befehl.eq_ignore_ascii_case("quit") {
                        schreiber.write_all(ABSCHIED.as_bytes()).await?;
                        return Ok(Trennungsgrund::Quit);
                    }

                    self.befehl_ausfuehren(befehl, schreiber).await?;
                }

                // Hinweis einer anderen Verbindung
                Some(hinweis) = hinweis_rx.recv() => {
                    schreiber.write_all(hinweis.as_bytes()).await?;
                }

                // Shutdown-Signal
                Ok(()) = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        tracing::debug!(peer = %self.peer_addr, "Shutdown-Signal – Verbindung wird getrennt");
                        return Ok(Trennungsgrund::Shutdown);
                    }
                }
            }
        }
    }

    /// Dispatcht einen Befehl, antwortet und verteilt ggf. den Kanalwechsel
    async fn befehl_ausfuehren<W>(&self, befehl: &str, schreiber: &mut W) -> ControlResult<()>
    where
        W: AsyncWrite + Unpin,
    {
        tracing::debug!(peer = %self.peer_addr, befehl, "Befehl empfangen");

        let antwort = self.state.dispatcher.handle(befehl);

        let text = if antwort.text.is_empty() {
            tracing::warn!(befehl, "Handler lieferte keine Antwort");
            INTERNER_FEHLER
        } else {
            antwort.text.as_str()
        };
        schreiber.write_all(text.as_bytes()).await?;

        if let Some(ereignis) = antwort.ereignis {
            let empfaenger = self
                .state
                .registry
                .an_alle_ausser_senden(Some(&self.id), &ereignis.hinweis_text());
            tracing::info!(
                verbindung = %self.id,
                ereignis = ?ereignis,
                empfaenger,
                "Hinweis an andere Clients verteilt"
            );
        }

        Ok(())
    }

    fn schliessen(&mut self) {
        self.state.registry.entfernen(&self.id);
        self.zustand = VerbindungsZustand::Geschlossen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server_state::ControlConfig;
    use smarttv_core::DeviceHandle;
    use tokio::io::duplex;

    fn state() -> Arc<ControlState> {
        ControlState::neu(ControlConfig::default(), DeviceHandle::default()).unwrap()
    }

    fn addr() -> SocketAddr {
        "127.0.0.1:50000".parse().unwrap()
    }

    async fn lesen(client: &mut tokio::io::DuplexStream) -> String {
        let mut buf = vec![0u8; 4096];
        let n = client.read(&mut buf).await.unwrap();
        String::from_utf8_lossy(&buf[..n]).into_owned()
    }

    #[tokio::test]
    async fn begruessung_befehl_und_quit() {
        let state = state();
        let (mut client, server) = duplex(4096);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let mut conn = ClientConnection::neu(Arc::clone(&state), addr());
        let rx = state.registry.registrieren(conn.id(), addr());

        let task = tokio::spawn(async move {
            let (mut leser, mut schreiber) = tokio::io::split(server);
            let grund = conn
                .sitzung(&mut leser, &mut schreiber, rx, shutdown_rx)
                .await
                .unwrap();
            (grund, conn.zustand())
        });

        assert_eq!(lesen(&mut client).await, WILLKOMMEN);

        client.write_all(b"status").await.unwrap();
        assert_eq!(
            lesen(&mut client).await,
            "ERROR: TV is switched OFF. Turn it ON first."
        );

        client.write_all(b"on").await.unwrap();
        assert!(lesen(&mut client).await.starts_with("TV switched ON"));

        client.write_all(b"QUIT\n").await.unwrap();
        assert_eq!(lesen(&mut client).await, ABSCHIED);

        let (grund, zustand) = task.await.unwrap();
        assert_eq!(grund, Trennungsgrund::Quit);
        assert_eq!(zustand, VerbindungsZustand::Aktiv);
    }

    #[tokio::test]
    async fn ungueltiges_utf8_ist_nicht_fatal() {
        let state = state();
        let (mut client, server) = duplex(4096);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let mut conn = ClientConnection::neu(Arc::clone(&state), addr());
        let rx = state.registry.registrieren(conn.id(), addr());
        let task = tokio::spawn(async move {
            let (mut leser, mut schreiber) = tokio::io::split(server);
            conn.sitzung(&mut leser, &mut schreiber, rx, shutdown_rx).await
        });

        lesen(&mut client).await;
        client.write_all(&[0xff, 0xfe, b'x']).await.unwrap();
        assert_eq!(
            lesen(&mut client).await,
            "ERROR: TV is switched OFF. Turn it ON first."
        );

        drop(client);
        assert_eq!(task.await.unwrap().unwrap(), Trennungsgrund::ClientGetrennt);
    }

    #[tokio::test]
    async fn hinweis_aus_queue_wird_geschrieben() {
        let state = state();
        let (mut client, server) = duplex(4096);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let mut conn = ClientConnection::neu(Arc::clone(&state), addr());
        let rx = state.registry.registrieren(conn.id(), addr());
        let task = tokio::spawn(async move {
            let (mut leser, mut schreiber) = tokio::io::split(server);
            conn.sitzung(&mut leser, &mut schreiber, rx, shutdown_rx).await
        });

        lesen(&mut client).await;
        state
            .registry
            .an_alle_ausser_senden(None, "[Notice] Channel changed to 9\n");
        assert_eq!(lesen(&mut client).await, "[Notice] Channel changed to 9\n");

        shutdown_tx.send(true).unwrap();
        assert_eq!(task.await.unwrap().unwrap(), Trennungsgrund::Shutdown);
    }
}
