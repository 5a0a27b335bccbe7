//! TCP-Listener – Bindet Socket, akzeptiert Verbindungen
//!
//! Der `TvServer` bindet einen TCP-Socket mit `SO_REUSEADDR`, damit ein
//! neu gestarteter Server sofort wieder binden kann, waehrend der alte Socket
//! noch in TIME_WAIT haengt. Fuer jede eingehende Verbindung startet er einen
//! eigenen tokio-Task mit einer `ClientConnection`.
//!
//! ## Fehlerverhalten
//! Bind- und Accept-Fehler werden an den Aufrufer zurueckgegeben und beenden
//! den Server. Fehler einer einzelnen Verbindung bleiben in ihrem Task.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpSocket};
use tokio::sync::watch;

use crate::connection::ClientConnection;
use crate::server_state::ControlState;

/// Backlog fuer `listen()`
const LISTEN_BACKLOG: u32 = 1024;

/// TCP-Server fuer das Steuerprotokoll
pub struct TvServer {
    state: Arc<ControlState>,
}

impl TvServer {
    pub fn neu(state: Arc<ControlState>) -> Self {
        Self { state }
    }

    /// Bindet die konfigurierte Adresse mit `SO_REUSEADDR`
    pub fn binden(&self) -> std::io::Result<TcpListener> {
        binden(self.state.config.bind_addr)
    }

    /// Bindet und bedient Verbindungen bis `shutdown_rx` `true` meldet
    pub async fn starten(self, shutdown_rx: watch::Receiver<bool>) -> std::io::Result<()> {
        let listener = self.binden()?;
        self.bedienen(listener, shutdown_rx).await
    }

    /// Accept-Loop auf einem bereits gebundenen Listener
    pub async fn bedienen(
        self,
        listener: TcpListener,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> std::io::Result<()> {
        let lokale_addr = listener.local_addr()?;
        tracing::info!(adresse = %lokale_addr, "SmartTV-Server lauscht");

        loop {
            tokio::select! {
                // Neue eingehende Verbindung
                result = listener.accept() => {
                    let (stream, peer_addr) = match result {
                        Ok(verbindung) => verbindung,
                        Err(e) => {
                            tracing::error!(fehler = %e, "TCP-Accept-Fehler – Server wird beendet");
                            return Err(e);
                        }
                    };

                    tracing::debug!(peer = %peer_addr, "Verbindung akzeptiert");

                    let verbindung = ClientConnection::neu(Arc::clone(&self.state), peer_addr);
                    let shutdown_rx_clone = shutdown_rx.clone();
                    tokio::spawn(async move {
                        verbindung.verarbeiten(stream, shutdown_rx_clone).await;
                    });
                }

                // Shutdown-Signal
                Ok(()) = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        tracing::info!("Shutdown-Signal empfangen");
                        break;
                    }
                }
            }
        }

        tracing::info!(
            aktive_verbindungen = self.state.registry.anzahl(),
            "SmartTV-Server gestoppt"
        );
        Ok(())
    }
}

/// Bindet `addr` als Listener mit `SO_REUSEADDR`
pub fn binden(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4()?,
        SocketAddr::V6(_) => TcpSocket::new_v6()?,
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    socket.listen(LISTEN_BACKLOG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reuseaddr_erlaubt_sofortiges_neubinden() {
        let erster = binden("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = erster.local_addr().unwrap();

        // Verbindung aufbauen und schliessen, damit ein TIME_WAIT entsteht
        let client = tokio::net::TcpStream::connect(addr).await.unwrap();
        let (server_seite, _) = erster.accept().await.unwrap();
        drop(server_seite);
        drop(client);
        drop(erster);

        let zweiter = binden(addr).unwrap();
        assert_eq!(zweiter.local_addr().unwrap(), addr);
    }
}
