//! smarttv-server – Bibliotheks-Root
//!
//! Verdrahtet Konfiguration, Fernseher-Zustand und TCP-Steuerprotokoll und
//! stellt den oeffentlichen Einstiegspunkt fuer `main.rs` bereit.

pub mod config;

use anyhow::{Context, Result};
use config::ServerConfig;
use smarttv_control::{ControlState, TvServer};
use smarttv_core::{DeviceHandle, SmartTv};
use std::sync::Arc;
use tokio::sync::watch;

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Baut den gemeinsamen Zustand aus der Konfiguration
    pub fn zustand_erstellen(&self) -> Result<Arc<ControlState>> {
        let fernseher = SmartTv::neu(self.config.fernseher.kanal_anzahl)?;
        let control_config = self.config.control_config()?;
        let state = ControlState::neu(control_config, DeviceHandle::neu(fernseher))?;
        Ok(state)
    }

    /// Startet den TCP-Listener und laeuft bis zum Shutdown-Signal
    ///
    /// Reihenfolge:
    /// 1. Fernseher und Registry anlegen
    /// 2. Listener binden (Fehler beenden den Prozess)
    /// 3. Verbindungen bedienen bis Ctrl-C
    /// 4. Shutdown an alle Verbindungen verteilen
    pub async fn starten(self) -> Result<()> {
        let state = self.zustand_erstellen()?;

        tracing::info!(
            tcp = %self.config.tcp_bind_adresse(),
            kanaele = self.config.fernseher.kanal_anzahl,
            app = %state.config.app.kennung(),
            "Server startet"
        );

        let server = TvServer::neu(Arc::clone(&state));
        let listener = server
            .binden()
            .with_context(|| format!("TCP-Bind auf {} fehlgeschlagen", self.config.tcp_bind_adresse()))?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let signal_task = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Ctrl-C empfangen, Server wird beendet"),
                Err(e) => {
                    tracing::error!(fehler = %e, "Signal-Handler konnte nicht installiert werden");
                    return;
                }
            }
            let _ = shutdown_tx.send(true);
        });

        let ergebnis = server.bedienen(listener, shutdown_rx).await;
        signal_task.abort();

        tracing::info!(
            laufzeit_sek = state.uptime_sek(),
            verbleibende_verbindungen = state.registry.anzahl(),
            "Server beendet"
        );

        ergebnis.context("TCP-Listener abgebrochen")
    }
}
