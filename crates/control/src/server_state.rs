//! Gemeinsamer Server-Zustand fuer das Steuerprotokoll
//!
//! Haelt den Fernseher, den Dispatcher und die Registry zusammen. Wird
//! einmal beim Start gebaut und als `Arc` an jede Verbindung gereicht.

use smarttv_core::DeviceHandle;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::broadcast::{ConnectionRegistry, SEND_QUEUE_GROESSE};
use crate::dispatcher::{AppInfo, CommandDispatcher};
use crate::error::{ControlError, ControlResult};

/// Standard-Groesse eines einzelnen Lesevorgangs in Bytes
pub const LESE_PUFFER_BYTES: usize = 1024;

/// Konfiguration fuer das Steuerprotokoll
#[derive(Debug, Clone)]
pub struct ControlConfig {
    /// Bind-Adresse des TCP-Listeners
    pub bind_addr: SocketAddr,
    /// Maximale Bytes pro Lesevorgang
    pub lese_puffer_bytes: usize,
    /// Groesse der Hinweis-Queue pro Verbindung
    pub sende_queue_groesse: usize,
    /// Name und Version fuer `version`
    pub app: AppInfo,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 1238)),
            lese_puffer_bytes: LESE_PUFFER_BYTES,
            sende_queue_groesse: SEND_QUEUE_GROESSE,
            app: AppInfo::default(),
        }
    }
}

impl ControlConfig {
    /// Prueft die Werte, die zur Laufzeit nicht 0 sein duerfen
    pub fn pruefen(&self) -> ControlResult<()> {
        if self.lese_puffer_bytes == 0 {
            return Err(ControlError::Konfiguration(
                "lese_puffer_bytes muss mindestens 1 sein".into(),
            ));
        }
        if self.sende_queue_groesse == 0 {
            return Err(ControlError::Konfiguration(
                "sende_queue_groesse muss mindestens 1 sein".into(),
            ));
        }
        Ok(())
    }
}

/// Gemeinsamer Zustand (thread-safe, Arc-geteilt)
pub struct ControlState {
    pub config: Arc<ControlConfig>,
    /// Dispatcher mit dem einen Fernseher
    pub dispatcher: CommandDispatcher,
    /// Alle aktiven Verbindungen
    pub registry: ConnectionRegistry,
    /// Startzeitpunkt des Servers
    pub start_time: Instant,
}

impl ControlState {
    pub fn neu(config: ControlConfig, device: DeviceHandle) -> ControlResult<Arc<Self>> {
        config.pruefen()?;
        let dispatcher = CommandDispatcher::neu(device, config.app.clone());
        let registry = ConnectionRegistry::mit_queue_groesse(config.sende_queue_groesse);
        Ok(Arc::new(Self {
            config: Arc::new(config),
            dispatcher,
            registry,
            start_time: Instant::now(),
        }))
    }

    /// Gibt die Uptime in Sekunden zurueck
    pub fn uptime_sek(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
