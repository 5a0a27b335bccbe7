//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist.

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use smarttv_control::{AppInfo, ControlConfig};
use smarttv_core::STANDARD_KANAL_ANZAHL;
use smarttv_observability::{log_format_gueltig, log_level_gueltig};
use std::net::{SocketAddr, ToSocketAddrs};

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Netzwerk-Einstellungen
    pub netzwerk: NetzwerkEinstellungen,
    /// Einstellungen des simulierten Fernsehers
    pub fernseher: FernseherEinstellungen,
    /// Einstellungen pro Client-Verbindung
    pub verbindung: VerbindungsEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

/// Netzwerk-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetzwerkEinstellungen {
    /// Host oder IP fuer den TCP-Listener
    pub bind_adresse: String,
    /// Port fuer den TCP-Listener
    pub tcp_port: u16,
}

impl Default for NetzwerkEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "127.0.0.1".into(),
            tcp_port: 1238,
        }
    }
}

/// Einstellungen des simulierten Fernsehers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FernseherEinstellungen {
    /// Anzahl verfuegbarer Kanaele (mindestens 1)
    pub kanal_anzahl: u32,
    /// Name fuer den `version`-Befehl
    pub app_name: String,
    /// Version fuer den `version`-Befehl
    pub app_version: String,
}

impl Default for FernseherEinstellungen {
    fn default() -> Self {
        Self {
            kanal_anzahl: STANDARD_KANAL_ANZAHL,
            app_name: "SmartTV".into(),
            app_version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// Einstellungen pro Client-Verbindung
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerbindungsEinstellungen {
    /// Maximale Bytes pro Lesevorgang
    pub lese_puffer_bytes: usize,
    /// Groesse der Hinweis-Queue pro Client
    pub sende_queue_groesse: usize,
}

impl Default for VerbindungsEinstellungen {
    fn default() -> Self {
        Self {
            lese_puffer_bytes: 1024,
            sende_queue_groesse: 32,
        }
    }
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

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        let config = match std::fs::read_to_string(pfad) {
            Ok(inhalt) => Self::aus_toml(&inhalt)
                .with_context(|| format!("Konfigurationsfehler in '{pfad}'"))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Self::default()
            }
            Err(e) => {
                return Err(anyhow!("Konfigurationsdatei '{pfad}' nicht lesbar: {e}"));
            }
        };
        Ok(config)
    }

    /// Parst und validiert eine Konfiguration aus einem TOML-String
    pub fn aus_toml(inhalt: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(inhalt)?;
        config.pruefen()?;
        Ok(config)
    }

    /// Prueft Werte, die serde allein nicht abdeckt
    pub fn pruefen(&self) -> anyhow::Result<()> {
        if self.fernseher.kanal_anzahl == 0 {
            return Err(anyhow!("fernseher.kanal_anzahl muss mindestens 1 sein"));
        }
        if self.verbindung.lese_puffer_bytes == 0 {
            return Err(anyhow!("verbindung.lese_puffer_bytes muss mindestens 1 sein"));
        }
        if self.verbindung.sende_queue_groesse == 0 {
            return Err(anyhow!("verbindung.sende_queue_groesse muss mindestens 1 sein"));
        }
        if !log_level_gueltig(&self.logging.level) {
            return Err(anyhow!("Ungueltiges Log-Level '{}'", self.logging.level));
        }
        if !log_format_gueltig(&self.logging.format) {
            return Err(anyhow!("Ungueltiges Log-Format '{}'", self.logging.format));
        }
        Ok(())
    }

    /// Gibt die vollstaendige Bind-Adresse fuer TCP zurueck
    pub fn tcp_bind_adresse(&self) -> String {
        format!("{}:{}", self.netzwerk.bind_adresse, self.netzwerk.tcp_port)
    }

    /// Loest die Bind-Adresse auf (Hostnamen wie `localhost` erlaubt)
    pub fn tcp_socket_adresse(&self) -> anyhow::Result<SocketAddr> {
        let adresse = self.tcp_bind_adresse();
        (self.netzwerk.bind_adresse.as_str(), self.netzwerk.tcp_port)
            .to_socket_addrs()
            .with_context(|| format!("Bind-Adresse '{adresse}' nicht aufloesbar"))?
            .next()
            .ok_or_else(|| anyhow!("Bind-Adresse '{adresse}' ergibt keine Socket-Adresse"))
    }

    /// Baut die Konfiguration des Steuerprotokolls
    pub fn control_config(&self) -> anyhow::Result<ControlConfig> {
        Ok(ControlConfig {
            bind_addr: self.tcp_socket_adresse()?,
            lese_puffer_bytes: self.verbindung.lese_puffer_bytes,
            sende_queue_groesse: self.verbindung.sende_queue_groesse,
            app: AppInfo::neu(&self.fernseher.app_name, &self.fernseher.app_version),
        })
    }
}
