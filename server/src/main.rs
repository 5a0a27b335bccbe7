//! SmartTV Server – Einstiegspunkt
//!
//! Laedt die Konfiguration, initialisiert das Logging und startet den Server.

use anyhow::Result;
use smarttv_observability::logging_initialisieren;
use smarttv_server::{config::ServerConfig, Server};

#[tokio::main]
async fn main() -> Result<()> {
    // Konfigurationsdatei-Pfad aus Umgebungsvariable oder Standard
    let config_pfad = std::env::var("SMARTTV_CONFIG").unwrap_or_else(|_| "config.toml".into());

    // Konfiguration laden (Standardwerte falls Datei fehlt)
    let config = ServerConfig::laden(&config_pfad)?;

    logging_initialisieren(&config.logging.level, &config.logging.format);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_pfad,
        "SmartTV Server wird initialisiert"
    );

    if let Err(e) = Server::neu(config).starten().await {
        tracing::error!(fehler = format!("{e:#}"), "Server mit Fehler beendet");
        return Err(e);
    }

    Ok(())
}
