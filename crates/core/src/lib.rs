//! smarttv-core – Geraetezustand, gemeinsame Typen und Fehlertypen
//!
//! Dieses Crate stellt die Bausteine bereit, die unabhaengig vom Netzwerk
//! sind: das Fernseher-Modell (Power + Kanal), die Verbindungs-ID und den
//! zentralen Fehler-Enum.

pub mod device;
pub mod error;
pub mod event;
pub mod types;

// Re-Exporte fuer bequemen Zugriff
pub use device::{DeviceHandle, SmartTv, STANDARD_KANAL_ANZAHL};
pub use error::{Result, SmartTvError};
pub use event::TvEreignis;
pub use types::ConnectionId;
