//! # smarttv-observability
//!
//! Structured Logging fuer den SmartTV-Server via tracing-subscriber.
//! Text- oder JSON-Ausgabe, Level per Konfiguration oder Umgebung.

pub mod logging;

pub use logging::{log_format_gueltig, log_level_gueltig, logging_initialisieren};
