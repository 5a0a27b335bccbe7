//! Fehlertypen fuer den SmartTV-Server
//!
//! Zentraler Fehler-Enum fuer Geraete- und Konfigurationsfehler.
//! Protokoll- und Transportfehler definieren die jeweiligen Crates selbst.

use thiserror::Error;

/// Globaler Result-Alias fuer smarttv-core
pub type Result<T> = std::result::Result<T, SmartTvError>;

/// Alle Fehler, die das Geraetemodell erzeugen kann
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmartTvError {
    // --- Geraet ---
    #[error("Kanal {kanal} ausserhalb des gueltigen Bereichs 1-{max}")]
    KanalAusserhalbBereich { kanal: i64, max: u32 },

    // --- Konfiguration ---
    #[error("Konfigurationsfehler: {0}")]
    Konfiguration(String),

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Intern(String),
}

impl SmartTvError {
    /// Erstellt einen internen Fehler aus einer beliebigen Nachricht
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    /// Erstellt einen Konfigurationsfehler
    pub fn konfiguration(msg: impl Into<String>) -> Self {
        Self::Konfiguration(msg.into())
    }
}
