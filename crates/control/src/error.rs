//! Fehlertypen fuer das Steuerprotokoll
//!
//! `CommandError` deckt alle Fehler ab, die der Dispatcher dem Client als
//! Text zurueckmeldet. Die `Display`-Ausgabe ist exakt der Wire-Text.
//! `ControlError` betrifft nur den Transport und beendet hoechstens die
//! betroffene Verbindung.

use thiserror::Error;

/// Fehler bei der Befehlsverarbeitung (werden nie an den Aufrufer propagiert)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Unbekannter oder leerer Befehl
    #[error("ERROR: Unknown command '{befehl}'. See 'help' for available commands.")]
    Unbekannt { befehl: String },

    /// Falsche Anzahl an Argumenten
    #[error("ERROR: Command '{befehl}' expected {erwartet} argument(s), but received {erhalten}.")]
    FalscheArgumente {
        befehl: String,
        erwartet: usize,
        erhalten: usize,
    },

    /// Kanalnummer ist keine Ganzzahl
    #[error("ERROR: Invalid channel number (must be an integer)")]
    UngueltigeZahl,

    /// Kanalnummer ausserhalb von 1..=max
    #[error("ERROR: Channel out of range (valid: 1-{max})")]
    AusserhalbBereich { max: u32 },

    /// Power-Gate: nur `on` ist im ausgeschalteten Zustand erlaubt
    #[error("ERROR: TV is switched OFF. Turn it ON first.")]
    Ausgeschaltet,
}

impl CommandError {
    pub fn unbekannt(befehl: impl Into<String>) -> Self {
        Self::Unbekannt {
            befehl: befehl.into(),
        }
    }
}

/// Fehlertyp fuer Transport und Konfiguration des Steuerprotokolls
#[derive(Debug, Error)]
pub enum ControlError {
    /// IO-Fehler (TCP, Socket)
    #[error("IO-Fehler: {0}")]
    Io(#[from] std::io::Error),

    /// Ungueltige Konfiguration
    #[error("Konfigurationsfehler: {0}")]
    Konfiguration(String),
}

/// Result-Typ fuer das Steuerprotokoll
pub type ControlResult<T> = Result<T, ControlError>;
