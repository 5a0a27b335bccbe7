//! Geraete-Ereignisse
//!
//! Zustandsaenderungen, die andere Verbindungen mitbekommen sollen.
//! Der Dispatcher liefert sie strukturiert zurueck, die Verbindungsschicht
//! entscheidet anhand dessen ueber den Broadcast.

use serde::{Deserialize, Serialize};

/// Ereignisse, die ein Befehl am Fernseher ausloesen kann
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TvEreignis {
    /// Der aktuelle Kanal wurde erfolgreich gewechselt
    KanalGewechselt { kanal: u32 },
}

impl TvEreignis {
    /// Text der Benachrichtigung an alle anderen Clients
    pub fn hinweis_text(&self) -> String {
        match self {
            Self::KanalGewechselt { kanal } => format!("[Notice] Channel changed to {kanal}\n"),
        }
    }
}
