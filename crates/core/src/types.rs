//! Gemeinsame Identifikationstypen
//!
//! Verbindungen werden ueber eine UUID im Newtype-Pattern identifiziert,
//! damit sie nicht mit anderen Zahlenwerten verwechselt werden koennen.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Eindeutige ID einer Client-Verbindung
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Erstellt eine neue zufaellige ConnectionId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Gibt die innere UUID zurueck
    pub fn inner(&self) -> Uuid {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_sind_eindeutig() {
        assert_ne!(ConnectionId::new(), ConnectionId::new());
    }

    #[test]
    fn anzeige_mit_praefix() {
        let id = ConnectionId::new();
        assert!(id.to_string().starts_with("conn:"));
        assert_eq!(id.inner(), id.0);
    }
}
