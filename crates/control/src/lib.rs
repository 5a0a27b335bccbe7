//! smarttv-control – TCP-Steuerprotokoll
//!
//! Dieser Crate implementiert die Verbindungsverwaltung und den
//! Befehls-Dispatcher des SmartTV-Servers. Clients senden kurze Textbefehle
//! ohne Zeilenumbruch und erhalten eine Textantwort. Kanalwechsel werden an
//! alle anderen verbundenen Clients gemeldet.
//!
//! ## Architektur
//!
//! ```text
//! TCP Listener (TvServer)
//!     |
//!     v
//! ClientConnection (pro Verbindung ein Task)
//!     |  State Machine: Begruessung -> Aktiv -> Geschlossen
//!     |
//!     v
//! CommandDispatcher  --- DeviceHandle (ein Mutex um den Fernseher)
//!     |
//!     +-- power_handler   (on, off, status)
//!     +-- channel_handler (get_c, get_ch, set_ch)
//!     +-- info_handler    (help, version, quit)
//!
//! ConnectionRegistry – Hinweise an alle anderen Verbindungen senden
//! ```

pub mod broadcast;
pub mod commands;
pub mod connection;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod server_state;
pub mod tcp;

// Bequeme Re-Exporte
pub use broadcast::ConnectionRegistry;
pub use connection::ClientConnection;
pub use dispatcher::{Antwort, AppInfo, CommandDispatcher};
pub use error::{CommandError, ControlError, ControlResult};
pub use server_state::{ControlConfig, ControlState};
pub use tcp::TvServer;
