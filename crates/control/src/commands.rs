//! Befehlstabelle – Name, erwartete Argumente, Handler
//!
//! Die Tabelle ist statisch und nach dem Start unveraenderlich. Namen sind
//! kleingeschrieben, der Dispatcher normalisiert die Eingabe entsprechend.

use smarttv_core::SmartTv;

use crate::dispatcher::{Antwort, AppInfo};
use crate::error::CommandError;
use crate::handlers::{channel_handler, info_handler, power_handler};

/// Ergebnis eines einzelnen Handlers
pub type BefehlsResult = Result<Antwort, CommandError>;

/// Alles, worauf ein Handler zugreifen darf
///
/// `tv` ist der bereits gesperrte Fernseher, der Handler laeuft komplett
/// innerhalb des kritischen Abschnitts.
pub struct HandlerKontext<'a> {
    pub tv: &'a mut SmartTv,
    pub app: &'a AppInfo,
}

/// Signatur aller Befehls-Handler
pub type HandlerFn = fn(&[&str], &mut HandlerKontext<'_>) -> BefehlsResult;

/// Eintrag der Befehlstabelle
#[derive(Clone, Copy)]
pub struct BefehlsDefinition {
    pub name: &'static str,
    pub erwartete_argumente: usize,
    pub handler: HandlerFn,
}

impl std::fmt::Debug for BefehlsDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BefehlsDefinition")
            .field("name", &self.name)
            .field("erwartete_argumente", &self.erwartete_argumente)
            .finish()
    }
}

/// Alle unterstuetzten Befehle
pub static BEFEHLE: &[BefehlsDefinition] = &[
    BefehlsDefinition { name: "help", erwartete_argumente: 0, handler: info_handler::handle_help },
    BefehlsDefinition { name: "version", erwartete_argumente: 0, handler: info_handler::handle_version },
    BefehlsDefinition { name: "on", erwartete_argumente: 0, handler: power_handler::handle_on },
    BefehlsDefinition { name: "off", erwartete_argumente: 0, handler: power_handler::handle_off },
    BefehlsDefinition { name: "status", erwartete_argumente: 0, handler: power_handler::handle_status },
    BefehlsDefinition { name: "get_c", erwartete_argumente: 0, handler: channel_handler::handle_get_c },
    BefehlsDefinition { name: "get_ch", erwartete_argumente: 0, handler: channel_handler::handle_get_ch },
    BefehlsDefinition { name: "set_ch", erwartete_argumente: 1, handler: channel_handler::handle_set_ch },
    BefehlsDefinition { name: "quit", erwartete_argumente: 0, handler: info_handler::handle_quit },
];

/// Sucht einen Befehl anhand seines (kleingeschriebenen) Namens
pub fn befehl_suchen(name: &str) -> Option<&'static BefehlsDefinition> {
    BEFEHLE.iter().find(|def| def.name == name)
}

// ---------------------------------------------------------------------------
// Antworttexte
// ---------------------------------------------------------------------------

pub const TEXT_EINGESCHALTET: &str = "TV switched ON. Type 'help' for available commands.";
pub const TEXT_AUSGESCHALTET: &str = "TV switched OFF";
pub const TEXT_BEREITS_AN: &str = "TV is already ON";
pub const TEXT_BEREITS_AUS: &str = "TV is already OFF";
pub const TEXT_STATUS_AN: &str = "ON";
pub const TEXT_STATUS_AUS: &str = "OFF";
pub const TEXT_AUF_WIEDERSEHEN: &str = "Goodbye!";

/// Praefix der Erfolgsantwort von `set_ch`
pub const PRAEFIX_KANAL_GESETZT: &str = "Channel set to ";

pub const HILFE_TEXT: &str = "\
---------------------------------------------------
Supported commands:
help           - lists available commands.
version        - displays current version.
on             - turns ON the TV.
off            - turns OFF the TV.
status         - displays TV ON/OFF status.
get_c          - displays number of available channels.
get_ch         - displays current active channel.
set_ch <n>     - sets channel to <n>.
quit           - disconnect (handled by server).
---------------------------------------------------
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alle_befehle_auffindbar() {
        for name in [
            "help", "version", "on", "off", "status", "get_c", "get_ch", "set_ch", "quit",
        ] {
            assert!(befehl_suchen(name).is_some(), "{name} fehlt");
        }
        assert!(befehl_suchen("foobar").is_none());
        assert!(befehl_suchen("HELP").is_none());
    }

    #[test]
    fn nur_set_ch_erwartet_ein_argument() {
        for def in BEFEHLE {
            let erwartet = usize::from(def.name == "set_ch");
            assert_eq!(def.erwartete_argumente, erwartet, "{}", def.name);
        }
    }

    #[test]
    fn hilfe_listet_jeden_befehl() {
        for def in BEFEHLE {
            assert!(HILFE_TEXT.contains(def.name), "{} fehlt in der Hilfe", def.name);
        }
        assert!(HILFE_TEXT.contains("set_ch <n>"));
    }
}
