//! Befehls-Dispatcher – Routet Textbefehle an die richtigen Handler
//!
//! Der Dispatcher normalisiert die Eingabe, prueft das Power-Gate, sucht den
//! Befehl in der Tabelle, validiert die Argumentanzahl und ruft den Handler
//! auf. Jeder Pfad endet in einer Textantwort, kein Fehler verlaesst `handle`.
//!
//! ## Reihenfolge der Pruefungen
//! 1. Leere Eingabe -> unbekannter Befehl `''`
//! 2. Power-Gate (nur `on` bei ausgeschaltetem Fernseher)
//! 3. Befehl bekannt?
//! 4. Argumentanzahl
//!
//! Der Fernseher bleibt fuer die gesamte Verarbeitung eines Befehls gesperrt,
//! dadurch sind Pruefen-und-Aendern-Folgen wie bei `on` atomar.

use smarttv_core::{DeviceHandle, TvEreignis};
use std::sync::Arc;

use crate::commands::{befehl_suchen, BefehlsResult, HandlerKontext};
use crate::error::CommandError;

// ---------------------------------------------------------------------------
// AppInfo
// ---------------------------------------------------------------------------

/// Name und Version, die `version` meldet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
}

impl AppInfo {
    pub fn neu(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// `{name}-{version}`
    pub fn kennung(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }
}

impl Default for AppInfo {
    fn default() -> Self {
        Self::neu("SmartTV", env!("CARGO_PKG_VERSION"))
    }
}

// ---------------------------------------------------------------------------
// Antwort
// ---------------------------------------------------------------------------

/// Ergebnis eines Befehls: Antworttext plus optionales Ereignis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Antwort {
    pub text: String,
    pub ereignis: Option<TvEreignis>,
}

impl Antwort {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ereignis: None,
        }
    }

    pub fn mit_ereignis(text: impl Into<String>, ereignis: TvEreignis) -> Self {
        Self {
            text: text.into(),
            ereignis: Some(ereignis),
        }
    }
}

impl From<CommandError> for Antwort {
    fn from(e: CommandError) -> Self {
        Self::text(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// CommandDispatcher
// ---------------------------------------------------------------------------

/// Zentraler Befehls-Dispatcher
///
/// Clone teilt denselben Fernseher.
#[derive(Clone, Debug)]
pub struct CommandDispatcher {
    device: DeviceHandle,
    app: Arc<AppInfo>,
}

impl CommandDispatcher {
    /// Erstellt einen neuen Dispatcher fuer den gegebenen Fernseher
    pub fn neu(device: DeviceHandle, app: AppInfo) -> Self {
        Self {
            device,
            app: Arc::new(app),
        }
    }

    /// Verarbeitet einen rohen Befehl und gibt immer eine Antwort zurueck
    pub fn handle(&self, roh: &str) -> Antwort {
        match self.verarbeiten(roh) {
            Ok(antwort) => antwort,
            Err(e) => {
                tracing::debug!(befehl = %roh.trim(), fehler = %e, "Befehl abgelehnt");
                e.into()
            }
        }
    }

    fn verarbeiten(&self, roh: &str) -> BefehlsResult {
        let normalisiert = roh.trim().to_lowercase();
        let mut tokens = normalisiert.split_whitespace();

        let Some(name) = tokens.next() else {
            return Err(CommandError::unbekannt(""));
        };
        let args: Vec<&str> = tokens.collect();

        let mut tv = self.device.sperren();

        // Strenges Power-Gate: NUR `on` ist erlaubt solange der Fernseher aus ist
        if !tv.ist_an() && name != "on" {
            return Err(CommandError::Ausgeschaltet);
        }

        let def = befehl_suchen(name).ok_or_else(|| CommandError::unbekannt(name))?;

        if args.len() != def.erwartete_argumente {
            return Err(CommandError::FalscheArgumente {
                befehl: name.to_string(),
                erwartet: def.erwartete_argumente,
                erhalten: args.len(),
            });
        }

        tracing::debug!(befehl = name, args = ?args, "Befehl wird ausgefuehrt");

        let mut ctx = HandlerKontext {
            tv: &mut *tv,
            app: self.app.as_ref(),
        };
        (def.handler)(&args, &mut ctx)
    }

    /// Der Fernseher hinter diesem Dispatcher
    pub fn device(&self) -> &DeviceHandle {
        &self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::HILFE_TEXT;
    use smarttv_core::SmartTv;

    const GATE: &str = "ERROR: TV is switched OFF. Turn it ON first.";

    fn dispatcher() -> CommandDispatcher {
        CommandDispatcher::neu(DeviceHandle::default(), AppInfo::neu("SmartTV", "1.2.3"))
    }

    fn eingeschaltet() -> CommandDispatcher {
        let d = dispatcher();
        d.handle("on");
        d
    }

    #[test]
    fn leere_eingabe_ist_unbekannter_befehl() {
        let d = dispatcher();
        let erwartet = "ERROR: Unknown command ''. See 'help' for available commands.";
        assert_eq!(d.handle("").text, erwartet);
        assert_eq!(d.handle("   \t ").text, erwartet);
        // auch im eingeschalteten Zustand
        let d = eingeschaltet();
        assert_eq!(d.handle("  ").text, erwartet);
    }

    #[test]
    fn power_gate_blockiert_alles_ausser_on() {
        let d = dispatcher();
        for befehl in [
            "help", "version", "off", "status", "get_c", "get_ch", "set_ch 3", "quit",
            "foobar", "set_ch", "status extra",
        ] {
            assert_eq!(d.handle(befehl).text, GATE, "{befehl}");
        }
        assert!(!d.device().momentaufnahme().ist_an());
    }

    #[test]
    fn on_mit_argumenten_ist_aritaetsfehler() {
        let d = dispatcher();
        assert_eq!(
            d.handle("on now").text,
            "ERROR: Command 'on' expected 0 argument(s), but received 1."
        );
        assert!(!d.device().momentaufnahme().ist_an());
    }

    #[test]
    fn gross_kleinschreibung_egal() {
        let d = dispatcher();
        assert_eq!(
            d.handle("  ON ").text,
            "TV switched ON. Type 'help' for available commands."
        );
        assert_eq!(d.handle("StAtUs").text, "ON");
    }

    #[test]
    fn on_und_off_doppelt() {
        let d = dispatcher();
        d.handle("on");
        assert_eq!(d.handle("on").text, "TV is already ON");
        assert!(d.device().momentaufnahme().ist_an());
        assert_eq!(d.handle("off").text, "TV switched OFF");
        // ausgeschaltet greift fuer `off` das Power-Gate
        assert_eq!(d.handle("off").text, GATE);
    }

    #[test]
    fn version_und_hilfe() {
        let d = eingeschaltet();
        assert_eq!(d.handle("version").text, "SmartTV-1.2.3");
        let hilfe = d.handle("help").text;
        assert_eq!(hilfe, HILFE_TEXT);
        assert!(hilfe.contains("Supported commands"));
    }

    #[test]
    fn status_und_kanalabfragen() {
        let d = eingeschaltet();
        assert_eq!(d.handle("status").text, "ON");
        assert_eq!(d.handle("get_c").text, "10");
        assert_eq!(d.handle("get_ch").text, "1");
    }

    #[test]
    fn jeder_gueltige_kanal_setzbar() {
        let d = eingeschaltet();
        for n in 1..=10 {
            let antwort = d.handle(&format!("set_ch {n}"));
            assert_eq!(antwort.text, format!("Channel set to {n}"));
            assert_eq!(antwort.ereignis, Some(TvEreignis::KanalGewechselt { kanal: n }));
            assert_eq!(d.handle("get_ch").text, n.to_string());
        }
    }

    #[test]
    fn kanal_ausserhalb_bereich_unveraendert() {
        let d = eingeschaltet();
        let antwort = d.handle("set_ch 0");
        assert_eq!(antwort.text, "ERROR: Channel out of range (valid: 1-10)");
        assert!(antwort.ereignis.is_none());
        assert_eq!(d.handle("get_ch").text, "1");

        d.handle("set_ch 4");
        for n in ["11", "42", "-1"] {
            assert!(d.handle(&format!("set_ch {n}")).text.contains("out of range"));
        }
        assert_eq!(d.handle("get_ch").text, "4");
    }

    #[test]
    fn set_ch_validierungsfehler() {
        let d = eingeschaltet();
        assert_eq!(
            d.handle("set_ch").text,
            "ERROR: Command 'set_ch' expected 1 argument(s), but received 0."
        );
        assert_eq!(
            d.handle("set_ch 1 2").text,
            "ERROR: Command 'set_ch' expected 1 argument(s), but received 2."
        );
        assert_eq!(
            d.handle("set_ch x").text,
            "ERROR: Invalid channel number (must be an integer)"
        );
        assert_eq!(d.handle("get_ch").text, "1");
    }

    #[test]
    fn argumentlose_befehle_mit_extra_argumenten() {
        let d = eingeschaltet();
        for name in ["help", "version", "on", "off", "status", "get_c", "get_ch", "quit"] {
            let antwort = d.handle(&format!("{name} a b"));
            assert_eq!(
                antwort.text,
                format!("ERROR: Command '{name}' expected 0 argument(s), but received 2.")
            );
        }
        assert!(d.device().momentaufnahme().ist_an());
    }

    #[test]
    fn ausschalten_behaelt_kanal() {
        let d = eingeschaltet();
        d.handle("set_ch 8");
        d.handle("off");
        d.handle("on");
        assert_eq!(d.handle("get_ch").text, "8");
    }

    #[test]
    fn unbekannter_befehl_nennt_namen() {
        let d = eingeschaltet();
        let text = d.handle("FooBar").text;
        assert!(text.contains("foobar"));
        assert!(text.contains("Unknown command"));
    }

    #[test]
    fn quit_im_dispatcher() {
        let d = eingeschaltet();
        assert_eq!(d.handle("quit").text, "Goodbye!");
    }

    #[test]
    fn eigene_kanalanzahl() {
        let d = CommandDispatcher::neu(
            DeviceHandle::neu(SmartTv::neu(3).unwrap()),
            AppInfo::default(),
        );
        d.handle("on");
        assert_eq!(d.handle("get_c").text, "3");
        assert_eq!(
            d.handle("set_ch 4").text,
            "ERROR: Channel out of range (valid: 1-3)"
        );
    }
}
