//! Kanal-Handler – get_c, get_ch, set_ch
//!
//! `set_ch` ist der einzige Befehl mit Seiteneffekt auf andere Clients:
//! bei Erfolg traegt die Antwort ein `KanalGewechselt`-Ereignis, das die
//! Verbindungsschicht als Hinweis an alle anderen Clients verteilt.

use smarttv_core::{SmartTvError, TvEreignis};
use std::num::IntErrorKind;

use crate::commands::{BefehlsResult, HandlerKontext, PRAEFIX_KANAL_GESETZT};
use crate::dispatcher::Antwort;
use crate::error::CommandError;

pub fn handle_get_c(_args: &[&str], ctx: &mut HandlerKontext<'_>) -> BefehlsResult {
    Ok(Antwort::text(ctx.tv.kanal_anzahl().to_string()))
}

pub fn handle_get_ch(_args: &[&str], ctx: &mut HandlerKontext<'_>) -> BefehlsResult {
    Ok(Antwort::text(ctx.tv.kanal().to_string()))
}

/// Setzt den Kanal auf `args[0]`
///
/// Zahlen, die syntaktisch gueltig sind aber nicht in `i64` passen, gelten
/// als ausserhalb des Bereichs, nicht als ungueltige Zahl.
pub fn handle_set_ch(args: &[&str], ctx: &mut HandlerKontext<'_>) -> BefehlsResult {
    let roh = args.first().copied().unwrap_or_default();
    let max = ctx.tv.kanal_anzahl();

    let kanal: i64 = match roh.parse() {
        Ok(k) => k,
        Err(e) => {
            return match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    Err(CommandError::AusserhalbBereich { max })
                }
                _ => Err(CommandError::UngueltigeZahl),
            }
        }
    };

    match ctx.tv.kanal_setzen(kanal) {
        Ok(()) => {
            let kanal = ctx.tv.kanal();
            tracing::info!(kanal, "Kanal gewechselt");
            Ok(Antwort::mit_ereignis(
                format!("{PRAEFIX_KANAL_GESETZT}{kanal}"),
                TvEreignis::KanalGewechselt { kanal },
            ))
        }
        Err(SmartTvError::KanalAusserhalbBereich { max, .. }) => {
            Err(CommandError::AusserhalbBereich { max })
        }
        Err(e) => {
            tracing::error!(fehler = %e, "Unerwarteter Fehler beim Kanalwechsel");
            Err(CommandError::AusserhalbBereich { max })
        }
    }
}
