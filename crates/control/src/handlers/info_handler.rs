//! Info-Handler – help, version, quit

use crate::commands::{BefehlsResult, HandlerKontext, HILFE_TEXT, TEXT_AUF_WIEDERSEHEN};
use crate::dispatcher::Antwort;

pub fn handle_help(_args: &[&str], _ctx: &mut HandlerKontext<'_>) -> BefehlsResult {
    Ok(Antwort::text(HILFE_TEXT))
}

/// Antwortet mit `{name}-{version}`
pub fn handle_version(_args: &[&str], ctx: &mut HandlerKontext<'_>) -> BefehlsResult {
    Ok(Antwort::text(ctx.app.kennung()))
}

/// Die Sitzung selbst beendet die Verbindungsschicht
pub fn handle_quit(_args: &[&str], _ctx: &mut HandlerKontext<'_>) -> BefehlsResult {
    Ok(Antwort::text(TEXT_AUF_WIEDERSEHEN))
}
