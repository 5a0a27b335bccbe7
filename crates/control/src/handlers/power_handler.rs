//! Power-Handler – on, off, status

use crate::commands::{
    BefehlsResult, HandlerKontext, TEXT_AUSGESCHALTET, TEXT_BEREITS_AN, TEXT_BEREITS_AUS,
    TEXT_EINGESCHALTET, TEXT_STATUS_AN, TEXT_STATUS_AUS,
};
use crate::dispatcher::Antwort;

/// Schaltet den Fernseher ein, sofern er aus ist
pub fn handle_on(_args: &[&str], ctx: &mut HandlerKontext<'_>) -> BefehlsResult {
    if ctx.tv.ist_an() {
        return Ok(Antwort::text(TEXT_BEREITS_AN));
    }
    ctx.tv.einschalten();
    tracing::info!("Fernseher eingeschaltet");
    Ok(Antwort::text(TEXT_EINGESCHALTET))
}

/// Schaltet den Fernseher aus, sofern er an ist
pub fn handle_off(_args: &[&str], ctx: &mut HandlerKontext<'_>) -> BefehlsResult {
    if !ctx.tv.ist_an() {
        return Ok(Antwort::text(TEXT_BEREITS_AUS));
    }
    ctx.tv.ausschalten();
    tracing::info!("Fernseher ausgeschaltet");
    Ok(Antwort::text(TEXT_AUSGESCHALTET))
}

pub fn handle_status(_args: &[&str], ctx: &mut HandlerKontext<'_>) -> BefehlsResult {
    let text = if ctx.tv.ist_an() {
        TEXT_STATUS_AN
    } else {
        TEXT_STATUS_AUS
    };
    Ok(Antwort::text(text))
}
