//! Handler fuer alle Textbefehle
//!
//! Jeder Handler bekommt die bereits validierten Argumente und den
//! gesperrten Fernseher. Argumentanzahl und Power-Gate prueft der Dispatcher.

pub mod channel_handler;
pub mod info_handler;
pub mod power_handler;
