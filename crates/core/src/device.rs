//! Fernseher-Modell – Power-Zustand und Kanalwahl
//!
//! `SmartTv` ist eine reine In-Memory-Zustandsmaschine ohne I/O.
//! Geteilt wird sie ueber ein `DeviceHandle`, das genau einen Mutex kapselt:
//! jeder lesende oder schreibende Zugriff laeuft ueber `sperren()`.
//!
//! ## Invarianten
//! - `kanal_anzahl >= 1`, nach der Konstruktion unveraenderlich
//! - `1 <= aktueller_kanal <= kanal_anzahl`
//! - Ein- und Ausschalten setzt den Kanal nie zurueck

use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

use crate::error::{Result, SmartTvError};

/// Standard-Anzahl verfuegbarer Kanaele
pub const STANDARD_KANAL_ANZAHL: u32 = 10;

/// Zustand des simulierten Fernsehers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartTv {
    eingeschaltet: bool,
    kanal_anzahl: u32,
    aktueller_kanal: u32,
}

impl SmartTv {
    /// Erstellt einen ausgeschalteten Fernseher auf Kanal 1
    ///
    /// Schlaegt fehl wenn `kanal_anzahl` 0 ist.
    pub fn neu(kanal_anzahl: u32) -> Result<Self> {
        if kanal_anzahl == 0 {
            return Err(SmartTvError::konfiguration(
                "Kanalanzahl muss mindestens 1 sein",
            ));
        }
        Ok(Self {
            eingeschaltet: false,
            kanal_anzahl,
            aktueller_kanal: 1,
        })
    }

    pub fn einschalten(&mut self) {
        self.eingeschaltet = true;
    }

    pub fn ausschalten(&mut self) {
        self.eingeschaltet = false;
    }

    pub fn ist_an(&self) -> bool {
        self.eingeschaltet
    }

    /// Anzahl verfuegbarer Kanaele (konstant)
    pub fn kanal_anzahl(&self) -> u32 {
        self.kanal_anzahl
    }

    /// Aktuell eingestellter Kanal (1-basiert)
    pub fn kanal(&self) -> u32 {
        self.aktueller_kanal
    }

    /// Setzt den aktuellen Kanal
    ///
    /// Bei einem Wert ausserhalb von `1..=kanal_anzahl` bleibt der Zustand
    /// unveraendert und `KanalAusserhalbBereich` wird zurueckgegeben.
    pub fn kanal_setzen(&mut self, kanal: i64) -> Result<()> {
        match u32::try_from(kanal) {
            Ok(k) if (1..=self.kanal_anzahl).contains(&k) => {
                self.aktueller_kanal = k;
                Ok(())
            }
            _ => Err(SmartTvError::KanalAusserhalbBereich {
                kanal,
                max: self.kanal_anzahl,
            }),
        }
    }
}

impl Default for SmartTv {
    fn default() -> Self {
        Self {
            eingeschaltet: false,
            kanal_anzahl: STANDARD_KANAL_ANZAHL,
            aktueller_kanal: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// DeviceHandle
// ---------------------------------------------------------------------------

/// Geteilter Zugriff auf den einen Fernseher des Prozesses
///
/// Clone teilt denselben inneren Zustand. Der Guard aus `sperren()` darf
/// nicht ueber ein `.await` gehalten werden.
#[derive(Clone, Debug, Default)]
pub struct DeviceHandle {
    inner: Arc<Mutex<SmartTv>>,
}

impl DeviceHandle {
    pub fn neu(tv: SmartTv) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tv)),
        }
    }

    /// Sperrt den Fernseher fuer eine zusammenhaengende Folge von Operationen
    pub fn sperren(&self) -> MutexGuard<'_, SmartTv> {
        self.inner.lock()
    }

    /// Kopie des aktuellen Zustands (fuer Logging und Tests)
    pub fn momentaufnahme(&self) -> SmartTv {
        self.inner.lock().clone()
    }
}
