//! Tank float-switch interlock.
//!
//! A float switch on the supply tank tells the controller whether there is
//! water to pump.  Wiring varies: some installs close the switch (HIGH via
//! pull-up) when water is present, others open it.  The configured
//! polarity says which level means "present".
//!
//! When the interlock feature is disabled no pin is held and the tank is
//! always reported as full.

use embedded_hal::digital::InputPin;
use log::warn;

/// Map a sampled pin level to "water present".
pub fn level_means_water(level_high: bool, high_means_water: bool) -> bool {
    level_high == high_means_water
}

pub struct InterlockMonitor<I> {
    pin: Option<I>,
    high_means_water: bool,
}

impl<I: InputPin> InterlockMonitor<I> {
    /// Interlock fitted on `pin`.
    pub fn new(pin: I, high_means_water: bool) -> Self {
        Self {
            pin: Some(pin),
            high_means_water,
        }
    }

    /// Interlock not fitted: [`has_water`](Self::has_water) is always `true`.
    pub fn disabled() -> Self {
        Self {
            pin: None,
            high_means_water: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.pin.is_some()
    }

    /// Whether the supply tank has water.  A failed pin read counts as
    /// empty so the pump never runs on an unknown supply.
    pub fn has_water(&mut self) -> bool {
        let Some(pin) = self.pin.as_mut() else {
            return true;
        };
        match pin.is_high() {
            Ok(high) => level_means_water(high, self.high_means_water),
            Err(_) => {
                warn!("Interlock: tank switch read failed, treating tank as empty");
                false
            }
        }
    }
}
