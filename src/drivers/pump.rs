//! Pump relay driver.
//!
//! A single digital output drives the relay coil.  Relay boards come in
//! active-high and active-low flavours; the polarity is applied here so
//! the state machine only ever deals in "pump on" / "pump off".
//!
//! ## Safety contract
//!
//! The relay is driven to its OFF level on construction.  This driver is a
//! dumb actuator; the interlock is enforced by the state machine.

use embedded_hal::digital::{OutputPin, PinState};

use crate::error::ActuatorError;

/// Output level that produces the requested relay state.
pub fn relay_level(on: bool, active_high: bool) -> PinState {
    PinState::from(on == active_high)
}

pub struct PumpRelay<P> {
    pin: P,
    active_high: bool,
    on: bool,
}

impl<P: OutputPin> PumpRelay<P> {
    /// Take the pin and immediately drive the relay off.
    pub fn new(pin: P, active_high: bool) -> Result<Self, ActuatorError> {
        let mut relay = Self {
            pin,
            active_high,
            on: true,
        };
        relay.set(false)?;
        Ok(relay)
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.pin
            .set_state(relay_level(on, self.active_high))
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.on = on;
        Ok(())
    }

    /// Last successfully commanded state.
    pub fn is_on(&self) -> bool {
        self.on
    }
}
