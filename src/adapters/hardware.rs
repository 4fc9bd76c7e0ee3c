//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the soil probe, the pump relay and the tank interlock, exposing
//! them through [`SensorPort`] and [`ActuatorPort`].  The pin types are
//! generic over `embedded-hal` traits: `PinDriver`s on the device,
//! [`SimPin`](crate::drivers::sim_pin::SimPin)s in host tests.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::pump::PumpRelay;
use crate::error::{ActuatorError, SensorError};
use crate::sensors::InterlockMonitor;
use crate::sensors::soil::SoilProbe;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P, I> {
    soil: SoilProbe,
    relay: PumpRelay<P>,
    interlock: InterlockMonitor<I>,
}

impl<P: OutputPin, I: InputPin> HardwareAdapter<P, I> {
    pub fn new(soil: SoilProbe, relay: PumpRelay<P>, interlock: InterlockMonitor<I>) -> Self {
        Self {
            soil,
            relay,
            interlock,
        }
    }

    pub fn soil_reads(&self) -> u32 {
        self.soil.total_reads()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P: OutputPin, I: InputPin> SensorPort for HardwareAdapter<P, I> {
    fn read_soil(&mut self) -> Result<u16, SensorError> {
        self.soil.read()
    }

    fn water_present(&mut self) -> bool {
        self.interlock.has_water()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P: OutputPin, I: InputPin> ActuatorPort for HardwareAdapter<P, I> {
    fn set_pump(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.relay.set(on)
    }

    fn pump_on(&self) -> bool {
        self.relay.is_on()
    }
}
