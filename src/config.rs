//! System configuration parameters
//!
//! Two kinds of configuration live here:
//!
//! - [`SystemConfig`] — fixed timing and wiring settings, compiled in and
//!   never changed at runtime.
//! - [`Thresholds`] — the operator-tunable dry/wet soil thresholds, changed
//!   over the serial console and persisted on request.

use serde::{Deserialize, Serialize};

use crate::fsm::context::RunLimits;

/// Full-scale value of the soil sensor (10-bit ADC range).
pub const ADC_MAX: u16 = 1023;

/// Clamp an arbitrary integer into the sensor range `0..=ADC_MAX`.
pub fn clamp_reading(value: i64) -> u16 {
    value.clamp(0, i64::from(ADC_MAX)) as u16
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Timing ---
    /// Soil sampling cadence (milliseconds)
    pub sample_interval_ms: u32,
    /// Telemetry report cadence (milliseconds)
    pub telemetry_interval_ms: u32,

    // --- Watering cycle ---
    /// Minimum soak time before a wet reading may stop a cycle
    pub min_run_ms: u32,
    /// Hard upper bound on a single watering cycle
    pub max_run_ms: u32,
    /// Rest period after a cycle before the next may start
    pub cooldown_ms: u32,

    // --- Wiring ---
    /// Pump relay energises on a HIGH output level
    pub relay_active_high: bool,
    /// Whether the tank float switch is fitted and consulted
    pub interlock_enabled: bool,
    /// Tank switch reads HIGH when water is present
    pub interlock_high_means_water: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Timing
            sample_interval_ms: 200,
            telemetry_interval_ms: 2_000,

            // Watering cycle
            min_run_ms: 20_000,
            max_run_ms: 120_000,
            cooldown_ms: 60_000,

            // Wiring
            relay_active_high: true,
            interlock_enabled: true,
            interlock_high_means_water: true,
        }
    }
}

impl SystemConfig {
    /// Cycle timing bounds consumed by the state machine.
    pub fn run_limits(&self) -> RunLimits {
        RunLimits {
            min_run_ms: u64::from(self.min_run_ms),
            max_run_ms: u64::from(self.max_run_ms),
            cooldown_ms: u64::from(self.cooldown_ms),
        }
    }
}

/// Operator-tunable soil thresholds (raw ADC units).
///
/// Both fields are kept within `0..=ADC_MAX` by every constructor and
/// setter.  No ordering between them is enforced: depending on probe
/// polarity, "dry" may sit above or below "wet".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    dry: u16,
    wet: u16,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { dry: 450, wet: 520 }
    }
}

impl Thresholds {
    /// Build from arbitrary integers, clamping each into range.
    pub fn new(dry: i64, wet: i64) -> Self {
        Self {
            dry: clamp_reading(dry),
            wet: clamp_reading(wet),
        }
    }

    /// Watering starts when the filtered reading is at or below this.
    pub fn dry(&self) -> u16 {
        self.dry
    }

    /// Watering may stop once the filtered reading reaches this.
    pub fn wet(&self) -> u16 {
        self.wet
    }

    pub fn set_dry(&mut self, value: i64) {
        self.dry = clamp_reading(value);
    }

    pub fn set_wet(&mut self, value: i64) {
        self.wet = clamp_reading(value);
    }
}
