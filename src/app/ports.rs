//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (soil probe, relay, tank switch, console, storage,
//! event sinks) implement these traits.  The
//! [`Controller`](super::service::Controller) consumes them via generics,
//! so the domain core never touches hardware directly.

use crate::config::Thresholds;
use crate::error::{ActuatorError, SensorError, StorageError};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// One raw soil reading in `0..=1023`.
    fn read_soil(&mut self) -> Result<u16, SensorError>;

    /// Whether the supply tank has water.  Always `true` when the
    /// interlock is not fitted.
    fn water_present(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the pump.
///
/// Relay polarity is the adapter's concern; `on` always means "pump runs".
pub trait ActuatorPort {
    fn set_pump(&mut self, on: bool) -> Result<(), ActuatorError>;

    /// Last commanded pump state.
    fn pump_on(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Console port (driven adapter: operator ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Line-oriented operator console.
///
/// `read_byte` MUST NOT block: it returns `None` as soon as no byte is
/// immediately available.  Line assembly happens on the domain side.
pub trait ConsolePort {
    fn read_byte(&mut self) -> Option<u8>;

    /// Write one line; the adapter appends the terminator.
    fn write_line(&mut self, line: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Durable record store (driven adapter: domain ↔ EEPROM / NVS)
// ───────────────────────────────────────────────────────────────

/// Byte-addressed non-volatile storage, EEPROM style.
///
/// Never-written bytes read back as `0xFF`.  A write covers exactly the
/// given range and leaves the rest of the image untouched.
pub trait RecordStore {
    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError>;

    fn write_bytes(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent thresholds)
// ───────────────────────────────────────────────────────────────

/// Outcome of reading the persisted thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A record with a valid marker was found.
    Stored(Thresholds),
    /// No valid marker: first boot or erased storage.
    Uninitialized,
}

impl LoadOutcome {
    pub fn thresholds_or_default(self) -> Thresholds {
        match self {
            Self::Stored(t) => t,
            Self::Uninitialized => Thresholds::default(),
        }
    }
}

/// Loads and persists the tunable thresholds.
///
/// Implemented for every [`RecordStore`] in [`crate::storage`].
pub trait ConfigPort {
    /// Never fails: unreadable or unmarked storage is `Uninitialized`.
    fn load(&self) -> LoadOutcome;

    /// Write the marker and both thresholds, replacing any prior record.
    fn save(&mut self, thresholds: &Thresholds) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> u64;
}
