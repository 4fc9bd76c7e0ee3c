//! Telemetry snapshot and its single-line console rendering.
//!
//! ```text
//! STATE=WATERING RAW=312 AVG=305 DRY=450 WET=520 TANK=OK ELAPSE=4200
//! ```

use core::fmt;

use crate::fsm::StateId;

/// One telemetry sample.  Rendered identically for periodic reports and
/// for the `STATUS` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryReport {
    pub state: StateId,
    /// Last raw soil reading.
    pub raw: u16,
    /// Moving average at the last sampling tick.
    pub filtered: u16,
    pub dry: u16,
    pub wet: u16,
    pub water_present: bool,
    /// Time spent in `state`, in milliseconds.
    pub elapsed_ms: u64,
}

impl fmt::Display for TelemetryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "STATE={} RAW={} AVG={} DRY={} WET={} TANK={} ELAPSE={}",
            self.state.name(),
            self.raw,
            self.filtered,
            self.dry,
            self.wet,
            if self.water_present { "OK" } else { "EMPTY" },
            self.elapsed_ms,
        )
    }
}
