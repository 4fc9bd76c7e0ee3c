//! Inbound commands to the controller.
//!
//! Produced by the console parser ([`crate::console::parse_command`]) and
//! interpreted by [`Controller::handle_command`](super::service::Controller::handle_command).

/// Operator commands accepted over the serial console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// List the recognised commands.
    Help,

    /// Emit the current telemetry line.
    Status,

    /// Start a watering cycle now (only from Idle, only with water).
    Start,

    /// Stop immediately and enter Cooldown.
    Stop,

    /// Set the dry threshold (already clamped to `0..=1023`).
    SetDry(u16),

    /// Set the wet threshold (already clamped to `0..=1023`).
    SetWet(u16),

    /// Persist the current thresholds.
    Save,

    /// Anything else.
    Unknown,
}

/// Fixed operator responses.
pub mod replies {
    pub const BOOT: &str = "Irrigation boot. Type HELP.";
    pub const HELP: &str = "Commands: STATUS, START, STOP, SET DRY x, SET WET x, SAVE, HELP";
    pub const STARTED: &str = "Watering...";
    pub const START_REJECTED: &str = "Cannot START";
    pub const STOPPED: &str = "Stopped -> Cooldown";
    pub const OK: &str = "OK";
    pub const SAVED: &str = "Saved";
    pub const SAVE_FAILED: &str = "Save failed";
    pub const UNKNOWN: &str = "Unknown. Type HELP";
}
