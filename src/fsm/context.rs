//! Inputs and bounds threaded through every FSM handler.
//!
//! Handlers are pure: they read a [`TickInputs`] snapshot and the
//! [`RunLimits`] and return the next state, never touching hardware.

// ---------------------------------------------------------------------------
// Per-tick inputs
// ---------------------------------------------------------------------------

/// A point-in-time view of everything the transition table looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInputs {
    /// Moving-average soil reading (0 – 1023).
    pub filtered: u16,
    /// Dry threshold in effect for this tick.
    pub dry_threshold: u16,
    /// Wet threshold in effect for this tick.
    pub wet_threshold: u16,
    /// Tank interlock reports water present.
    pub water_present: bool,
    /// Milliseconds since the current state was entered.
    pub elapsed_ms: u64,
}

// ---------------------------------------------------------------------------
// Cycle bounds
// ---------------------------------------------------------------------------

/// Fixed timing bounds of a watering cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimits {
    pub min_run_ms: u64,
    pub max_run_ms: u64,
    pub cooldown_ms: u64,
}

// ---------------------------------------------------------------------------
// Why a transition happened
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCause {
    /// Filtered reading reached the dry threshold with water available.
    SoilDry,
    /// Operator `START`.
    ManualStart,
    /// Tank interlock lost while watering.
    InterlockLost,
    /// Cycle hit the maximum run time.
    MaxRunReached,
    /// Soil reached the wet threshold after the minimum soak.
    SoilWet,
    /// Operator `STOP`.
    ManualStop,
    /// Cooldown period finished.
    CooldownElapsed,
}

impl TransitionCause {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SoilDry => "soil dry",
            Self::ManualStart => "manual start",
            Self::InterlockLost => "interlock lost",
            Self::MaxRunReached => "max run reached",
            Self::SoilWet => "soil wet",
            Self::ManualStop => "manual stop",
            Self::CooldownElapsed => "cooldown elapsed",
        }
    }
}

impl core::fmt::Display for TransitionCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
