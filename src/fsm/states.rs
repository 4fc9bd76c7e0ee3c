//! Concrete state handler functions and table builder.
//!
//! Each state is one row: a display name and a plain `fn` update handler.
//! Handlers are pure functions of [`TickInputs`] and [`RunLimits`]; the
//! pump side effect is derived from the transition itself, never set here.
//!
//! ```text
//!  IDLE ──[avg <= dry && water]──▶ WATERING
//!    ▲                                │
//!    │            [no water | run >= max | (avg >= wet && run >= min)]
//!    │                                ▼
//!    └────────[cooldown elapsed]── COOLDOWN
//! ```

use super::context::{RunLimits, TickInputs, TransitionCause};
use super::{StateDescriptor, StateId};

/// Build the static state table.  Indexed by `StateId as usize`.
pub const fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "IDLE",
            on_update: idle_update,
        },
        // Index 1 — Watering
        StateDescriptor {
            id: StateId::Watering,
            name: "WATERING",
            on_update: watering_update,
        },
        // Index 2 — Cooldown
        StateDescriptor {
            id: StateId::Cooldown,
            name: "COOLDOWN",
            on_update: cooldown_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state
// ═══════════════════════════════════════════════════════════════════════════

fn idle_update(inputs: &TickInputs, _limits: &RunLimits) -> Option<(StateId, TransitionCause)> {
    if inputs.filtered <= inputs.dry_threshold && inputs.water_present {
        return Some((StateId::Watering, TransitionCause::SoilDry));
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  WATERING state — pump running
// ═══════════════════════════════════════════════════════════════════════════

fn watering_update(inputs: &TickInputs, limits: &RunLimits) -> Option<(StateId, TransitionCause)> {
    // Safety overrides first; neither waits for the minimum soak.
    if !inputs.water_present {
        return Some((StateId::Cooldown, TransitionCause::InterlockLost));
    }
    if inputs.elapsed_ms >= limits.max_run_ms {
        return Some((StateId::Cooldown, TransitionCause::MaxRunReached));
    }

    if inputs.filtered >= inputs.wet_threshold && inputs.elapsed_ms >= limits.min_run_ms {
        return Some((StateId::Cooldown, TransitionCause::SoilWet));
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  COOLDOWN state — mandatory rest between cycles
// ═══════════════════════════════════════════════════════════════════════════

fn cooldown_update(inputs: &TickInputs, limits: &RunLimits) -> Option<(StateId, TransitionCause)> {
    if inputs.elapsed_ms >= limits.cooldown_ms {
        return Some((StateId::Idle, TransitionCause::CooldownElapsed));
    }
    None
}
