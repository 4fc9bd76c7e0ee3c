//! Watering state machine.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  StateTable                                  │
//! │  ┌──────────┬──────────┬──────────────────┐  │
//! │  │ StateId  │ name     │ on_update        │  │
//! │  ├──────────┼──────────┼──────────────────┤  │
//! │  │ Idle     │ IDLE     │ fn(in,lim)->Opt  │  │
//! │  │ Watering │ WATERING │ fn(in,lim)->Opt  │  │
//! │  │ Cooldown │ COOLDOWN │ fn(in,lim)->Opt  │  │
//! │  └──────────┴──────────┴──────────────────┘  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! [`step`] is the pure transition function: it looks up the current
//! state's handler and returns a [`Transition`] carrying the pump side
//! effect as a value.  [`StateMachine`] wraps it with the entry timestamp
//! and applies the result.  The caller drives the pump from
//! [`Transition::pump`], so the relay mirrors "in `Watering`" at all times.

pub mod context;
pub mod states;

use context::{RunLimits, TickInputs, TransitionCause};
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all controller states.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Idle = 0,
    Watering = 1,
    Cooldown = 2,
}

impl StateId {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 3;

    /// Upper-case name used on the console and in telemetry.
    pub fn name(self) -> &'static str {
        STATE_TABLE[self as usize].name
    }
}

impl core::fmt::Display for StateId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Signature for the per-tick update handler.
/// Returns `Some((next, cause))` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&TickInputs, &RunLimits) -> Option<(StateId, TransitionCause)>;

/// Static descriptor for a single FSM state.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_update: StateUpdateFn,
}

const STATE_TABLE: [StateDescriptor; StateId::COUNT] = states::build_state_table();

// ---------------------------------------------------------------------------
// Transitions and side effects
// ---------------------------------------------------------------------------

/// Pump side effect of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpCommand {
    Start,
    Stop,
}

/// A state change together with the side effect it requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
    pub cause: TransitionCause,
    /// `Start` when entering `Watering`, `Stop` when leaving it (and on
    /// every manual stop).
    pub pump: Option<PumpCommand>,
}

impl Transition {
    fn new(from: StateId, to: StateId, cause: TransitionCause) -> Self {
        let pump = if to == StateId::Watering {
            Some(PumpCommand::Start)
        } else if from == StateId::Watering {
            Some(PumpCommand::Stop)
        } else {
            None
        };
        Self { from, to, cause, pump }
    }
}

/// Evaluate the transition table once.  Pure: no clock, no hardware.
pub fn step(state: StateId, inputs: &TickInputs, limits: &RunLimits) -> Option<Transition> {
    let (next, cause) = (STATE_TABLE[state as usize].on_update)(inputs, limits)?;
    Some(Transition::new(state, next, cause))
}

// ---------------------------------------------------------------------------
// Manual override rejection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartRejected {
    /// A cycle is running or cooling down.
    NotIdle(StateId),
    /// The tank interlock reports no water.
    NoWater,
}

impl core::fmt::Display for StartRejected {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotIdle(state) => write!(f, "controller is {state}"),
            Self::NoWater => write!(f, "tank empty"),
        }
    }
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// Current state plus the time it was entered.
#[derive(Debug, Clone)]
pub struct StateMachine {
    current: StateId,
    entered_at_ms: u64,
}

impl StateMachine {
    /// Start in `Idle`, entered at boot time.
    pub fn new(boot_ms: u64) -> Self {
        info!("FSM starting in state: {}", StateId::Idle);
        Self {
            current: StateId::Idle,
            entered_at_ms: boot_ms,
        }
    }

    pub fn state(&self) -> StateId {
        self.current
    }

    pub fn entered_at(&self) -> u64 {
        self.entered_at_ms
    }

    /// Milliseconds spent in the current state.
    pub fn elapsed(&self, now_ms: u64) -> u64 {
        now_ms.wrapping_sub(self.entered_at_ms)
    }

    /// Advance the FSM by one sampling tick.
    ///
    /// `inputs.elapsed_ms` is overwritten from the internal entry time.
    pub fn tick(&mut self, now_ms: u64, inputs: TickInputs, limits: &RunLimits) -> Option<Transition> {
        let inputs = TickInputs {
            elapsed_ms: self.elapsed(now_ms),
            ..inputs
        };
        let transition = step(self.current, &inputs, limits)?;
        self.apply(&transition, now_ms);
        Some(transition)
    }

    /// Operator `START`: only from `Idle`, only with water present.
    pub fn start_manual(&mut self, now_ms: u64, water_present: bool) -> Result<Transition, StartRejected> {
        if self.current != StateId::Idle {
            return Err(StartRejected::NotIdle(self.current));
        }
        if !water_present {
            return Err(StartRejected::NoWater);
        }
        let transition = Transition::new(self.current, StateId::Watering, TransitionCause::ManualStart);
        self.apply(&transition, now_ms);
        Ok(transition)
    }

    /// Operator `STOP`: accepted from any state.  The pump is always
    /// commanded off and the cooldown (re)starts now.
    pub fn stop_manual(&mut self, now_ms: u64) -> Transition {
        let transition = Transition {
            pump: Some(PumpCommand::Stop),
            ..Transition::new(self.current, StateId::Cooldown, TransitionCause::ManualStop)
        };
        self.apply(&transition, now_ms);
        transition
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn apply(&mut self, transition: &Transition, now_ms: u64) {
        info!(
            "FSM transition: {} -> {} ({})",
            transition.from, transition.to, transition.cause
        );
        self.current = transition.to;
        self.entered_at_ms = now_ms;
    }
}
