//! Outbound application events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::config::Thresholds;
use crate::fsm::{StartRejected, StateId};
use crate::fsm::context::TransitionCause;
use crate::telemetry::TelemetryReport;

/// Where the boot-time thresholds came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdSource {
    Stored,
    Defaults,
}

/// Structured events emitted by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller has booted (carries the thresholds in effect).
    Started {
        thresholds: Thresholds,
        source: ThresholdSource,
    },

    /// The FSM transitioned between states.
    StateChanged {
        from: StateId,
        to: StateId,
        cause: TransitionCause,
    },

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryReport),

    /// A `SET` command changed a threshold.
    ThresholdsChanged(Thresholds),

    /// Thresholds were written to durable storage.
    ConfigSaved(Thresholds),

    /// A manual `START` was refused.
    CommandRejected(StartRejected),

    /// The pump relay could not be driven.
    PumpFault { requested_on: bool },
}
