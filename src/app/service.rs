//! Application service — the hexagonal core.
//!
//! [`Controller`] owns the FSM, the moving-average filter, the tunable
//! thresholds and the loop cadences.  It exposes a clean, hardware-agnostic
//! API.  All I/O flows through port traits injected at call sites, making
//! the entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       Controller        │
//! ActuatorPort ◀──│ Filter · FSM · Cadence  │◀──▶ ConsolePort
//!                 └────────────────────────┘
//!                            ▲
//!                        ConfigPort
//! ```

use core::fmt;

use log::{debug, error, info, warn};

use crate::config::{SystemConfig, Thresholds};
use crate::console::{LineAssembler, parse_command};
use crate::fsm::context::{RunLimits, TickInputs};
use crate::fsm::{PumpCommand, StateId, StateMachine, Transition};
use crate::scheduler::Cadence;
use crate::sensors::SampleFilter;
use crate::telemetry::TelemetryReport;

use super::commands::{AppCommand, replies};
use super::events::{AppEvent, ThresholdSource};
use super::ports::{ActuatorPort, ConfigPort, ConsolePort, EventSink, LoadOutcome, SensorPort};

// ───────────────────────────────────────────────────────────────
// Reply
// ───────────────────────────────────────────────────────────────

/// Console response to one operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Text(&'static str),
    Status(TelemetryReport),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Status(report) => write!(f, "{report}"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

/// The irrigation controller orchestrates all domain logic.
pub struct Controller {
    fsm: StateMachine,
    limits: RunLimits,
    thresholds: Thresholds,
    filter: SampleFilter,
    lines: LineAssembler,
    sample: Cadence,
    report: Cadence,
    last_raw: u16,
    last_filtered: u16,
    water_present: bool,
}

impl Controller {
    /// Construct the controller at time `now_ms` with default thresholds.
    ///
    /// Does **not** touch hardware — call [`boot`](Self::boot) next.
    pub fn new(config: &SystemConfig, now_ms: u64) -> Self {
        Self {
            fsm: StateMachine::new(now_ms),
            limits: config.run_limits(),
            thresholds: Thresholds::default(),
            filter: SampleFilter::new(),
            lines: LineAssembler::new(),
            sample: Cadence::new(u64::from(config.sample_interval_ms), now_ms),
            report: Cadence::new(u64::from(config.telemetry_interval_ms), now_ms),
            last_raw: 0,
            last_filtered: 0,
            water_present: true,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Force the pump off, load persisted thresholds and greet the operator.
    pub fn boot(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        store: &impl ConfigPort,
        console: &mut impl ConsolePort,
        sink: &mut impl EventSink,
    ) {
        if let Err(e) = hw.set_pump(false) {
            error!("Boot: failed to force pump off: {}", e);
            sink.emit(&AppEvent::PumpFault {
                requested_on: false,
            });
        }

        let outcome = store.load();
        self.thresholds = outcome.thresholds_or_default();
        let source = match outcome {
            LoadOutcome::Stored(_) => ThresholdSource::Stored,
            LoadOutcome::Uninitialized => ThresholdSource::Defaults,
        };
        self.water_present = hw.water_present();

        console.write_line(replies::BOOT);
        info!(
            "Controller booted: dry={} wet={} ({:?})",
            self.thresholds.dry(),
            self.thresholds.wet(),
            source
        );
        sink.emit(&AppEvent::Started {
            thresholds: self.thresholds,
            source,
        });
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one main-loop iteration: at most one console command, then
    /// the sampling tick if due, then telemetry if due.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn poll(
        &mut self,
        now_ms: u64,
        hw: &mut (impl SensorPort + ActuatorPort),
        console: &mut impl ConsolePort,
        store: &mut impl ConfigPort,
        sink: &mut impl EventSink,
    ) {
        if let Some(line) = self.lines.poll_line(console) {
            let cmd = parse_command(&line);
            debug!("console: {:?} -> {:?}", line.as_str(), cmd);
            let reply = self.handle_command(cmd, now_ms, hw, store, sink);
            console.write_line(&reply.to_string());
        }

        if self.sample.due(now_ms) {
            self.sample_tick(now_ms, hw, sink);
        }

        if self.report.due(now_ms) {
            let report = self.telemetry(now_ms);
            console.write_line(&report.to_string());
            sink.emit(&AppEvent::Telemetry(report));
        }
    }

    /// Read the soil probe, update the average and advance the FSM.
    fn sample_tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        match hw.read_soil() {
            Ok(raw) => {
                self.last_raw = raw;
                self.last_filtered = self.filter.push(raw);
            }
            Err(e) => warn!("Soil read failed ({}), keeping last reading", e),
        }

        self.refresh_interlock(hw);

        // Without a single good sample the Idle rule would see AVG=0 as
        // "dry".  Timed states still advance so max run and cooldown hold.
        if self.filter.is_empty() && self.fsm.state() == StateId::Idle {
            return;
        }

        let inputs = TickInputs {
            filtered: self.last_filtered,
            dry_threshold: self.thresholds.dry(),
            wet_threshold: self.thresholds.wet(),
            water_present: self.water_present,
            elapsed_ms: 0,
        };
        if let Some(transition) = self.fsm.tick(now_ms, inputs, &self.limits) {
            self.apply_transition(&transition, hw, sink);
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process one operator command and return the console response.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        now_ms: u64,
        hw: &mut (impl SensorPort + ActuatorPort),
        store: &mut impl ConfigPort,
        sink: &mut impl EventSink,
    ) -> Reply {
        match cmd {
            AppCommand::Help => Reply::Text(replies::HELP),
            AppCommand::Status => {
                self.refresh_interlock(hw);
                Reply::Status(self.telemetry(now_ms))
            }
            AppCommand::Start => {
                self.refresh_interlock(hw);
                match self.fsm.start_manual(now_ms, self.water_present) {
                    Ok(transition) => {
                        info!("Manual START accepted");
                        self.apply_transition(&transition, hw, sink);
                        Reply::Text(replies::STARTED)
                    }
                    Err(reason) => {
                        warn!("Manual START rejected: {}", reason);
                        sink.emit(&AppEvent::CommandRejected(reason));
                        Reply::Text(replies::START_REJECTED)
                    }
                }
            }
            AppCommand::Stop => {
                info!("Manual STOP");
                let transition = self.fsm.stop_manual(now_ms);
                self.apply_transition(&transition, hw, sink);
                Reply::Text(replies::STOPPED)
            }
            AppCommand::SetDry(value) => {
                self.thresholds.set_dry(i64::from(value));
                info!("Dry threshold set to {}", self.thresholds.dry());
                sink.emit(&AppEvent::ThresholdsChanged(self.thresholds));
                Reply::Text(replies::OK)
            }
            AppCommand::SetWet(value) => {
                self.thresholds.set_wet(i64::from(value));
                info!("Wet threshold set to {}", self.thresholds.wet());
                sink.emit(&AppEvent::ThresholdsChanged(self.thresholds));
                Reply::Text(replies::OK)
            }
            AppCommand::Save => match store.save(&self.thresholds) {
                Ok(()) => {
                    sink.emit(&AppEvent::ConfigSaved(self.thresholds));
                    Reply::Text(replies::SAVED)
                }
                Err(e) => {
                    warn!("SAVE failed: {}", e);
                    Reply::Text(replies::SAVE_FAILED)
                }
            },
            AppCommand::Unknown => Reply::Text(replies::UNKNOWN),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Snapshot of the most recent sample and the current state.
    pub fn telemetry(&self, now_ms: u64) -> TelemetryReport {
        TelemetryReport {
            state: self.fsm.state(),
            raw: self.last_raw,
            filtered: self.last_filtered,
            dry: self.thresholds.dry(),
            wet: self.thresholds.wet(),
            water_present: self.water_present,
            elapsed_ms: self.fsm.elapsed(now_ms),
        }
    }

    pub fn state(&self) -> StateId {
        self.fsm.state()
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Number of readings currently in the averaging window.
    pub fn samples_buffered(&self) -> usize {
        self.filter.len()
    }

    // ── Internal ──────────────────────────────────────────────

    /// Take a live tank reading, logging when it changes.
    fn refresh_interlock(&mut self, hw: &mut impl SensorPort) {
        let water = hw.water_present();
        if water != self.water_present {
            info!("Tank interlock: {}", if water { "water present" } else { "EMPTY" });
            self.water_present = water;
        }
    }

    /// Drive the pump as the transition requires and publish it.
    fn apply_transition(
        &self,
        transition: &Transition,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        if let Some(cmd) = transition.pump {
            let on = cmd == PumpCommand::Start;
            if let Err(e) = hw.set_pump(on) {
                error!("Pump relay write failed ({}), requested on={}", e, on);
                sink.emit(&AppEvent::PumpFault { requested_on: on });
            }
        }
        sink.emit(&AppEvent::StateChanged {
            from: transition.from,
            to: transition.to,
            cause: transition.cause,
        });
    }
}
