//! Mock hardware and a simulated bench for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO registers.  The console and the
//! record store are the library's own host backends.

use irrigator::adapters::console::SerialConsole;
use irrigator::adapters::nvs::NvsRecordStore;
use irrigator::app::events::AppEvent;
use irrigator::app::ports::{ActuatorPort, EventSink, SensorPort};
use irrigator::app::service::Controller;
use irrigator::config::SystemConfig;
use irrigator::error::{ActuatorError, SensorError};
use irrigator::fsm::StateId;
use irrigator::storage::ThresholdStore;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    SetPump(bool),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub soil: u16,
    pub soil_fault: bool,
    pub water: bool,
    pub relay_fault: bool,
    pub calls: Vec<ActuatorCall>,
    pump: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            soil: 1023,
            soil_fault: false,
            water: true,
            relay_fault: false,
            calls: Vec::new(),
            pump: false,
        }
    }

    pub fn last_call(&self) -> Option<&ActuatorCall> {
        self.calls.last()
    }

    /// Pump state after the last successful relay write.
    pub fn pump_running(&self) -> bool {
        self.pump
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_soil(&mut self) -> Result<u16, SensorError> {
        if self.soil_fault {
            Err(SensorError::AdcReadFailed)
        } else {
            Ok(self.soil)
        }
    }

    fn water_present(&mut self) -> bool {
        self.water
    }
}

impl ActuatorPort for MockHardware {
    fn set_pump(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.calls.push(ActuatorCall::SetPump(on));
        if self.relay_fault {
            return Err(ActuatorError::GpioWriteFailed);
        }
        self.pump = on;
        Ok(())
    }

    fn pump_on(&self) -> bool {
        self.pump
    }
}

// ── Event recorder ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Bench: controller plus every port, driven by a fake clock ─

/// Poll step used when advancing simulated time.
pub const STEP_MS: u64 = 10;

pub struct Bench {
    pub controller: Controller,
    pub hw: MockHardware,
    pub console: SerialConsole,
    pub store: ThresholdStore<NvsRecordStore>,
    pub sink: RecordingSink,
    pub now: u64,
}

#[allow(dead_code)]
impl Bench {
    /// Boot a controller at t=0 on a fresh (erased) store.
    pub fn boot() -> Self {
        let store = ThresholdStore::new(NvsRecordStore::new().unwrap());
        Self::boot_with(MockHardware::new(), store)
    }

    pub fn boot_with(mut hw: MockHardware, store: ThresholdStore<NvsRecordStore>) -> Self {
        let config = SystemConfig::default();
        let mut controller = Controller::new(&config, 0);
        let mut console = SerialConsole::new();
        let mut sink = RecordingSink::default();
        controller.boot(&mut hw, &store, &mut console, &mut sink);
        Self {
            controller,
            hw,
            console,
            store,
            sink,
            now: 0,
        }
    }

    /// One loop iteration at the current time.
    pub fn poll(&mut self) {
        self.controller.poll(
            self.now,
            &mut self.hw,
            &mut self.console,
            &mut self.store,
            &mut self.sink,
        );
    }

    /// Advance to absolute time `t`, polling every [`STEP_MS`].
    pub fn run_until(&mut self, t: u64) {
        while self.now < t {
            self.now = (self.now + STEP_MS).min(t);
            self.poll();
        }
    }

    pub fn run_for(&mut self, ms: u64) {
        self.run_until(self.now + ms);
    }

    /// Type a line and poll once; returns the lines written in response.
    pub fn command(&mut self, line: &str) -> Vec<String> {
        self.console.take_output();
        self.console.inject(line.as_bytes());
        self.console.inject(b"\n");
        self.poll();
        self.console.take_output()
    }

    pub fn state(&self) -> StateId {
        self.controller.state()
    }

    pub fn telemetry_lines(&self) -> Vec<&str> {
        self.console
            .output()
            .iter()
            .map(String::as_str)
            .filter(|l| l.starts_with("STATE="))
            .collect()
    }
}
