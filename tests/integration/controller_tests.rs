//! Integration tests for the Controller → FSM → pump pipeline.
//!
//! A fake millisecond clock drives [`Bench`] through whole watering
//! cycles; sampling runs every 200 ms and telemetry every 2 s.

use super::mock_hw::{ActuatorCall, Bench, MockHardware};

use irrigator::app::events::AppEvent;
use irrigator::fsm::StateId;
use irrigator::fsm::context::TransitionCause;

fn causes(bench: &Bench) -> Vec<TransitionCause> {
    bench
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::StateChanged { cause, .. } => Some(*cause),
            _ => None,
        })
        .collect()
}

// ── Full automatic cycle ──────────────────────────────────────

#[test]
fn dry_soil_full_cycle_idle_watering_cooldown_idle() {
    let mut bench = Bench::boot();
    bench.hw.soil = 300;

    // One sampling tick at t=200 ms: avg 300 <= dry 450 with water.
    bench.run_until(200);
    assert_eq!(bench.state(), StateId::Watering);
    assert!(bench.hw.pump_running());

    // Soil turns wet; the minimum run still has to elapse.
    bench.hw.soil = 530;
    bench.run_until(200 + 20_000 - 200);
    assert_eq!(bench.state(), StateId::Watering, "must not stop before min run");

    bench.run_until(200 + 20_000);
    assert_eq!(bench.state(), StateId::Cooldown);
    assert!(!bench.hw.pump_running());

    // Cooldown lasts 60 s from t=20 200.
    bench.run_until(20_200 + 60_000 - 200);
    assert_eq!(bench.state(), StateId::Cooldown);
    bench.run_until(20_200 + 60_000);
    assert_eq!(bench.state(), StateId::Idle);

    // Wet soil keeps it idle.
    bench.run_for(10_000);
    assert_eq!(bench.state(), StateId::Idle);

    assert_eq!(
        causes(&bench),
        vec![
            TransitionCause::SoilDry,
            TransitionCause::SoilWet,
            TransitionCause::CooldownElapsed,
        ]
    );
}

#[test]
fn max_run_cuts_off_even_if_soil_stays_dry() {
    let mut bench = Bench::boot();
    bench.hw.soil = 100;
    bench.run_until(200);
    assert_eq!(bench.state(), StateId::Watering);

    bench.run_until(200 + 120_000 - 200);
    assert_eq!(bench.state(), StateId::Watering);
    bench.run_until(200 + 120_000);
    assert_eq!(bench.state(), StateId::Cooldown);
    assert!(!bench.hw.pump_running());
    assert_eq!(causes(&bench).last(), Some(&TransitionCause::MaxRunReached));
}

// ── Interlock ─────────────────────────────────────────────────

#[test]
fn empty_tank_never_starts_watering() {
    let mut hw = MockHardware::new();
    hw.water = false;
    hw.soil = 100;
    let store = Bench::boot().store;
    let mut bench = Bench::boot_with(hw, store);

    bench.run_for(30_000);
    assert_eq!(bench.state(), StateId::Idle);
    assert!(
        bench
            .hw
            .calls
            .iter()
            .all(|c| *c == ActuatorCall::SetPump(false)),
        "pump must never be commanded on"
    );
}

#[test]
fn losing_water_stops_pump_before_min_run() {
    let mut bench = Bench::boot();
    bench.hw.soil = 300;
    bench.run_until(200);
    assert_eq!(bench.state(), StateId::Watering);

    bench.run_for(1_000);
    bench.hw.water = false;
    bench.run_for(200);
    assert_eq!(bench.state(), StateId::Cooldown);
    assert!(!bench.hw.pump_running());
    assert_eq!(causes(&bench).last(), Some(&TransitionCause::InterlockLost));
}

// ── Fault tolerance ───────────────────────────────────────────

#[test]
fn sensor_failure_keeps_last_reading() {
    let mut bench = Bench::boot();
    bench.hw.soil = 600;
    bench.run_until(1_000);
    let before = bench.controller.telemetry(bench.now);

    bench.hw.soil_fault = true;
    bench.hw.soil = 100;
    bench.run_for(2_000);

    let after = bench.controller.telemetry(bench.now);
    assert_eq!(after.raw, before.raw);
    assert_eq!(after.filtered, before.filtered);
    assert_eq!(bench.state(), StateId::Idle);
}

#[test]
fn timed_states_advance_while_sensor_is_failing() {
    let mut bench = Bench::boot();
    bench.hw.soil_fault = true;
    bench.hw.soil = 100;

    // No good sample yet: START is still honoured, and max run still applies.
    assert_eq!(bench.command("START")[0], "Watering...");
    bench.run_for(120_000 + 200);
    assert_eq!(bench.state(), StateId::Cooldown);
    assert!(!bench.hw.pump_running());
}

#[test]
fn relay_fault_is_reported_but_not_fatal() {
    let mut bench = Bench::boot();
    bench.hw.relay_fault = true;
    bench.hw.soil = 300;
    bench.run_until(200);

    assert_eq!(bench.state(), StateId::Watering);
    assert!(bench
        .sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::PumpFault { requested_on: true })));

    bench.hw.relay_fault = false;
    assert_eq!(bench.command("STOP")[0], "Stopped -> Cooldown");
    assert_eq!(bench.hw.last_call(), Some(&ActuatorCall::SetPump(false)));
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn telemetry_every_two_seconds() {
    let mut bench = Bench::boot();
    bench.hw.soil = 700;
    bench.run_until(6_000);

    let lines = bench.telemetry_lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "STATE=IDLE RAW=700 AVG=700 DRY=450 WET=520 TANK=OK ELAPSE=2000"
    );
    assert!(lines[2].ends_with("ELAPSE=6000"));
    assert_eq!(
        bench
            .sink
            .events
            .iter()
            .filter(|e| matches!(e, AppEvent::Telemetry(_)))
            .count(),
        3
    );
}

#[test]
fn telemetry_reports_empty_tank() {
    let mut bench = Bench::boot();
    bench.hw.water = false;
    bench.run_until(2_000);
    assert!(bench.telemetry_lines()[0].contains("TANK=EMPTY"));
}
