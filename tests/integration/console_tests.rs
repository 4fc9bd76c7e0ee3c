//! Operator console: byte stream in, exact replies out.

use super::mock_hw::{Bench, STEP_MS};

use irrigator::fsm::StateId;

#[test]
fn help_lists_commands() {
    let mut bench = Bench::boot();
    assert_eq!(
        bench.command("HELP"),
        vec!["Commands: STATUS, START, STOP, SET DRY x, SET WET x, SAVE, HELP"]
    );
}

#[test]
fn commands_are_case_insensitive_and_crlf_tolerant() {
    let mut bench = Bench::boot();
    assert_eq!(bench.command("  help\r")[0], "Commands: STATUS, START, STOP, SET DRY x, SET WET x, SAVE, HELP");
    assert_eq!(bench.command("set dry 400")[0], "OK");
    assert_eq!(bench.controller.thresholds().dry(), 400);
}

#[test]
fn unknown_command() {
    let mut bench = Bench::boot();
    assert_eq!(bench.command("WATER NOW")[0], "Unknown. Type HELP");
    assert_eq!(bench.command("SET DRY")[0], "Unknown. Type HELP");
}

#[test]
fn set_values_are_clamped() {
    let mut bench = Bench::boot();
    bench.command("SET DRY 5000");
    bench.command("SET WET -3");
    let t = bench.controller.thresholds();
    assert_eq!((t.dry(), t.wet()), (1023, 0));
}

#[test]
fn start_then_start_again_is_rejected() {
    let mut bench = Bench::boot();
    assert_eq!(bench.command("START")[0], "Watering...");
    assert_eq!(bench.state(), StateId::Watering);
    assert!(bench.hw.pump_running());
    assert_eq!(bench.command("START")[0], "Cannot START");
}

#[test]
fn start_rejected_without_water() {
    let mut bench = Bench::boot();
    bench.hw.water = false;
    assert_eq!(bench.command("START")[0], "Cannot START");
    assert_eq!(bench.state(), StateId::Idle);
    assert!(!bench.hw.pump_running());
}

#[test]
fn stop_from_idle_enters_cooldown() {
    let mut bench = Bench::boot();
    bench.hw.soil = 100;
    assert_eq!(bench.command("STOP")[0], "Stopped -> Cooldown");
    assert_eq!(bench.state(), StateId::Cooldown);

    // Dry soil cannot restart watering until the full cooldown has run.
    bench.run_for(59_000);
    assert_eq!(bench.state(), StateId::Cooldown);
    bench.run_for(1_000);
    assert_eq!(bench.state(), StateId::Idle);
    bench.run_for(200);
    assert_eq!(bench.state(), StateId::Watering);
}

#[test]
fn stop_in_cooldown_restarts_the_timer() {
    let mut bench = Bench::boot();
    bench.command("STOP");
    bench.run_for(50_000);
    bench.command("STOP");
    bench.run_for(50_000);
    assert_eq!(bench.state(), StateId::Cooldown);
    bench.run_for(10_000);
    assert_eq!(bench.state(), StateId::Idle);
}

#[test]
fn status_reports_last_sample() {
    let mut bench = Bench::boot();
    bench.hw.soil = 640;
    bench.run_until(1_010);
    assert_eq!(
        bench.command("STATUS")[0],
        "STATE=IDLE RAW=640 AVG=640 DRY=450 WET=520 TANK=OK ELAPSE=1010"
    );
}

#[test]
fn one_command_per_iteration() {
    let mut bench = Bench::boot();
    bench.console.take_output();
    bench.console.inject(b"HELP\nSET DRY 10\n");
    bench.poll();
    assert_eq!(bench.console.take_output().len(), 1);
    assert_eq!(bench.controller.thresholds().dry(), 450);

    bench.poll();
    assert_eq!(bench.console.take_output(), vec!["OK"]);
    assert_eq!(bench.controller.thresholds().dry(), 10);
}

#[test]
fn overlong_line_is_answered_as_unknown() {
    let mut bench = Bench::boot();
    bench.console.take_output();
    bench.console.inject("X".repeat(300).as_bytes());
    bench.console.inject(b"\n");
    // The line spans two polls before its terminator is seen.
    bench.poll();
    bench.poll();
    assert_eq!(bench.console.take_output(), vec!["Unknown. Type HELP"]);
    assert_eq!(bench.command("SAVE")[0], "Saved");
}

#[test]
fn empty_lines_are_answered_as_unknown() {
    let mut bench = Bench::boot();
    assert_eq!(bench.command(""), vec!["Unknown. Type HELP"]);
    assert_eq!(bench.command("   "), vec!["Unknown. Type HELP"]);
    assert_eq!(bench.command("\r"), vec!["Unknown. Type HELP"]);
}

#[test]
fn carriage_return_terminal_can_stop_the_pump() {
    let mut bench = Bench::boot();
    bench.console.take_output();
    bench.console.inject(b"START\r");
    bench.poll();
    assert_eq!(bench.console.take_output(), vec!["Watering..."]);
    assert!(bench.hw.pump_running());

    bench.console.inject(b"STOP\r");
    bench.poll();
    assert_eq!(bench.console.take_output(), vec!["Stopped -> Cooldown"]);
    assert_eq!(bench.state(), StateId::Cooldown);
    assert!(!bench.hw.pump_running());
}

#[test]
fn crlf_gives_a_single_reply() {
    let mut bench = Bench::boot();
    bench.console.take_output();
    bench.console.inject(b"HELP\r\nHELP\r\n");
    bench.run_for(STEP_MS * 4);
    let replies: Vec<_> = bench
        .console
        .take_output()
        .into_iter()
        .filter(|l| !l.starts_with("STATE="))
        .collect();
    assert_eq!(replies.len(), 2);
}
