//! Threshold persistence across reboots, through the console.

use super::mock_hw::{Bench, MockHardware};

use irrigator::adapters::nvs::NvsRecordStore;
use irrigator::app::events::{AppEvent, ThresholdSource};
use irrigator::app::ports::{ConfigPort, LoadOutcome, RecordStore};
use irrigator::config::Thresholds;
use irrigator::storage::ThresholdStore;

fn reboot(bench: Bench) -> Bench {
    Bench::boot_with(MockHardware::new(), bench.store)
}

fn boot_source(bench: &Bench) -> Option<ThresholdSource> {
    bench.sink.events.iter().find_map(|e| match e {
        AppEvent::Started { source, .. } => Some(*source),
        _ => None,
    })
}

#[test]
fn first_boot_uses_defaults() {
    let bench = Bench::boot();
    assert_eq!(bench.controller.thresholds(), Thresholds::default());
    assert_eq!(boot_source(&bench), Some(ThresholdSource::Defaults));
    assert_eq!(bench.console.output()[0], "Irrigation boot. Type HELP.");
}

#[test]
fn saved_thresholds_survive_reboot() {
    let mut bench = Bench::boot();
    assert_eq!(bench.command("SET DRY 380")[0], "OK");
    assert_eq!(bench.command("SET WET 610")[0], "OK");
    assert_eq!(bench.command("SAVE")[0], "Saved");

    let bench = reboot(bench);
    assert_eq!(bench.controller.thresholds(), Thresholds::new(380, 610));
    assert_eq!(boot_source(&bench), Some(ThresholdSource::Stored));
}

#[test]
fn unsaved_changes_are_lost_on_reboot() {
    let mut bench = Bench::boot();
    bench.command("SET DRY 100");
    assert_eq!(bench.controller.thresholds().dry(), 100);

    let bench = reboot(bench);
    assert_eq!(bench.controller.thresholds(), Thresholds::default());
}

#[test]
fn second_save_replaces_first() {
    let mut bench = Bench::boot();
    bench.command("SET DRY 300");
    bench.command("SAVE");
    bench.command("SET DRY 301");
    bench.command("SAVE");
    assert_eq!(
        bench.store.load(),
        LoadOutcome::Stored(Thresholds::new(301, 520))
    );
}

#[test]
fn out_of_range_record_is_clamped_on_boot() {
    let mut nvs = NvsRecordStore::new().unwrap();
    // Marker intact, dry = 4000, wet = 10.
    nvs.write_bytes(0, &[0xEF, 0xBE, 0xA0, 0x0F, 0x0A, 0x00])
        .unwrap();
    let bench = Bench::boot_with(MockHardware::new(), ThresholdStore::new(nvs));
    assert_eq!(bench.controller.thresholds(), Thresholds::new(1023, 10));
}

#[test]
fn failed_save_reports_to_operator() {
    let mut bench = Bench::boot();
    bench.store.inner_mut().set_fail_io(true);
    assert_eq!(bench.command("SAVE")[0], "Save failed");
    assert!(!bench
        .sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::ConfigSaved(_))));
}

#[test]
fn unreadable_store_boots_with_defaults() {
    let mut nvs = NvsRecordStore::new().unwrap();
    nvs.write_bytes(0, &[0xEF, 0xBE, 0x10, 0x00, 0x20, 0x00])
        .unwrap();
    nvs.set_fail_io(true);
    let bench = Bench::boot_with(MockHardware::new(), ThresholdStore::new(nvs));
    assert_eq!(bench.controller.thresholds(), Thresholds::default());
    assert_eq!(boot_source(&bench), Some(ThresholdSource::Defaults));
}
