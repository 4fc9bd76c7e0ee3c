//! Fuzz target: `parse_command`
//!
//! Any text must parse without panicking, and threshold arguments must
//! always land inside the sensor range.
//!
//! cargo fuzz run fuzz_command_parser

#![no_main]

use irrigator::app::commands::AppCommand;
use irrigator::config::ADC_MAX;
use irrigator::console::parse_command;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = core::str::from_utf8(data) else {
        return;
    };

    match parse_command(line) {
        AppCommand::SetDry(v) | AppCommand::SetWet(v) => {
            assert!(v <= ADC_MAX, "threshold {v} out of range");
        }
        _ => {}
    }
});
