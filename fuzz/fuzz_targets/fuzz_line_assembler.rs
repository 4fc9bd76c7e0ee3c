//! Fuzz target: `LineAssembler::feed`
//!
//! Drives arbitrary byte sequences into the console line assembler and
//! asserts that every yielded line is bounded and free of terminators.
//!
//! cargo fuzz run fuzz_line_assembler

#![no_main]

use irrigator::console::{LINE_CAPACITY, LineAssembler};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut asm: LineAssembler = LineAssembler::new();

    for &byte in data {
        if let Some(line) = asm.feed(byte) {
            assert!(line.len() <= LINE_CAPACITY, "line exceeds capacity");
            assert!(!line.contains('\n'), "LF leaked into line");
            assert!(!line.contains('\r'), "CR leaked into line");
        }
        assert!(asm.pending() <= LINE_CAPACITY);
    }

    // After a reset the assembler must accept a clean line again.
    asm.reset();
    for &byte in b"HELP\n" {
        let _ = asm.feed(byte);
    }
    assert_eq!(asm.pending(), 0);
});
