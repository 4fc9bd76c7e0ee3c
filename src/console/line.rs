//! Streaming line assembler for the operator console.
//!
//! Bytes arrive one at a time from a non-blocking [`ConsolePort`] and are
//! accumulated until `\n` or `\r`.  A `\n` directly after `\r` is swallowed,
//! so LF, CR and CRLF terminals each produce one line per Enter.  A single
//! poll may see part of a line, a whole line, or several lines back to
//! back; only the first complete line is returned and the rest stays
//! queued in the port.
//!
//! Every terminator yields a line, even an empty one, so the operator
//! always gets a reply.  Lines are bounded: once [`LINE_CAPACITY`] bytes
//! are buffered, further bytes are dropped and the overlong line is
//! yielded as an empty line, which no command matches.

use heapless::{String, Vec};
use log::warn;

use crate::app::ports::ConsolePort;

/// Maximum accepted line length in bytes (excluding the terminator).
pub const LINE_CAPACITY: usize = 128;

/// Upper bound on bytes consumed by one [`LineAssembler::poll_line`] call.
const MAX_BYTES_PER_POLL: usize = 2 * LINE_CAPACITY;

/// Accumulates console bytes into complete lines.
pub struct LineAssembler<const CAP: usize = LINE_CAPACITY> {
    buf: Vec<u8, CAP>,
    overflowed: bool,
    after_cr: bool,
}

impl<const CAP: usize> Default for LineAssembler<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> LineAssembler<CAP> {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            overflowed: false,
            after_cr: false,
        }
    }

    /// Feed one byte.  Returns a line when `byte` terminates one; an
    /// overlong line comes back empty.
    pub fn feed(&mut self, byte: u8) -> Option<String<CAP>> {
        let after_cr = core::mem::replace(&mut self.after_cr, byte == b'\r');
        match byte {
            b'\n' if after_cr => None,
            b'\n' | b'\r' => {
                let overflowed = core::mem::replace(&mut self.overflowed, false);
                let line = if overflowed { String::new() } else { self.take_line() };
                self.buf.clear();
                Some(line)
            }
            _ => {
                if self.buf.push(byte).is_err() && !self.overflowed {
                    warn!("console: line exceeds {} bytes, discarding", CAP);
                    self.overflowed = true;
                }
                None
            }
        }
    }

    /// Drain bytes from `console` until a full line is assembled or the
    /// port has nothing more to give.
    pub fn poll_line<C: ConsolePort + ?Sized>(&mut self, console: &mut C) -> Option<String<CAP>> {
        for _ in 0..MAX_BYTES_PER_POLL {
            let byte = console.read_byte()?;
            if let Some(line) = self.feed(byte) {
                return Some(line);
            }
        }
        None
    }

    /// Bytes buffered for the line in progress.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    pub fn reset(&mut self) {
        self.buf.clear();
        self.overflowed = false;
        self.after_cr = false;
    }

    fn take_line(&self) -> String<CAP> {
        // Non-ASCII bytes never form a valid command; keep them visible
        // as '?' so the line still reaches the parser.  One char per
        // buffered byte, so the push cannot overflow.
        let mut line = String::new();
        for &b in &self.buf {
            let c = if b.is_ascii() { b as char } else { '?' };
            if line.push(c).is_err() {
                break;
            }
        }
        line
    }
}
