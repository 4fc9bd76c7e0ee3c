//! Serial console adapter.
//!
//! Implements [`ConsolePort`] for the operator UART.
//!
//! - **`target_os = "espidf"`** — an `esp-idf-hal` [`UartDriver`] polled
//!   with a zero timeout, so `read_byte` never blocks the control loop.
//! - **`not(target_os = "espidf")`** — an in-memory byte queue plus a log
//!   of written lines, for host tests and simulation.

use crate::app::ports::ConsolePort;

#[cfg(target_os = "espidf")]
use esp_idf_hal::{delay::NON_BLOCK, uart::UartDriver};

/// Line terminator appended to every written line.
pub const LINE_END: &[u8] = b"\r\n";

#[cfg(target_os = "espidf")]
pub struct SerialConsole {
    uart: UartDriver<'static>,
}

#[cfg(target_os = "espidf")]
impl SerialConsole {
    pub fn new(uart: UartDriver<'static>) -> Self {
        Self { uart }
    }
}

#[cfg(target_os = "espidf")]
impl ConsolePort for SerialConsole {
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.uart.read(&mut byte, NON_BLOCK) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }

    fn write_line(&mut self, line: &str) {
        let written = self
            .uart
            .write(line.as_bytes())
            .and_then(|_| self.uart.write(LINE_END));
        if let Err(e) = written {
            log::warn!("console: UART write failed: {}", e);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct SerialConsole {
    input: std::collections::VecDeque<u8>,
    output: Vec<String>,
}

#[cfg(not(target_os = "espidf"))]
impl SerialConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue raw bytes as if the operator had typed them.
    pub fn inject(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    /// Bytes not yet consumed by the controller.
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// Every line written so far, in order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Drain the written lines.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }
}

#[cfg(not(target_os = "espidf"))]
impl ConsolePort for SerialConsole {
    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn write_line(&mut self, line: &str) {
        self.output.push(line.to_owned());
    }
}
