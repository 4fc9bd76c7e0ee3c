//! In-memory GPIO for host builds and tests.
//!
//! Clones share the same level, so a test can keep one handle as a probe
//! while a driver owns the other.  `set_faulty(true)` makes every access
//! fail, for exercising error paths.

use std::cell::Cell;
use std::rc::Rc;

use embedded_hal::digital::{Error, ErrorKind, ErrorType, InputPin, OutputPin};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimPinFault;

impl Error for SimPinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimPin {
    level: Rc<Cell<bool>>,
    faulty: Rc<Cell<bool>>,
}

impl SimPin {
    pub fn new(high: bool) -> Self {
        Self {
            level: Rc::new(Cell::new(high)),
            faulty: Rc::new(Cell::new(false)),
        }
    }

    pub fn level(&self) -> bool {
        self.level.get()
    }

    pub fn set_level(&self, high: bool) {
        self.level.set(high);
    }

    pub fn set_faulty(&self, faulty: bool) {
        self.faulty.set(faulty);
    }

    fn check(&self) -> Result<(), SimPinFault> {
        if self.faulty.get() {
            Err(SimPinFault)
        } else {
            Ok(())
        }
    }
}

impl ErrorType for SimPin {
    type Error = SimPinFault;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.check()?;
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|h| !h)
    }
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.check()?;
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.check()?;
        self.level.set(true);
        Ok(())
    }
}
