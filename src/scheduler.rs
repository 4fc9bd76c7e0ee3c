//! Fixed-cadence timers for the cooperative main loop.
//!
//! The loop never sleeps on a particular job.  Each periodic job owns a
//! [`Cadence`] and asks it on every iteration whether it is due:
//!
//! ```text
//! ┌────────────── poll(now) ──────────────┐
//! │  console line?  → handle command      │
//! │  sample.due()   → read, filter, FSM   │
//! │  report.due()   → telemetry line      │
//! └───────────────────────────────────────┘
//! ```
//!
//! Elapsed time uses wrapping subtraction, so a counter wrap never stalls
//! a job.

/// Fires at most once per `interval_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    interval_ms: u64,
    last_ms: u64,
}

impl Cadence {
    /// A cadence whose first firing is one interval after `start_ms`.
    pub fn new(interval_ms: u64, start_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: start_ms,
        }
    }

    /// `true` when at least one interval has passed since the last firing.
    /// Firing rebases the cadence on `now_ms`; missed periods are not
    /// replayed.
    pub fn due(&mut self, now_ms: u64) -> bool {
        if now_ms.wrapping_sub(self.last_ms) >= self.interval_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}
