//! Moving-average filter for raw soil readings.
//!
//! A fixed-capacity history of the last `N` samples, backed by
//! [`heapless::HistoryBuffer`] so the write position and fill count never
//! leak out of this type.  The smoothed value is the truncating integer
//! mean of every sample currently held.

use heapless::HistoryBuffer;

/// Default averaging window (samples).
pub const DEFAULT_WINDOW: usize = 15;

pub struct SampleFilter<const N: usize = DEFAULT_WINDOW> {
    history: HistoryBuffer<u16, N>,
}

impl<const N: usize> Default for SampleFilter<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SampleFilter<N> {
    pub fn new() -> Self {
        Self {
            history: HistoryBuffer::new(),
        }
    }

    /// Record a raw reading (overwriting the oldest once full) and return
    /// the new smoothed value.
    pub fn push(&mut self, raw: u16) -> u16 {
        self.history.write(raw);
        // Non-empty after the write above.
        self.mean().unwrap_or(raw)
    }

    /// Truncating mean of the held samples; `None` before the first push.
    pub fn mean(&self) -> Option<u16> {
        let held = self.history.as_slice();
        if held.is_empty() {
            return None;
        }
        let sum: u32 = held.iter().map(|&v| u32::from(v)).sum();
        Some((sum / held.len() as u32) as u16)
    }

    /// Number of valid samples (saturates at [`capacity`](Self::capacity)).
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.len() == 0
    }

    pub fn capacity(&self) -> usize {
        N
    }
}
