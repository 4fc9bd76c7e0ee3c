//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger.  Operator-facing lines go to the console port; this
//! sink is the diagnostic side channel.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!("TELEM | {}", t);
            }
            AppEvent::StateChanged { from, to, cause } => {
                info!("STATE | {} -> {} ({})", from, to, cause);
            }
            AppEvent::Started { thresholds, source } => {
                info!(
                    "START | dry={} wet={} source={:?}",
                    thresholds.dry(),
                    thresholds.wet(),
                    source
                );
            }
            AppEvent::ThresholdsChanged(t) => {
                info!("CONFIG | dry={} wet={} (unsaved)", t.dry(), t.wet());
            }
            AppEvent::ConfigSaved(t) => {
                info!("CONFIG | saved dry={} wet={}", t.dry(), t.wet());
            }
            AppEvent::CommandRejected(reason) => {
                warn!("CMD | START rejected: {}", reason);
            }
            AppEvent::PumpFault { requested_on } => {
                warn!("FAULT | pump relay write failed (requested on={})", requested_on);
            }
        }
    }
}
