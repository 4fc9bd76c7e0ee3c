//! Threshold record store.
//!
//! Persists the runtime-tunable [`Thresholds`] as a fixed-width record in
//! any byte-addressed [`RecordStore`]:
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────────┐
//! │ magic (2B)   │ dry (2B)     │ wet (2B)     │
//! │ LE u16 BEEF  │ LE u16       │ LE u16       │
//! └──────────────┴──────────────┴──────────────┘
//!   offset 0       offset 2       offset 4
//! ```
//!
//! There is no checksum.  A record is valid iff the marker matches; a
//! matching record is still re-clamped into `0..=ADC_MAX` on load.

use log::{info, warn};

use crate::app::ports::{ConfigPort, LoadOutcome, RecordStore};
use crate::config::{ADC_MAX, Thresholds};
use crate::error::StorageError;

/// Marker stored in front of every valid record.
pub const MAGIC: u16 = 0xBEEF;

/// Byte offset of the record inside the store.
pub const RECORD_OFFSET: usize = 0;

/// Encoded record size.
pub const RECORD_LEN: usize = 6;

/// Encode `thresholds` into the on-storage layout.
pub fn encode_record(thresholds: &Thresholds) -> [u8; RECORD_LEN] {
    let mut out = [0u8; RECORD_LEN];
    out[0..2].copy_from_slice(&MAGIC.to_le_bytes());
    out[2..4].copy_from_slice(&thresholds.dry().to_le_bytes());
    out[4..6].copy_from_slice(&thresholds.wet().to_le_bytes());
    out
}

/// Decode a record.  `None` when the marker does not match.
///
/// Out-of-range fields are clamped; the second tuple element reports
/// whether clamping was needed.
pub fn decode_record(bytes: &[u8; RECORD_LEN]) -> Option<(Thresholds, bool)> {
    let magic = u16::from_le_bytes([bytes[0], bytes[1]]);
    if magic != MAGIC {
        return None;
    }
    let dry = u16::from_le_bytes([bytes[2], bytes[3]]);
    let wet = u16::from_le_bytes([bytes[4], bytes[5]]);
    let clamped = dry > ADC_MAX || wet > ADC_MAX;
    Some((Thresholds::new(i64::from(dry), i64::from(wet)), clamped))
}

/// [`ConfigPort`] over a [`RecordStore`].
pub struct ThresholdStore<S> {
    store: S,
}

impl<S: RecordStore> ThresholdStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

impl<S: RecordStore> ConfigPort for ThresholdStore<S> {
    fn load(&self) -> LoadOutcome {
        let mut buf = [0u8; RECORD_LEN];
        if let Err(e) = self.store.read_bytes(RECORD_OFFSET, &mut buf) {
            warn!("ThresholdStore: read failed ({}), using defaults", e);
            return LoadOutcome::Uninitialized;
        }

        match decode_record(&buf) {
            Some((thresholds, clamped)) => {
                if clamped {
                    warn!(
                        "ThresholdStore: stored thresholds out of range, clamped to dry={} wet={}",
                        thresholds.dry(),
                        thresholds.wet()
                    );
                }
                info!(
                    "ThresholdStore: loaded dry={} wet={}",
                    thresholds.dry(),
                    thresholds.wet()
                );
                LoadOutcome::Stored(thresholds)
            }
            None => {
                info!("ThresholdStore: no valid record, using defaults");
                LoadOutcome::Uninitialized
            }
        }
    }

    fn save(&mut self, thresholds: &Thresholds) -> Result<(), StorageError> {
        let record = encode_record(thresholds);
        self.store.write_bytes(RECORD_OFFSET, &record)?;
        info!(
            "ThresholdStore: saved dry={} wet={}",
            thresholds.dry(),
            thresholds.wet()
        );
        Ok(())
    }
}
