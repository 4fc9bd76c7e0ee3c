//! Capacitive soil moisture probe.
//!
//! The probe outputs an analog voltage read through an ESP32-S3 ADC1
//! channel at 12-bit resolution.  Readings are scaled down to the 10-bit
//! `0..=1023` range the thresholds are expressed in.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.

use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::config::ADC_MAX;
use crate::error::SensorError;

static SIM_SOIL_RAW: AtomicU16 = AtomicU16::new(ADC_MAX);

/// Inject the next simulated reading (already in 10-bit units).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_soil_raw(raw: u16) {
    SIM_SOIL_RAW.store(raw, Ordering::Relaxed);
}

/// Scale a 12-bit ADC sample (0 – 4095) down to 10 bits.
pub fn scale_12_to_10(raw12: u16) -> u16 {
    (raw12 >> 2).min(ADC_MAX)
}

pub struct SoilProbe {
    channel: u32,
    total_reads: u32,
}

impl SoilProbe {
    pub fn new(channel: u32) -> Self {
        Self {
            channel,
            total_reads: 0,
        }
    }

    /// One raw reading in `0..=1023`.
    pub fn read(&mut self) -> Result<u16, SensorError> {
        self.total_reads = self.total_reads.saturating_add(1);
        self.read_adc()
    }

    pub fn total_reads(&self) -> u32 {
        self.total_reads
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        hw_init::adc1_read(self.channel).map(scale_12_to_10)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        let _ = self.channel;
        Ok(SIM_SOIL_RAW.load(Ordering::Relaxed).min(ADC_MAX))
    }
}
