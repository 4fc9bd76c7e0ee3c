//! Sensor subsystem — soil probe, sample filter, and tank interlock.

pub mod filter;
pub mod soil;
pub mod water_level;

pub use filter::SampleFilter;
pub use water_level::InterlockMonitor;
