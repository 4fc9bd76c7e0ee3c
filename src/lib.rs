//! Irrigator firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod console;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod scheduler;
pub mod storage;
pub mod telemetry;

// Hardware-facing modules; simulation backends are selected by cfg
// attributes inside.
pub mod adapters;
pub mod drivers;
pub mod sensors;
