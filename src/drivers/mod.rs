//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod hw_init;
pub mod pump;
pub mod sim_pin;
