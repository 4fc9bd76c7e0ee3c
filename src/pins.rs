//! GPIO / peripheral pin assignments for the controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Soil moisture probe (capacitive, analog out)
// ---------------------------------------------------------------------------

/// Analog output of the soil probe on ADC1 channel 3 (GPIO 4 on ESP32-S3).
pub const SOIL_ADC_CHANNEL: u32 = 3;

// ---------------------------------------------------------------------------
// Pump relay
// ---------------------------------------------------------------------------

/// Digital output driving the pump relay coil.  Polarity is set by
/// `SystemConfig::relay_active_high`.
pub const PUMP_RELAY_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Tank float switch (interlock)
// ---------------------------------------------------------------------------

/// Digital input with internal pull-up.  Which level means "water present"
/// is set by `SystemConfig::interlock_high_means_water`.
pub const TANK_SWITCH_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Operator console (UART1; UART0 carries the log)
// ---------------------------------------------------------------------------

pub const CONSOLE_TX_GPIO: i32 = 17;
pub const CONSOLE_RX_GPIO: i32 = 18;
pub const CONSOLE_BAUD: u32 = 9_600;
