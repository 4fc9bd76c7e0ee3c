//! Irrigator Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single cooperative control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   SerialConsole   NvsRecordStore  Monotonic   │
//! │  (Sensor+Actuator) (Console)       (RecordStore)   Clock       │
//! │  LogEventSink                                                  │
//! │  (EventSink)                                                   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Controller (pure logic)                   │    │
//! │  │  Filter · FSM · Console commands · Cadences            │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, AnyInputPin, AnyOutputPin, PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{UartDriver, config::Config as UartConfig};
use esp_idf_hal::units::Hertz;
use log::info;

use irrigator::adapters::console::SerialConsole;
use irrigator::adapters::hardware::HardwareAdapter;
use irrigator::adapters::log_sink::LogEventSink;
use irrigator::adapters::nvs::NvsRecordStore;
use irrigator::adapters::time::MonotonicClock;
use irrigator::app::ports::Clock;
use irrigator::app::service::Controller;
use irrigator::config::SystemConfig;
use irrigator::drivers::hw_init;
use irrigator::drivers::pump::PumpRelay;
use irrigator::pins;
use irrigator::sensors::InterlockMonitor;
use irrigator::sensors::soil::SoilProbe;
use irrigator::storage::ThresholdStore;

/// Idle time between loop iterations; keeps the idle task fed.
const LOOP_DELAY_MS: u32 = 1;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Irrigator v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    let peripherals = Peripherals::take()?;

    // ── 2. Pump relay first, so it is off before anything else ─
    // SAFETY: the pin number comes from `pins` and is not claimed elsewhere.
    let relay_pin = PinDriver::output(unsafe { AnyOutputPin::new(pins::PUMP_RELAY_GPIO) })?;
    let relay = PumpRelay::new(relay_pin, config.relay_active_high)?;

    // ── 3. Sensors ────────────────────────────────────────────
    hw_init::init_peripherals()?;
    let soil = SoilProbe::new(pins::SOIL_ADC_CHANNEL);

    let interlock = if config.interlock_enabled {
        // SAFETY: as above.
        let mut pin = PinDriver::input(unsafe { AnyIOPin::new(pins::TANK_SWITCH_GPIO) })?;
        pin.set_pull(Pull::Up)?;
        InterlockMonitor::new(pin, config.interlock_high_means_water)
    } else {
        info!("Tank interlock disabled");
        InterlockMonitor::disabled()
    };

    let mut hw = HardwareAdapter::new(soil, relay, interlock);

    // ── 4. Operator console ───────────────────────────────────
    let uart = UartDriver::new(
        peripherals.uart1,
        // SAFETY: as above.
        unsafe { AnyOutputPin::new(pins::CONSOLE_TX_GPIO) },
        unsafe { AnyInputPin::new(pins::CONSOLE_RX_GPIO) },
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &UartConfig::new().baudrate(Hertz(pins::CONSOLE_BAUD)),
    )?;
    let mut console = SerialConsole::new(uart);

    // ── 5. Persistent thresholds ──────────────────────────────
    let mut store = ThresholdStore::new(NvsRecordStore::new()?);

    // ── 6. Controller ─────────────────────────────────────────
    let clock = MonotonicClock::new();
    let mut sink = LogEventSink::new();
    let mut controller = Controller::new(&config, clock.now_ms());
    controller.boot(&mut hw, &store, &mut console, &mut sink);

    info!("System ready. Entering control loop.");

    // ── 7. Control loop ───────────────────────────────────────
    loop {
        controller.poll(clock.now_ms(), &mut hw, &mut console, &mut store, &mut sink);
        FreeRtos::delay_ms(LOOP_DELAY_MS);
    }
}
