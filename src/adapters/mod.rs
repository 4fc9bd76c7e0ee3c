//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements         | Connects to              |
//! |-------------|--------------------|--------------------------|
//! | `console`   | ConsolePort        | Operator UART            |
//! | `hardware`  | SensorPort         | ESP32 ADC, GPIO          |
//! |             | ActuatorPort       | Pump relay GPIO          |
//! | `log_sink`  | EventSink          | Serial log output        |
//! | `nvs`       | RecordStore        | NVS / in-memory image    |
//! | `time`      | Clock              | ESP32 system timer       |

pub mod console;
pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod time;
