//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements  | Connects to                  |
//! |------------|-------------|------------------------------|
//! | `hardware` | Actuator    | LEDC PWM, GPIO, console UART |
//! | `log_sink` | EventSink   | Serial log output            |
//! | `nvs`      | ConfigPort  | NVS / in-memory store        |
//! | `watchdog` | —           | ESP-IDF task watchdog        |

#[cfg(target_os = "espidf")]
pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod watchdog;
