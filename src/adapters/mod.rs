//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements     | Connects to                     |
//! |-------------|----------------|---------------------------------|
//! | `hardware`  | SensorPort     | `embedded-hal` inputs, ADC      |
//! |             | ActuatorPort   | `embedded-hal` outputs          |
//! | `log_sink`  | EventSink      | `log` facade                    |
//! | `uart`      | Transport      | ESP-IDF UART driver             |

pub mod hardware;
pub mod log_sink;
#[cfg(feature = "espidf")]
pub mod uart;
