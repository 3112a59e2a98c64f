//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter    | Implements             | Connects to                 |
//! |------------|------------------------|-----------------------------|
//! | `log_sink` | EventSink              | `log` facade                |
//! |            | FrameSink, TriggerSink | `log` facade (headless)     |
//! | `replay`   | Transport              | In-memory byte buffer       |
//! | `serial`   | Transport              | USB-UART via `serialport`   |

pub mod log_sink;
pub mod replay;
#[cfg(feature = "serial")]
pub mod serial;
