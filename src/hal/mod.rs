//! Concrete telemetry sources and display links.
//!
//! - [`FileTelemetry`]: re-reads the telemetry text file every cycle
//! - [`SerialChannel`]: serialport-backed link to the display device
//! - [`MockSource`], [`MockLink`]: test doubles with recording fields

mod mock;
mod serial;
mod sysfile;

pub use mock::{MockLink, MockResponse, MockSource};
pub use serial::SerialChannel;
pub use sysfile::FileTelemetry;
