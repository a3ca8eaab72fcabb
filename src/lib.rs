//! # rs-sysled
//!
//! A bridge between host CPU telemetry and an Arduino-driven LED display
//! connected over a serial link.
//!
//! ## Features
//!
//! - **Mode-exact wire encoding**: byte-for-byte payload slicing matching
//!   the deployed display firmware, including its irregular offsets
//! - **Two-thread design**: a background display driver streams telemetry
//!   while the foreground menu loop switches modes
//! - **Safe mode switching**: one mutex-guarded state cell, latest-write-
//!   wins, with the firmware's one-cycle send suppression on passive modes
//! - **Bounded serial reads**: a disconnected device logs a timeout
//!   instead of hanging the loop
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `modes` - Display modes and operator input parsing
//! - `frame` - The fixed 47-slot telemetry frame
//! - `encoder` - Mode to payload-slice tables (the wire protocol)
//! - `telemetry` - Telemetry text tokenizing
//! - `traits` - Seams for the telemetry source and the display link
//! - `hal` - Concrete implementations (file, serialport, mocks)
//! - `services` - Shared mode state, the driver loop, the operator loop
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use rs_sysled::hal::{MockLink, MockSource};
//! use rs_sysled::services::DisplayDriver;
//! use rs_sysled::{DriverConfig, Mode, ModeController};
//!
//! // Shared mode state between the operator and the driver.
//! let controller = Arc::new(ModeController::new(Mode::Usage));
//!
//! let mut driver = DisplayDriver::new(
//!     MockSource::new("cpu,23.5%,mem,61.2%"),
//!     MockLink::new(),
//!     Arc::clone(&controller),
//!     DriverConfig::default(),
//! );
//!
//! // One usage-mode cycle: header plus four sample blocks.
//! driver.run_cycle().unwrap();
//! assert_eq!(driver.link().written_lengths(), vec![8, 28, 28, 28, 28]);
//!
//! // The operator turns the display off; the driver drains on its next
//! // cycle.
//! controller.set_mode(Mode::Off);
//! ```

#![warn(missing_docs)]

/// Bridge configuration with builder-style setters.
pub mod config;
/// Mode to payload-slice mapping (the wire protocol).
pub mod encoder;
/// Error taxonomy.
pub mod error;
/// The fixed-size telemetry frame.
pub mod frame;
/// Concrete sources and links, plus mocks for testing.
pub mod hal;
/// Display modes and operator input parsing.
pub mod modes;
/// Shared mode state, the driver loop, and the operator loop.
pub mod services;
/// Telemetry text parsing.
pub mod telemetry;
/// Seam traits for the telemetry source and the display link.
pub mod traits;

// Re-exports for convenience
pub use config::{Config, DriverConfig, SerialConfig, TelemetryConfig};
pub use encoder::{plan, EncodingPlan, PayloadSlice, RESPONSE_MAX_BYTES};
pub use error::{Error, Result};
pub use frame::{TelemetryFrame, FRAME_BYTES, SENTINEL, SLOT_COUNT};
pub use modes::{Mode, OFF_DISPLAY_THRESHOLD};
pub use services::{
    run_operator_loop, CycleDirective, CycleStatus, DisplayDriver, DriverState, ModeController,
};
pub use traits::{DisplayLink, TelemetrySource};
