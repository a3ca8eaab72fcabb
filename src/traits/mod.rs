//! Seam traits between the driver loop and its collaborators.
//!
//! The driver is written against these traits so every scenario, including
//! serial timeouts and torn-down devices, can be exercised on a desktop
//! with the mocks in [`crate::hal`]:
//!
//! | Trait | Purpose | Production impl | Mock |
//! |-------|---------|-----------------|------|
//! | [`TelemetrySource`] | fresh frame per cycle | [`FileTelemetry`] | [`MockSource`] |
//! | [`DisplayLink`] | payload writes + ack reads | [`SerialChannel`] | [`MockLink`] |
//!
//! [`FileTelemetry`]: crate::hal::FileTelemetry
//! [`SerialChannel`]: crate::hal::SerialChannel
//! [`MockSource`]: crate::hal::MockSource
//! [`MockLink`]: crate::hal::MockLink

mod link;
mod source;

pub use link::DisplayLink;
pub use source::TelemetrySource;
