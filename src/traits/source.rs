//! Telemetry source abstraction.

use crate::error::Error;
use crate::frame::TelemetryFrame;

/// Supplies the current telemetry frame on demand.
///
/// Implementations re-read their backing source on every call; the driver
/// relies on each cycle seeing fresh data, and the per-cycle re-read is the
/// only "retry" the system performs.
///
/// # Implementation Notes
///
/// - Unreadable backing storage is an [`Error::Io`] and is fatal to the
///   driver; do not absorb it.
/// - Malformed *content* is not an error: skip bad tokens and return
///   whatever parsed (see [`fill_frame`](crate::telemetry::fill_frame)).
///
/// For testing without a telemetry file, use
/// [`MockSource`](crate::hal::MockSource).
pub trait TelemetrySource {
    /// Read and parse the latest telemetry into a fresh frame.
    ///
    /// The returned frame carries samples only; the caller stamps the mode
    /// tag before encoding.
    fn read_frame(&mut self) -> Result<TelemetryFrame, Error>;
}
