//! Error types for the telemetry display bridge.
//!
//! The taxonomy mirrors how failures are handled at runtime:
//!
//! - [`Error::Config`] and [`Error::Open`] are fatal at startup.
//! - [`Error::Io`] is fatal wherever it occurs; a lost serial link or a
//!   missing telemetry file is an operator-correctable environment problem,
//!   not a transient fault worth retrying.
//! - [`Error::Timeout`] is recoverable: the driver logs it and moves on to
//!   the next cycle.
//! - [`Error::Parse`] never escapes the tokenizer; bad tokens are skipped.

use std::time::Duration;

/// Convenience result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while bridging telemetry to the display.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration (empty device path, zero baud rate, ...).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The serial device could not be opened.
    #[error("failed to open serial device {path}: {source}")]
    Open {
        /// The device path that was attempted.
        path: String,
        /// The underlying serial error.
        source: serialport::Error,
    },

    /// Read/write failure on the telemetry file or the serial link.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The device acknowledgement did not arrive within the read timeout.
    #[error("device response timed out after {0:?}")]
    Timeout(Duration),

    /// A telemetry token could not be parsed as a number.
    #[error("unparseable telemetry token {0:?}")]
    Parse(String),
}

impl Error {
    /// Whether this error is recoverable within the driver loop.
    ///
    /// Only acknowledgement timeouts qualify; everything else terminates
    /// the loop.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }
}
