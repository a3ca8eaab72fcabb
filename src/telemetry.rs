//! Telemetry text parsing.
//!
//! The sampling script emits interleaved labels and numeric samples,
//! delimited by commas and percent signs:
//!
//! ```text
//! cpu,23.5%,mem,61.2%
//! ```
//!
//! Only tokens that *begin with an ASCII digit* are treated as samples;
//! everything else (labels, empty tokens from adjacent delimiters) is
//! dropped. Partial telemetry beats no telemetry, so a token that looks
//! numeric but fails to parse is skipped too, never fatal.

use tracing::debug;

use crate::error::Error;
use crate::frame::TelemetryFrame;

/// Tokenize telemetry text and append the numeric samples to `frame`.
///
/// Returns the number of samples appended. Samples beyond the frame's
/// capacity are dropped.
///
/// # Example
///
/// ```rust
/// use rs_sysled::{telemetry::fill_frame, TelemetryFrame};
///
/// let mut frame = TelemetryFrame::new();
/// fill_frame("cpu,23.5%,mem,61.2%", &mut frame);
/// assert_eq!(frame.samples(), &[23.5, 61.2]);
/// ```
pub fn fill_frame(text: &str, frame: &mut TelemetryFrame) -> usize {
    let mut appended = 0;
    let mut dropped = 0;
    for token in text.split([',', '%']) {
        match parse_token(token) {
            Ok(Some(value)) => {
                if frame.push_sample(value) {
                    appended += 1;
                } else {
                    dropped += 1;
                }
            }
            Ok(None) => {} // label or empty token
            Err(err) => debug!(%err, "skipping telemetry token"),
        }
    }
    if dropped > 0 {
        debug!(dropped, "telemetry frame full, excess samples dropped");
    }
    appended
}

/// Parse one token: `Ok(None)` for labels, `Ok(Some(_))` for samples,
/// `Err` for digit-leading tokens that still fail to parse.
fn parse_token(token: &str) -> Result<Option<f32>, Error> {
    let token = token.trim();
    if !token.starts_with(|c: char| c.is_ascii_digit()) {
        return Ok(None);
    }
    token
        .parse::<f32>()
        .map(Some)
        .map_err(|_| Error::Parse(token.to_owned()))
}
