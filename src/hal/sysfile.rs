//! File-backed telemetry source.

use std::fs;
use std::path::PathBuf;

use crate::error::Error;
use crate::frame::TelemetryFrame;
use crate::telemetry::fill_frame;
use crate::traits::TelemetrySource;

/// Reads the telemetry text file the sampling script keeps overwriting.
///
/// Every [`read_frame`](TelemetrySource::read_frame) call re-reads the whole
/// file; nothing is cached between cycles, so a stale or torn write by the
/// producer only affects one frame.
#[derive(Clone, Debug)]
pub struct FileTelemetry {
    path: PathBuf,
}

impl FileTelemetry {
    /// Create a source for the given telemetry file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TelemetrySource for FileTelemetry {
    fn read_frame(&mut self) -> Result<TelemetryFrame, Error> {
        let text = fs::read_to_string(&self.path)?;
        let mut frame = TelemetryFrame::new();
        fill_frame(&text, &mut frame);
        Ok(frame)
    }
}
