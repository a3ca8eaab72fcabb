//! Mock implementations for testing without hardware.
//!
//! Test doubles for both seam traits, enabling every driver scenario to
//! run on a desktop with no telemetry file and no serial device:
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockSource`] | [`TelemetrySource`] | Canned telemetry text, optional failure injection |
//! | [`MockLink`] | [`DisplayLink`] | Records written payloads, queued responses |
//!
//! # Example
//!
//! ```rust
//! use rs_sysled::hal::{MockLink, MockResponse, MockSource};
//! use rs_sysled::traits::{DisplayLink, TelemetrySource};
//!
//! let mut source = MockSource::new("cpu,50.0%,");
//! let frame = source.read_frame().unwrap();
//! assert_eq!(frame.samples(), &[50.0]);
//!
//! let mut link = MockLink::new();
//! link.queue_response(MockResponse::Timeout);
//! link.write_payload(&[1, 2, 3]).unwrap();
//! assert_eq!(link.written.len(), 1);
//! assert!(link.read_response(5).is_err());
//! ```

use std::io;
use std::time::Duration;

use crate::error::Error;
use crate::frame::TelemetryFrame;
use crate::telemetry::fill_frame;
use crate::traits::{DisplayLink, TelemetrySource};

// ============================================================================
// Telemetry Source Mock
// ============================================================================

/// Mock telemetry source fed from a canned text snippet.
///
/// The text runs through the real tokenizer, so tests exercise the same
/// parsing path as production. Set [`fail_next`](Self::fail_next) to make
/// the following read fail with an I/O error (a vanished telemetry file).
#[derive(Debug, Default)]
pub struct MockSource {
    /// Telemetry text returned on each read.
    pub text: String,
    /// Number of times `read_frame` was called.
    pub reads: usize,
    /// When set, the next read fails with an I/O error and clears the flag.
    pub fail_next: bool,
}

impl MockSource {
    /// Create a source with the given telemetry text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Replace the telemetry text for subsequent reads.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl TelemetrySource for MockSource {
    fn read_frame(&mut self) -> Result<TelemetryFrame, Error> {
        self.reads += 1;
        if self.fail_next {
            self.fail_next = false;
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "telemetry file vanished",
            )));
        }
        let mut frame = TelemetryFrame::new();
        fill_frame(&self.text, &mut frame);
        Ok(frame)
    }
}

// ============================================================================
// Display Link Mock
// ============================================================================

/// One scripted reaction to a `read_response` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockResponse {
    /// The device replies with these bytes.
    Ack(Vec<u8>),
    /// Nothing arrives within the timeout.
    Timeout,
    /// The link is gone (fatal I/O error).
    Disconnect,
}

/// Mock display link recording every payload written.
///
/// Responses are scripted FIFO via [`queue_response`](Self::queue_response);
/// with an empty queue every read returns a short `ok\n` acknowledgement.
#[derive(Debug, Default)]
pub struct MockLink {
    /// Every payload passed to `write_payload`, in order.
    pub written: Vec<Vec<u8>>,
    /// Number of times `read_response` was called.
    pub reads: usize,
    /// When set, writes fail with a broken-pipe I/O error.
    pub fail_writes: bool,
    responses: Vec<MockResponse>,
}

impl MockLink {
    /// Create a link with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response to be consumed by the next unanswered read.
    pub fn queue_response(&mut self, response: MockResponse) {
        self.responses.push(response);
    }

    /// The byte lengths of all written payloads, in write order.
    pub fn written_lengths(&self) -> Vec<usize> {
        self.written.iter().map(Vec::len).collect()
    }

    /// Total number of writes.
    pub fn write_count(&self) -> usize {
        self.written.len()
    }
}

impl DisplayLink for MockLink {
    fn write_payload(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if self.fail_writes {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "serial link lost",
            )));
        }
        self.written.push(bytes.to_vec());
        Ok(())
    }

    fn read_response(&mut self, max_bytes: usize) -> Result<Vec<u8>, Error> {
        self.reads += 1;
        let response = if self.responses.is_empty() {
            MockResponse::Ack(b"ok\n".to_vec())
        } else {
            self.responses.remove(0)
        };
        match response {
            MockResponse::Ack(mut bytes) => {
                bytes.truncate(max_bytes);
                Ok(bytes)
            }
            MockResponse::Timeout => Err(Error::Timeout(Duration::from_millis(500))),
            MockResponse::Disconnect => Err(Error::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "serial link lost",
            ))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
