//! Mode-dependent wire encoding.
//!
//! [`plan`] maps a [`Mode`] to the exact sequence of byte payloads the
//! device expects, each with an optional pause before the next write. It is
//! a pure function: no I/O, no state.
//!
//! # Slice tables
//!
//! The slice tables below are byte-for-byte what the deployed display
//! firmware reads. A slice start is a *slot index* into the frame's float
//! storage; its length is a *raw byte count*, and several ranges end
//! mid-slot on purpose. Do not regularize the numbers without re-flashing
//! the firmware.
//!
//! # Example
//!
//! ```rust
//! use rs_sysled::{plan, EncodingPlan, Mode};
//!
//! match plan(Mode::Usage) {
//!     EncodingPlan::Stream(slices) => assert_eq!(slices.len(), 5),
//!     _ => unreachable!("usage is a streaming mode"),
//! }
//! assert!(matches!(plan(Mode::Off), EncodingPlan::Shutdown));
//! ```

use core::ops::Range;
use core::time::Duration;

use crate::frame::SLOT_BYTES;
use crate::modes::Mode;

/// Maximum length of the device acknowledgement in bytes.
///
/// The device replies with a short line; its length is not negotiated,
/// just capped.
pub const RESPONSE_MAX_BYTES: usize = 5;

/// One contiguous byte range of a frame, transmitted as a single write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayloadSlice {
    /// Slot index where the payload starts.
    pub start_slot: usize,
    /// Payload length in raw bytes (may end mid-slot).
    pub len_bytes: usize,
    /// Pause after this write, before the next one.
    pub post_delay: Duration,
}

impl PayloadSlice {
    /// Define a slice; the delay is given in microseconds.
    pub const fn new(start_slot: usize, len_bytes: usize, post_delay_us: u64) -> Self {
        Self {
            start_slot,
            len_bytes,
            post_delay: Duration::from_micros(post_delay_us),
        }
    }

    /// The byte range this slice covers within a frame's wire image.
    pub fn byte_range(&self) -> Range<usize> {
        let start = self.start_slot * SLOT_BYTES;
        start..start + self.len_bytes
    }
}

/// Temperature mode: five back-to-back payloads, no pauses.
const TEMPERATURE_SLICES: [PayloadSlice; 5] = [
    PayloadSlice::new(0, 16, 0),
    PayloadSlice::new(11, 8, 0),
    PayloadSlice::new(20, 8, 0),
    PayloadSlice::new(29, 8, 0),
    PayloadSlice::new(38, 8, 0),
];

/// Usage mode: header, then four sample blocks; the device needs a short
/// breather after the second write to drain its line buffer.
const USAGE_SLICES: [PayloadSlice; 5] = [
    PayloadSlice::new(0, 8, 0),
    PayloadSlice::new(13, 28, 1_000),
    PayloadSlice::new(22, 28, 0),
    PayloadSlice::new(31, 28, 0),
    PayloadSlice::new(40, 28, 0),
];

/// Minimal payload for passive modes: sentinel plus mode tag.
const MINIMAL_SLICE: PayloadSlice = PayloadSlice::new(0, 8, 0);

/// The mode-specific sequence of payloads for one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingPlan {
    /// Full multi-slice payload, transmitted every cycle.
    Stream(&'static [PayloadSlice]),
    /// Minimal payload, transmitted once per mode transition.
    ///
    /// The driver gates this behind the one-shot suppression flag; on every
    /// other cycle nothing is written.
    Minimal(PayloadSlice),
    /// Nothing to send; the driver should drain and stop.
    Shutdown,
}

/// Derive the encoding plan for a mode.
pub fn plan(mode: Mode) -> EncodingPlan {
    match mode {
        Mode::Temperature => EncodingPlan::Stream(&TEMPERATURE_SLICES),
        Mode::Usage => EncodingPlan::Stream(&USAGE_SLICES),
        Mode::Off => EncodingPlan::Shutdown,
        _ => EncodingPlan::Minimal(MINIMAL_SLICE),
    }
}
