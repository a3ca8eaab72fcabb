//! The fixed-size telemetry frame transmitted to the display.
//!
//! A frame is 47 `f32` slots with a rigid layout the device firmware
//! depends on:
//!
//! | Slot | Contents |
//! |------|----------|
//! | 0    | Sentinel guard value (`-1000.0`), never meaningful on the wire |
//! | 1    | Numeric mode tag (see [`Mode::tag`]) |
//! | 2..  | Parsed telemetry samples, in file order |
//!
//! The wire representation is the frame's raw float storage in native
//! endianness; the firmware reads the host's in-memory layout, so
//! [`TelemetryFrame::to_bytes`] must not normalize byte order.
//!
//! [`Mode::tag`]: crate::Mode::tag

use crate::modes::Mode;

/// Number of `f32` slots in a frame.
pub const SLOT_COUNT: usize = 47;

/// Size of one slot on the wire.
pub const SLOT_BYTES: usize = core::mem::size_of::<f32>();

/// Total wire size of a frame in bytes.
pub const FRAME_BYTES: usize = SLOT_COUNT * SLOT_BYTES;

/// Guard value stored in slot 0.
pub const SENTINEL: f32 = -1000.0;

/// Index of the in-band mode tag.
const MODE_SLOT: usize = 1;

/// First slot that holds a telemetry sample.
const FIRST_SAMPLE_SLOT: usize = 2;

/// One complete numeric snapshot of telemetry plus the mode tag, ready for
/// encoding.
///
/// # Example
///
/// ```rust
/// use rs_sysled::{Mode, TelemetryFrame};
///
/// let mut frame = TelemetryFrame::new();
/// frame.set_mode(Mode::Temperature);
/// frame.push_sample(42.5);
///
/// assert_eq!(frame.mode_tag(), 3.0);
/// assert_eq!(frame.samples(), &[42.5]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TelemetryFrame {
    slots: [f32; SLOT_COUNT],
    /// One past the last occupied slot.
    len: usize,
}

impl TelemetryFrame {
    /// Create an empty frame: sentinel in slot 0, zeroed everywhere else.
    pub fn new() -> Self {
        let mut slots = [0.0; SLOT_COUNT];
        slots[0] = SENTINEL;
        Self {
            slots,
            len: FIRST_SAMPLE_SLOT,
        }
    }

    /// Stamp the in-band mode tag (slot 1).
    ///
    /// The driver calls this with the mode it is about to encode with, so
    /// the tag and the payload layout always agree.
    pub fn set_mode(&mut self, mode: Mode) {
        self.slots[MODE_SLOT] = mode.tag();
    }

    /// The current in-band mode tag.
    pub fn mode_tag(&self) -> f32 {
        self.slots[MODE_SLOT]
    }

    /// Append one sample after the last occupied slot.
    ///
    /// Returns `false` once all 47 slots are full; the sample is dropped.
    pub fn push_sample(&mut self, value: f32) -> bool {
        if self.len >= SLOT_COUNT {
            return false;
        }
        self.slots[self.len] = value;
        self.len += 1;
        true
    }

    /// Number of samples held (excludes the sentinel and the mode tag).
    pub fn sample_count(&self) -> usize {
        self.len - FIRST_SAMPLE_SLOT
    }

    /// The samples in insertion order.
    pub fn samples(&self) -> &[f32] {
        &self.slots[FIRST_SAMPLE_SLOT..self.len]
    }

    /// All 47 slots, including untouched trailing zeros.
    ///
    /// Payload slices may extend past the last parsed sample; those slots
    /// transmit as zeros.
    pub fn slots(&self) -> &[f32; SLOT_COUNT] {
        &self.slots
    }

    /// Render the frame's raw float storage for the wire.
    ///
    /// Native-endian on purpose: the firmware expects the host's in-memory
    /// float layout.
    pub fn to_bytes(&self) -> [u8; FRAME_BYTES] {
        let mut bytes = [0u8; FRAME_BYTES];
        for (slot, chunk) in self.slots.iter().zip(bytes.chunks_exact_mut(SLOT_BYTES)) {
            chunk.copy_from_slice(&slot.to_ne_bytes());
        }
        bytes
    }
}

impl Default for TelemetryFrame {
    fn default() -> Self {
        Self::new()
    }
}
