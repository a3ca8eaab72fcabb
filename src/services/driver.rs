//! The display driver loop.
//!
//! [`DisplayDriver`] owns the telemetry source and the display link and
//! runs the send cycle as the background unit of concurrency:
//!
//! ```text
//! read frame -> observe mode -> stamp tag -> encode -> write payloads
//!     -> read ack -> sleep -> repeat
//! ```
//!
//! [`run_cycle`](DisplayDriver::run_cycle) is the single-step unit; tests
//! call it directly with mocks and never need threads or real sleeps.
//! [`run`](DisplayDriver::run) wraps it with the boot pause and the
//! inter-cycle pacing and is what the binary spawns on a thread.
//!
//! # Failure semantics
//!
//! An I/O failure on the telemetry source or the link ends `run` with an
//! error; there is no retry, a lost link or missing telemetry file needs
//! operator attention. An acknowledgement timeout is logged and the loop
//! keeps cycling.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use rs_sysled::hal::{MockLink, MockSource};
//! use rs_sysled::services::{CycleStatus, DisplayDriver};
//! use rs_sysled::{DriverConfig, Mode, ModeController};
//!
//! let controller = Arc::new(ModeController::new(Mode::Temperature));
//! let mut driver = DisplayDriver::new(
//!     MockSource::new("cpu,42.0%,"),
//!     MockLink::new(),
//!     Arc::clone(&controller),
//!     DriverConfig::default(),
//! );
//!
//! assert_eq!(driver.run_cycle().unwrap(), CycleStatus::Continue);
//! assert_eq!(driver.link().write_count(), 5); // temperature streams 5 slices
//! ```

use std::sync::Arc;
use std::thread;

use tracing::{debug, info, trace, warn};

use crate::config::DriverConfig;
use crate::encoder::{plan, EncodingPlan, RESPONSE_MAX_BYTES};
use crate::error::Error;
use crate::modes::Mode;
use crate::services::shared::ModeController;
use crate::traits::{DisplayLink, TelemetrySource};

/// Lifecycle of the driver loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DriverState {
    /// Waiting out the device boot delay; nothing written yet.
    Starting,
    /// Cycling normally.
    Cycling,
    /// Off observed; the loop is exiting without a final payload.
    Draining,
    /// The loop has terminated.
    Stopped,
}

/// Outcome of one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleStatus {
    /// Sleep the cycle interval, then cycle again.
    Continue,
    /// Off was observed; stop the loop.
    Stop,
}

/// The orchestration loop: pulls frames, encodes, transmits, paces itself.
///
/// Generic over its two seams so the whole loop runs against mocks; see
/// the module docs for an example.
pub struct DisplayDriver<S: TelemetrySource, L: DisplayLink> {
    source: S,
    link: L,
    controller: Arc<ModeController>,
    config: DriverConfig,
    state: DriverState,
    cycles: u64,
}

impl<S: TelemetrySource, L: DisplayLink> DisplayDriver<S, L> {
    /// Create a driver; nothing is transmitted until [`run`](Self::run)
    /// or [`run_cycle`](Self::run_cycle).
    pub fn new(source: S, link: L, controller: Arc<ModeController>, config: DriverConfig) -> Self {
        Self {
            source,
            link,
            controller,
            config,
            state: DriverState::Starting,
            cycles: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Number of completed cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// The display link (for inspection in tests).
    pub fn link(&self) -> &L {
        &self.link
    }

    /// The telemetry source (for inspection in tests).
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run the loop to completion.
    ///
    /// Blocks through the boot delay, then cycles until the operator
    /// selects off or an unrecoverable error occurs.
    pub fn run(&mut self) -> Result<(), Error> {
        // The open reset the device via DTR; give it time to boot before
        // the first write.
        debug!(delay_ms = self.config.boot_delay_ms, "waiting for device boot");
        thread::sleep(self.config.boot_delay());
        self.state = DriverState::Cycling;
        info!(mode = %self.controller.current(), "display driver cycling");

        loop {
            match self.run_cycle() {
                Ok(CycleStatus::Continue) => thread::sleep(self.config.cycle_interval()),
                Ok(CycleStatus::Stop) => break,
                Err(err) => {
                    self.state = DriverState::Stopped;
                    return Err(err);
                }
            }
        }

        self.state = DriverState::Stopped;
        info!(cycles = self.cycles, "display driver stopped");
        Ok(())
    }

    /// Execute exactly one cycle: read, observe, encode, transmit, ack.
    ///
    /// Does not sleep the cycle interval; [`run`](Self::run) owns pacing.
    /// Payload post-delays are honored here since they are part of the
    /// wire protocol, not the pacing.
    pub fn run_cycle(&mut self) -> Result<CycleStatus, Error> {
        let mut frame = self.source.read_frame()?;
        let directive = self.controller.observe_cycle();
        // Slot 1 must carry the tag of the mode this frame is encoded
        // with, or the device misreads the payload boundaries.
        frame.set_mode(directive.mode);

        let wrote = match plan(directive.mode) {
            EncodingPlan::Shutdown => {
                self.state = DriverState::Draining;
                debug!("off observed, draining");
                return Ok(CycleStatus::Stop);
            }
            EncodingPlan::Stream(slices) => {
                let bytes = frame.to_bytes();
                for slice in slices {
                    self.link.write_payload(&bytes[slice.byte_range()])?;
                    if !slice.post_delay.is_zero() {
                        thread::sleep(slice.post_delay);
                    }
                }
                if directive.mode == Mode::Usage {
                    let tail = &frame.slots()[40..44];
                    debug!(?tail, "usage diagnostic samples");
                }
                true
            }
            EncodingPlan::Minimal(slice) => {
                if directive.send_minimal {
                    debug!(mode = %directive.mode, "one-shot mode notification");
                    let bytes = frame.to_bytes();
                    self.link.write_payload(&bytes[slice.byte_range()])?;
                    true
                } else {
                    false
                }
            }
        };

        // Request/response: no request this cycle means no reply to wait
        // for.
        if wrote {
            match self.link.read_response(RESPONSE_MAX_BYTES) {
                Ok(ack) => trace!(len = ack.len(), "device ack"),
                Err(err) if err.is_timeout() => {
                    warn!(%err, "no acknowledgement from device, continuing");
                }
                Err(err) => return Err(err),
            }
        }

        self.cycles += 1;
        Ok(CycleStatus::Continue)
    }
}
