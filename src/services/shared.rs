//! Shared mode state between the operator loop and the display driver.
//!
//! [`ModeController`] is the only shared-mutable resource in the process.
//! The operator loop writes the requested mode; the driver observes it once
//! per cycle. All three fields (`current`, `previous`, `send_pending`) live
//! behind a single mutex so a cycle never sees a torn update.
//!
//! # Mode change protocol
//!
//! Mode changes are latest-write-wins: the operator may change the mode any
//! number of times between driver cycles and only the most recent value is
//! acted on. When the driver observes a change *into a passive mode*, the
//! change cycle itself stays silent and the one-shot minimal payload goes
//! out on the following cycle (the device handshake needs the switch to
//! settle before it accepts the new tag).
//!
//! # Example
//!
//! ```rust
//! use rs_sysled::{Mode, ModeController};
//!
//! let controller = ModeController::new(Mode::Usage);
//!
//! controller.set_mode(Mode::Rainbow);
//! let change = controller.observe_cycle();
//! assert_eq!(change.mode, Mode::Rainbow);
//! assert!(!change.send_minimal); // change cycle is suppressed
//!
//! let next = controller.observe_cycle();
//! assert!(next.send_minimal); // one-shot fires exactly once
//! assert!(!controller.observe_cycle().send_minimal);
//! ```

use std::sync::Mutex;

use crate::modes::Mode;

/// What the driver should do with the current cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleDirective {
    /// The mode to encode this cycle with.
    pub mode: Mode,
    /// Whether a passive mode's one-shot minimal payload is due this cycle.
    pub send_minimal: bool,
}

/// Inner state; all fields move together under one lock.
#[derive(Debug)]
struct ModeCell {
    /// Most recent operator selection.
    current: Mode,
    /// Last mode the driver actually observed.
    previous: Mode,
    /// Armed when a switch into a passive mode awaits its one-shot send.
    send_pending: bool,
}

/// Thread-safe mode state shared between the operator loop and the driver.
pub struct ModeController {
    cell: Mutex<ModeCell>,
}

impl ModeController {
    /// Create a controller starting in `initial` mode.
    ///
    /// The initial mode counts as already observed: the driver's first
    /// cycle streams it without a transition.
    pub fn new(initial: Mode) -> Self {
        Self {
            cell: Mutex::new(ModeCell {
                current: initial,
                previous: initial,
                send_pending: false,
            }),
        }
    }

    /// Store a new mode selection (operator side).
    ///
    /// Latest-write-wins; intermediate values set between driver cycles are
    /// never observed. Selecting [`Mode::Off`] is the cancellation path:
    /// the driver exits at the top of its next cycle and the caller should
    /// then join its thread.
    pub fn set_mode(&self, mode: Mode) {
        let mut cell = self.cell.lock().unwrap();
        cell.current = mode;
    }

    /// Snapshot of the most recent selection.
    pub fn current(&self) -> Mode {
        self.cell.lock().unwrap().current
    }

    /// Observe the mode for one driver cycle.
    ///
    /// Called exactly once per cycle. On a change the previous mode is
    /// updated and, for passive targets, the one-shot flag is armed; the
    /// flag fires on the *next* observation and then clears.
    pub fn observe_cycle(&self) -> CycleDirective {
        let mut cell = self.cell.lock().unwrap();
        let mode = cell.current;
        if mode != cell.previous {
            cell.previous = mode;
            cell.send_pending = mode.is_passive();
            CycleDirective {
                mode,
                send_minimal: false,
            }
        } else if cell.send_pending {
            cell.send_pending = false;
            CycleDirective {
                mode,
                send_minimal: true,
            }
        } else {
            CycleDirective {
                mode,
                send_minimal: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_mode_streams_without_transition() {
        let controller = ModeController::new(Mode::Usage);
        let directive = controller.observe_cycle();
        assert_eq!(directive.mode, Mode::Usage);
        assert!(!directive.send_minimal);
    }

    #[test]
    fn passive_switch_fires_one_shot_on_second_cycle() {
        let controller = ModeController::new(Mode::Usage);
        controller.set_mode(Mode::Fade);

        let change = controller.observe_cycle();
        assert_eq!(change.mode, Mode::Fade);
        assert!(!change.send_minimal);

        let one_shot = controller.observe_cycle();
        assert!(one_shot.send_minimal);

        let steady = controller.observe_cycle();
        assert!(!steady.send_minimal);
    }

    #[test]
    fn repeated_set_mode_is_idempotent() {
        let controller = ModeController::new(Mode::Usage);
        controller.set_mode(Mode::Rainbow);
        controller.set_mode(Mode::Rainbow);

        assert!(!controller.observe_cycle().send_minimal);
        assert!(controller.observe_cycle().send_minimal);
        // Setting the same mode again must not re-arm the one-shot.
        controller.set_mode(Mode::Rainbow);
        assert!(!controller.observe_cycle().send_minimal);
        assert!(!controller.observe_cycle().send_minimal);
    }

    #[test]
    fn data_driven_switch_never_arms_one_shot() {
        let controller = ModeController::new(Mode::Rainbow);
        controller.set_mode(Mode::Temperature);

        assert!(!controller.observe_cycle().send_minimal);
        assert!(!controller.observe_cycle().send_minimal);
    }

    #[test]
    fn latest_write_wins_between_cycles() {
        let controller = ModeController::new(Mode::Usage);
        controller.set_mode(Mode::Rainbow);
        controller.set_mode(Mode::Chase);
        controller.set_mode(Mode::Gradient);

        let directive = controller.observe_cycle();
        assert_eq!(directive.mode, Mode::Gradient);
        // One one-shot for the final value, not three.
        assert!(controller.observe_cycle().send_minimal);
        assert!(!controller.observe_cycle().send_minimal);
    }

    #[test]
    fn off_does_not_arm_one_shot() {
        let controller = ModeController::new(Mode::Usage);
        controller.set_mode(Mode::Off);

        let directive = controller.observe_cycle();
        assert_eq!(directive.mode, Mode::Off);
        assert!(!directive.send_minimal);
        assert!(!controller.observe_cycle().send_minimal);
    }

    #[test]
    fn current_reflects_latest_set() {
        let controller = ModeController::new(Mode::Usage);
        assert_eq!(controller.current(), Mode::Usage);
        controller.set_mode(Mode::Blank(42));
        assert_eq!(controller.current(), Mode::Blank(42));
    }

    #[test]
    fn concurrent_set_and_observe() {
        use std::sync::Arc;
        use std::thread;

        let controller = Arc::new(ModeController::new(Mode::Usage));

        let setter = {
            let controller = Arc::clone(&controller);
            thread::spawn(move || {
                for i in 0..100u8 {
                    controller.set_mode(if i % 2 == 0 {
                        Mode::Temperature
                    } else {
                        Mode::Fade
                    });
                }
            })
        };
        let observer = {
            let controller = Arc::clone(&controller);
            thread::spawn(move || {
                for _ in 0..100 {
                    let _ = controller.observe_cycle();
                }
            })
        };

        setter.join().unwrap();
        observer.join().unwrap();

        // Whatever interleaving happened, the state is coherent.
        let mode = controller.current();
        assert!(mode == Mode::Temperature || mode == Mode::Fade);
    }
}
