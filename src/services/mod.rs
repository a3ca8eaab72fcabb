//! The two units of concurrency and the state they share.
//!
//! - [`shared`]: the [`ModeController`], the only shared-mutable state in
//!   the process, written by the operator loop and observed once per
//!   driver cycle.
//! - [`driver`]: the background [`DisplayDriver`] loop.
//! - [`operator`]: the foreground menu loop.
//!
//! Shutdown is cooperative: the operator stores [`Mode::Off`], the driver
//! observes it at the top of its next cycle and exits, and the binary
//! joins the driver thread. Worst-case shutdown latency is one cycle
//! interval plus payload delays.
//!
//! [`Mode::Off`]: crate::Mode::Off

pub mod driver;
pub mod operator;
pub mod shared;

pub use driver::{CycleStatus, DisplayDriver, DriverState};
pub use operator::{run_operator_loop, MENU};
pub use shared::{CycleDirective, ModeController};
