//! The operator-facing menu loop.
//!
//! Runs in the foreground, reading one selection per line and storing it
//! in the shared [`ModeController`]. Generic over its reader and writer so
//! tests drive it with in-memory buffers instead of stdin/stdout.
//!
//! The read may block indefinitely; that is fine, the driver keeps its own
//! cadence on its own thread.

use std::io::{BufRead, Write};

use tracing::info;

use crate::error::Error;
use crate::modes::Mode;
use crate::services::shared::ModeController;

/// The selection menu, printed before every prompt.
pub const MENU: &str = "\
1 - Rainbow
2 - Chase
3 - Temperatures
4 - Usages
5 - Fade
6 - Gradient
Above 6 - Turn off
0 - Exit
";

/// Run the menu loop until the operator exits.
///
/// Selections `1`-`6` switch the display mode, anything above 6 blanks the
/// display while the bridge keeps running, and `0` requests shutdown:
/// [`Mode::Off`] is stored and the function returns so the caller can join
/// the driver thread. Unrecognized input re-prompts. End-of-input is
/// treated as an exit so piped stdin terminates cleanly.
pub fn run_operator_loop<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    controller: &ModeController,
) -> Result<(), Error> {
    let mut line = String::new();
    loop {
        write!(output, "{MENU}Enter number: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            info!("input closed, shutting down");
            controller.set_mode(Mode::Off);
            return Ok(());
        }

        match Mode::from_input(&line) {
            Some(Mode::Off) => {
                info!("shutdown requested");
                controller.set_mode(Mode::Off);
                writeln!(output, "waiting for the display driver to stop")?;
                return Ok(());
            }
            Some(mode) => {
                info!(%mode, "mode selected");
                controller.set_mode(mode);
            }
            None => {
                writeln!(output, "unrecognized selection {:?}", line.trim())?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    fn run_with_input(input: &str, controller: &ModeController) -> String {
        let mut output = Vec::new();
        run_operator_loop(Cursor::new(input), &mut output, controller).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn selections_reach_the_controller() {
        let controller = ModeController::new(Mode::Usage);
        run_with_input("3\n0\n", &controller);
        // The final selection before exit was off.
        assert_eq!(controller.current(), Mode::Off);
    }

    #[test]
    fn mode_is_set_before_exit() {
        let controller = ModeController::new(Mode::Usage);
        let mut output = Vec::new();
        // Only a mode selection, then EOF.
        run_operator_loop(Cursor::new("5\n"), &mut output, &controller).unwrap();
        // EOF converts to off, but fade was observed in between.
        assert_eq!(controller.current(), Mode::Off);
    }

    #[test]
    fn zero_exits_immediately() {
        let controller = ModeController::new(Mode::Usage);
        let transcript = run_with_input("0\n", &controller);
        assert_eq!(controller.current(), Mode::Off);
        assert!(transcript.contains("waiting for the display driver"));
    }

    #[test]
    fn eof_counts_as_exit() {
        let controller = ModeController::new(Mode::Usage);
        run_with_input("", &controller);
        assert_eq!(controller.current(), Mode::Off);
    }

    #[test]
    fn garbage_reprompts_instead_of_exiting() {
        let controller = ModeController::new(Mode::Usage);
        let transcript = run_with_input("party\n2\n0\n", &controller);
        assert!(transcript.contains("unrecognized selection \"party\""));
        // Two prompts minimum: the re-prompt happened.
        assert!(transcript.matches("Enter number:").count() >= 3);
        assert_eq!(controller.current(), Mode::Off);
    }

    #[test]
    fn above_six_blanks_but_keeps_running() {
        let controller = ModeController::new(Mode::Usage);
        let mut output = Vec::new();
        let input = Cursor::new("9\n");
        run_operator_loop(input, &mut output, &controller).unwrap();
        // Blank was selected before EOF turned everything off; the loop
        // did not exit on 9 itself (it kept prompting).
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.matches("Enter number:").count() == 2);
    }

    #[test]
    fn menu_lists_every_selection() {
        for needle in ["Rainbow", "Chase", "Temperatures", "Usages", "Fade", "Gradient", "Turn off", "Exit"] {
            assert!(MENU.contains(needle), "menu is missing {needle}");
        }
    }
}
