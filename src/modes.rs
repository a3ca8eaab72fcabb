//! Display mode definitions and operator input parsing.
//!
//! The display firmware distinguishes two kinds of modes:
//!
//! - **Data-driven** modes ([`Temperature`](Mode::Temperature),
//!   [`Usage`](Mode::Usage)) consume a fresh telemetry payload every cycle.
//! - **Passive** modes (rainbow, chase, fade, gradient, blank) run an
//!   animation on the device itself and only need to be told *once* that the
//!   mode changed.
//!
//! [`Mode::Off`] is host-side only: it never reaches the wire and instead
//! tells the display driver to shut down.
//!
//! # Example
//!
//! ```rust
//! use rs_sysled::Mode;
//!
//! assert_eq!(Mode::from_input("3"), Some(Mode::Temperature));
//! assert_eq!(Mode::from_input("9"), Some(Mode::Blank(9)));
//! assert_eq!(Mode::from_input("party"), None);
//! assert_eq!(Mode::Usage.tag(), 4.0);
//! ```

/// Numeric mode tags at or above this value tell the device to blank the
/// display while the host keeps running.
pub const OFF_DISPLAY_THRESHOLD: u32 = 7;

/// Display rendering mode.
///
/// The numeric tag of each mode is embedded in-band in the telemetry frame
/// (slot 1) so the device can interpret the payload that follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// Shut the driver down. Never transmitted.
    Off,
    /// Rainbow animation (device-side).
    Rainbow,
    /// Chase animation (device-side).
    Chase,
    /// Render CPU temperatures from the telemetry payload.
    Temperature,
    /// Render CPU utilization from the telemetry payload.
    Usage,
    /// Fade animation (device-side).
    Fade,
    /// Gradient animation (device-side).
    Gradient,
    /// Blank the display but keep the bridge running.
    ///
    /// Carries the raw operator selection (anything above 6) so the device
    /// sees exactly the number that was typed.
    Blank(u8),
}

impl Mode {
    /// The in-band numeric tag transmitted in frame slot 1.
    pub fn tag(&self) -> f32 {
        match self {
            Mode::Off => 0.0,
            Mode::Rainbow => 1.0,
            Mode::Chase => 2.0,
            Mode::Temperature => 3.0,
            Mode::Usage => 4.0,
            Mode::Fade => 5.0,
            Mode::Gradient => 6.0,
            Mode::Blank(n) => f32::from(*n),
        }
    }

    /// Parse a mode from one line of operator input.
    ///
    /// Accepts a single non-negative integer token: `0` exits, `1`-`6`
    /// select a mode, anything above 6 blanks the display. Input is
    /// trimmed first. Returns `None` for anything that does not parse,
    /// so the menu loop can re-prompt instead of acting on garbage.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_sysled::Mode;
    ///
    /// assert_eq!(Mode::from_input("0"), Some(Mode::Off));
    /// assert_eq!(Mode::from_input("1"), Some(Mode::Rainbow));
    /// assert_eq!(Mode::from_input(" 4 "), Some(Mode::Usage));
    /// assert_eq!(Mode::from_input("42"), Some(Mode::Blank(42)));
    /// assert_eq!(Mode::from_input(""), None);
    /// assert_eq!(Mode::from_input("-1"), None);
    /// ```
    pub fn from_input(s: &str) -> Option<Self> {
        let n: u32 = s.trim().parse().ok()?;
        Some(match n {
            0 => Mode::Off,
            1 => Mode::Rainbow,
            2 => Mode::Chase,
            3 => Mode::Temperature,
            4 => Mode::Usage,
            5 => Mode::Fade,
            6 => Mode::Gradient,
            // Everything at or above OFF_DISPLAY_THRESHOLD blanks the
            // display; tags saturate at 255.
            _ => Mode::Blank(n.min(u32::from(u8::MAX)) as u8),
        })
    }

    /// Returns the mode as a lowercase string for menus and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Off => "off",
            Mode::Rainbow => "rainbow",
            Mode::Chase => "chase",
            Mode::Temperature => "temperature",
            Mode::Usage => "usage",
            Mode::Fade => "fade",
            Mode::Gradient => "gradient",
            Mode::Blank(_) => "blank",
        }
    }

    /// Whether this mode consumes a fresh telemetry payload every cycle.
    pub fn is_data_driven(&self) -> bool {
        matches!(self, Mode::Temperature | Mode::Usage)
    }

    /// Whether this mode runs device-side and only needs a one-shot
    /// notification after a switch.
    pub fn is_passive(&self) -> bool {
        !self.is_data_driven() && !self.is_off()
    }

    /// Whether this mode terminates the display driver.
    pub fn is_off(&self) -> bool {
        matches!(self, Mode::Off)
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
