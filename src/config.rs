//! Configuration for the telemetry bridge.
//!
//! Plain builder-style configuration with sensible defaults for the
//! deployed hardware. Durations are stored as millisecond fields and
//! exposed as [`Duration`] accessors.
//!
//! # Example
//!
//! ```rust
//! use rs_sysled::{Config, Mode, SerialConfig};
//!
//! let config = Config::default()
//!     .with_serial(SerialConfig::default().with_device("/dev/ttyUSB0"))
//!     .with_initial_mode(Mode::Temperature);
//!
//! assert_eq!(config.serial.device, "/dev/ttyUSB0");
//! config.validate().unwrap();
//! ```

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Error;
use crate::modes::Mode;

/// Default serial device for the display.
pub const DEFAULT_DEVICE: &str = "/dev/ttyACM0";

/// Baud rate the display firmware is flashed for.
pub const DEFAULT_BAUD: u32 = 57_600;

// ============================================================================
// Telemetry Config
// ============================================================================

/// Telemetry input configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TelemetryConfig {
    /// Path of the telemetry text file, re-read every cycle.
    pub path: PathBuf,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("sysinfo.txt"),
        }
    }
}

impl TelemetryConfig {
    /// Set the telemetry file path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }
}

// ============================================================================
// Serial Config
// ============================================================================

/// Serial link configuration.
///
/// Framing is fixed at 8 data bits, no parity, one stop bit; only the
/// device path, speed and response timeout vary per installation.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SerialConfig {
    /// Serial device path.
    pub device: String,
    /// Baud rate, both directions.
    pub baud: u32,
    /// Bound on waiting for the device acknowledgement, in milliseconds.
    pub response_timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.into(),
            baud: DEFAULT_BAUD,
            response_timeout_ms: 500,
        }
    }
}

impl SerialConfig {
    /// Set the device path.
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = device.into();
        self
    }

    /// Set the baud rate.
    pub fn with_baud(mut self, baud: u32) -> Self {
        self.baud = baud;
        self
    }

    /// Set the response timeout.
    pub fn with_response_timeout_ms(mut self, ms: u64) -> Self {
        self.response_timeout_ms = ms;
        self
    }

    /// The response timeout as a [`Duration`].
    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }
}

// ============================================================================
// Driver Config
// ============================================================================

/// Display driver pacing configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverConfig {
    /// Pause after opening the serial device before the first write, in
    /// milliseconds. Opening toggles DTR and resets the device; it needs
    /// time to finish booting.
    pub boot_delay_ms: u64,
    /// Pause between cycles, in milliseconds.
    pub cycle_interval_ms: u64,
    /// Mode the driver starts in.
    pub initial_mode: Mode,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            boot_delay_ms: 1_500,
            cycle_interval_ms: 2_000,
            initial_mode: Mode::Usage,
        }
    }
}

impl DriverConfig {
    /// Set the boot delay.
    pub fn with_boot_delay_ms(mut self, ms: u64) -> Self {
        self.boot_delay_ms = ms;
        self
    }

    /// Set the inter-cycle interval.
    pub fn with_cycle_interval_ms(mut self, ms: u64) -> Self {
        self.cycle_interval_ms = ms;
        self
    }

    /// Set the initial mode.
    pub fn with_initial_mode(mut self, mode: Mode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// The boot delay as a [`Duration`].
    pub fn boot_delay(&self) -> Duration {
        Duration::from_millis(self.boot_delay_ms)
    }

    /// The inter-cycle interval as a [`Duration`].
    pub fn cycle_interval(&self) -> Duration {
        Duration::from_millis(self.cycle_interval_ms)
    }
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete bridge configuration.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Telemetry input.
    pub telemetry: TelemetryConfig,
    /// Serial link.
    pub serial: SerialConfig,
    /// Driver pacing.
    pub driver: DriverConfig,
}

impl Config {
    /// Set the telemetry configuration.
    pub fn with_telemetry(mut self, telemetry: TelemetryConfig) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Set the serial configuration.
    pub fn with_serial(mut self, serial: SerialConfig) -> Self {
        self.serial = serial;
        self
    }

    /// Set the driver configuration.
    pub fn with_driver(mut self, driver: DriverConfig) -> Self {
        self.driver = driver;
        self
    }

    /// Shortcut for setting the initial mode.
    pub fn with_initial_mode(mut self, mode: Mode) -> Self {
        self.driver.initial_mode = mode;
        self
    }

    /// Check the configuration for values that can never work.
    ///
    /// Runs at startup; a bad device path or telemetry path is an operator
    /// problem and fatal before any thread is spawned.
    pub fn validate(&self) -> Result<(), Error> {
        if self.serial.device.is_empty() {
            return Err(Error::Config("serial device path is empty".into()));
        }
        if self.serial.baud == 0 {
            return Err(Error::Config("baud rate must be non-zero".into()));
        }
        if self.telemetry.path.as_os_str().is_empty() {
            return Err(Error::Config("telemetry file path is empty".into()));
        }
        if self.driver.initial_mode.is_off() {
            return Err(Error::Config("initial mode must not be off".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployed_hardware() {
        let config = Config::default();
        assert_eq!(config.serial.device, DEFAULT_DEVICE);
        assert_eq!(config.serial.baud, DEFAULT_BAUD);
        assert_eq!(config.driver.boot_delay(), Duration::from_millis(1_500));
        assert_eq!(config.driver.cycle_interval(), Duration::from_secs(2));
        assert_eq!(config.driver.initial_mode, Mode::Usage);
        config.validate().unwrap();
    }

    #[test]
    fn builder_pattern() {
        let config = Config::default()
            .with_telemetry(TelemetryConfig::default().with_path("/tmp/sysinfo.txt"))
            .with_serial(
                SerialConfig::default()
                    .with_device("/dev/ttyUSB1")
                    .with_baud(115_200)
                    .with_response_timeout_ms(250),
            )
            .with_driver(
                DriverConfig::default()
                    .with_boot_delay_ms(100)
                    .with_cycle_interval_ms(500)
                    .with_initial_mode(Mode::Temperature),
            );

        assert_eq!(config.telemetry.path, PathBuf::from("/tmp/sysinfo.txt"));
        assert_eq!(config.serial.device, "/dev/ttyUSB1");
        assert_eq!(config.serial.baud, 115_200);
        assert_eq!(config.serial.response_timeout(), Duration::from_millis(250));
        assert_eq!(config.driver.boot_delay(), Duration::from_millis(100));
        assert_eq!(config.driver.initial_mode, Mode::Temperature);
    }

    #[test]
    fn validate_rejects_empty_device() {
        let config = Config::default().with_serial(SerialConfig::default().with_device(""));
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn validate_rejects_zero_baud() {
        let config = Config::default().with_serial(SerialConfig::default().with_baud(0));
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn validate_rejects_empty_telemetry_path() {
        let config = Config::default().with_telemetry(TelemetryConfig::default().with_path(""));
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn validate_rejects_off_as_initial_mode() {
        let config = Config::default().with_initial_mode(Mode::Off);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
