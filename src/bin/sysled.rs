//! Command-line entry point for the telemetry display bridge.
//!
//! Wires the file telemetry source and the serial channel into the display
//! driver, spawns the driver on a background thread, and runs the operator
//! menu on stdin until `0` is entered.
//!
//! ```sh
//! sysled --telemetry-file /var/lib/sysinfo.txt --device /dev/ttyACM0
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use rs_sysled::hal::{FileTelemetry, SerialChannel};
use rs_sysled::services::{run_operator_loop, DisplayDriver};
use rs_sysled::{Config, DriverConfig, ModeController, SerialConfig, TelemetryConfig};

/// Stream CPU telemetry to an Arduino LED display over serial.
#[derive(Debug, Parser)]
#[command(name = "sysled", version, about)]
struct Cli {
    /// Telemetry text file produced by the sampling script
    #[arg(long, default_value = "sysinfo.txt")]
    telemetry_file: PathBuf,

    /// Serial device connected to the display
    #[arg(long, default_value = "/dev/ttyACM0")]
    device: String,

    /// Baud rate (must match the display firmware)
    #[arg(long, default_value_t = 57_600)]
    baud: u32,

    /// Pause between display cycles, in milliseconds
    #[arg(long, default_value_t = 2_000)]
    interval_ms: u64,

    /// Pause after opening the device before the first write, in
    /// milliseconds
    #[arg(long, default_value_t = 1_500)]
    boot_delay_ms: u64,

    /// Bound on waiting for the device acknowledgement, in milliseconds
    #[arg(long, default_value_t = 500)]
    response_timeout_ms: u64,
}

impl Cli {
    fn into_config(self) -> Config {
        Config::default()
            .with_telemetry(TelemetryConfig::default().with_path(self.telemetry_file))
            .with_serial(
                SerialConfig::default()
                    .with_device(self.device)
                    .with_baud(self.baud)
                    .with_response_timeout_ms(self.response_timeout_ms),
            )
            .with_driver(
                DriverConfig::default()
                    .with_boot_delay_ms(self.boot_delay_ms)
                    .with_cycle_interval_ms(self.interval_ms),
            )
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Cli::parse().into_config();
    config.validate().context("configuration rejected")?;

    let channel = SerialChannel::open(
        &config.serial.device,
        config.serial.baud,
        config.serial.response_timeout(),
    )
    .with_context(|| format!("opening {}", config.serial.device))?;
    let source = FileTelemetry::new(&config.telemetry.path);

    info!(
        device = %config.serial.device,
        baud = config.serial.baud,
        telemetry = %config.telemetry.path.display(),
        "sysled starting"
    );

    let controller = Arc::new(ModeController::new(config.driver.initial_mode));
    let mut driver = DisplayDriver::new(source, channel, Arc::clone(&controller), config.driver);

    let driver_thread = thread::spawn(move || {
        if let Err(err) = driver.run() {
            // A lost serial link or a missing telemetry file needs the
            // operator; nothing to retry here.
            error!(%err, "display driver failed");
            process::exit(1);
        }
    });

    let stdin = io::stdin();
    run_operator_loop(stdin.lock(), io::stdout(), &controller)?;

    driver_thread
        .join()
        .map_err(|_| anyhow::anyhow!("display driver thread panicked"))?;
    info!("sysled exiting");
    Ok(())
}
