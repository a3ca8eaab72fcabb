//! Serialport-backed display link.

use std::io::{self, Read, Write};
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::debug;

use crate::error::Error;
use crate::traits::DisplayLink;

/// The open serial connection to the display device.
///
/// Framing is fixed at 8 data bits, no parity, one stop bit, no flow
/// control; the device firmware does not negotiate. Reads are bounded by
/// the configured timeout so a disconnected device cannot hang the driver
/// loop.
///
/// Opening the port toggles DTR and resets the device; callers must wait
/// out the boot delay before the first write (the driver's `Starting`
/// state does this).
pub struct SerialChannel {
    port: Box<dyn SerialPort>,
    read_timeout: Duration,
}

impl SerialChannel {
    /// Open and configure the serial device.
    pub fn open(path: &str, baud: u32, read_timeout: Duration) -> Result<Self, Error> {
        let port = serialport::new(path, baud)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(read_timeout)
            .open()
            .map_err(|source| Error::Open {
                path: path.to_owned(),
                source,
            })?;
        debug!(path, baud, "serial device opened");
        Ok(Self { port, read_timeout })
    }
}

impl DisplayLink for SerialChannel {
    fn write_payload(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.port.write_all(bytes)?;
        Ok(())
    }

    /// Read the device's line-oriented reply.
    ///
    /// Collects bytes until `max_bytes`, a `\n` terminator, or the timeout.
    /// A partial reply counts as the full response; only a reply with zero
    /// bytes inside the timeout is a [`Error::Timeout`].
    fn read_response(&mut self, max_bytes: usize) -> Result<Vec<u8>, Error> {
        let mut response = Vec::with_capacity(max_bytes);
        let mut byte = [0u8; 1];
        while response.len() < max_bytes {
            match self.port.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    response.push(byte[0]);
                    if byte[0] == b'\n' {
                        break;
                    }
                }
                Err(err) if err.kind() == io::ErrorKind::TimedOut => {
                    if response.is_empty() {
                        return Err(Error::Timeout(self.read_timeout));
                    }
                    break;
                }
                Err(err) => return Err(Error::Io(err)),
            }
        }
        Ok(response)
    }
}
