//! Display link abstraction.

use crate::error::Error;

/// A byte channel to the display device.
///
/// The driver is the only user of the link: it writes payload slices and
/// reads the short acknowledgement the device sends back after each
/// request. Implementations decide how reads are bounded, but the contract
/// is strict about what each outcome means:
///
/// - a short read **is** the full response (the reply length is capped,
///   not negotiated);
/// - a read that produces *nothing* within the implementation's bound is
///   [`Error::Timeout`]; the driver logs it and keeps cycling;
/// - any other failure is [`Error::Io`] and fatal.
///
/// The production implementation is
/// [`SerialChannel`](crate::hal::SerialChannel); tests use
/// [`MockLink`](crate::hal::MockLink).
pub trait DisplayLink {
    /// Blocking write of exactly the given bytes.
    fn write_payload(&mut self, bytes: &[u8]) -> Result<(), Error>;

    /// Read the device response, up to `max_bytes`.
    ///
    /// Returns the bytes received, which may be fewer than `max_bytes`.
    fn read_response(&mut self, max_bytes: usize) -> Result<Vec<u8>, Error>;
}
