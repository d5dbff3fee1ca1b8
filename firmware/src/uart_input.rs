//! UART-based serial input for key commands.
//!
//! Each [`SerialInput::read`] waits up to [`POLL_TIMEOUT`] for a first byte,
//! then keeps collecting while bytes arrive within [`BYTE_TIMEOUT`] of each
//! other. An idle line returns `Ok(0)` so the keyboard loop keeps ticking.
//!
//! # Pins
//!
//! Uses UART1 by default:
//! - GPIO 8: TX (diagnostics)
//! - GPIO 9: RX (key commands)

use embassy_rp::uart::{Async, Error as UartError, UartRx};
use embassy_time::{with_timeout, Duration};
use keyboard_core::{InputError, SerialInput};

/// UART baud rate.
pub const BAUD_RATE: u32 = 115_200;

/// How long a read waits for the first byte before reporting no data.
pub const POLL_TIMEOUT: Duration = Duration::from_millis(10);

/// Gap that ends a burst; about ten byte times at 115200 baud.
pub const BYTE_TIMEOUT: Duration = Duration::from_micros(900);

/// Convert UART errors to [`InputError`].
///
/// This is a helper function instead of a `From` impl to avoid orphan rule issues
/// (both `UartError` and `InputError` are defined in external crates).
#[inline]
fn uart_error_to_input_error(e: UartError) -> InputError {
    match e {
        UartError::Framing => InputError::Framing,
        UartError::Overrun => InputError::Overrun,
        UartError::Break => InputError::Break,
        _ => InputError::Io,
    }
}

/// UART receiver that hands out bursts of bytes.
pub struct UartInput<'d> {
    rx: UartRx<'d, Async>,
    /// Error seen after part of a burst was already collected.
    deferred: Option<InputError>,
}

impl<'d> UartInput<'d> {
    /// Create a new UART input from the given UART receiver.
    #[must_use]
    pub fn new(rx: UartRx<'d, Async>) -> Self {
        Self { rx, deferred: None }
    }
}

impl SerialInput for UartInput<'_> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, InputError> {
        if let Some(e) = self.deferred.take() {
            return Err(e);
        }

        let Some((first, rest)) = buf.split_first_mut() else {
            return Ok(0);
        };

        match with_timeout(POLL_TIMEOUT, self.rx.read(core::slice::from_mut(first))).await {
            Err(_) => return Ok(0),
            Ok(result) => result.map_err(uart_error_to_input_error)?,
        }

        let mut count = 1;
        for slot in rest {
            match with_timeout(BYTE_TIMEOUT, self.rx.read(core::slice::from_mut(slot))).await {
                Ok(Ok(())) => count += 1,
                Ok(Err(e)) => {
                    // Hand out what arrived; the error follows on the next read
                    self.deferred = Some(uart_error_to_input_error(e));
                    break;
                }
                Err(_) => break,
            }
        }

        Ok(count)
    }
}
