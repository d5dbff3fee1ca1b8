//! Firmware diagnostics: defmt log plus a text echo on the UART TX line.
//!
//! The echo uses `blocking_write`, and RX is not drained while it runs. A
//! burst of short lines produces far more TX than RX bytes, so a fast sender
//! can fill the 32-byte RX FIFO and the next read fails with `Overrun`. With
//! traffic echo off (the `quiet` feature) only faults reach the UART, and
//! defmt still gets every event.

use core::fmt;

use defmt::{debug, warn, Display2Format};
use embassy_rp::gpio::Output;
use embassy_rp::uart::{Async, UartTx};
use keyboard_core::{Diagnostics, Event, TextDiagnostics};

/// [`fmt::Write`] adapter over the UART transmitter.
pub struct UartWriter<'d> {
    tx: UartTx<'d, Async>,
}

impl<'d> UartWriter<'d> {
    #[must_use]
    pub fn new(tx: UartTx<'d, Async>) -> Self {
        Self { tx }
    }
}

impl fmt::Write for UartWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.tx.blocking_write(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Sends every event to defmt and echoes it on the UART.
///
/// Faults are logged at `warn` level and toggle the status LED. When
/// `echo_traffic` is false the UART only carries faults.
pub struct FirmwareDiagnostics<'d> {
    echo: TextDiagnostics<UartWriter<'d>>,
    led: Output<'d>,
}

impl<'d> FirmwareDiagnostics<'d> {
    #[must_use]
    pub fn new(tx: UartTx<'d, Async>, led: Output<'d>, echo_traffic: bool) -> Self {
        Self {
            echo: TextDiagnostics::new(UartWriter::new(tx)).with_faults_only(!echo_traffic),
            led,
        }
    }
}

impl Diagnostics for FirmwareDiagnostics<'_> {
    fn report(&mut self, event: &Event<'_>) {
        if event.is_fault() {
            warn!("{}", Display2Format(event));
            self.led.toggle();
        } else {
            debug!("{}", Display2Format(event));
        }
        self.echo.report(event);
    }
}
