//! USB HID boot keyboard output implementation.

use defmt::info;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{
    Config as HidConfig, HidBootProtocol, HidSubclass, HidWriter, State,
};
use embassy_usb::driver::EndpointError;
use embassy_usb::{Builder, Handler};
use keyboard_core::{KeyReport, OutputError, ReportWriter};
use portable_atomic::{AtomicBool, Ordering};
use usbd_hid::descriptor::{KeyboardReport, SerializedDescriptor};

/// HID writer for an 8-byte boot keyboard report.
pub type KeyboardHidWriter<'d> = HidWriter<'d, Driver<'d, USB>, { KeyReport::SIZE }>;

/// Set while the host has the device configured.
static USB_CONFIGURED: AtomicBool = AtomicBool::new(false);

/// Convert endpoint errors to [`OutputError`].
#[inline]
fn endpoint_error_to_output_error(e: EndpointError) -> OutputError {
    match e {
        EndpointError::Disabled => OutputError::NotReady,
        EndpointError::BufferOverflow => OutputError::Io,
    }
}

/// Tracks the USB device state reported by the stack.
pub struct UsbStateHandler;

impl Handler for UsbStateHandler {
    fn reset(&mut self) {
        USB_CONFIGURED.store(false, Ordering::Relaxed);
    }

    fn configured(&mut self, configured: bool) {
        USB_CONFIGURED.store(configured, Ordering::Relaxed);
        if configured {
            info!("USB configured");
        } else {
            info!("USB deconfigured");
        }
    }
}

/// Writes keyboard reports to the USB HID endpoint.
pub struct UsbReportWriter<'d> {
    writer: KeyboardHidWriter<'d>,
}

impl<'d> UsbReportWriter<'d> {
    /// Create a new report writer from the given HID writer.
    pub fn new(writer: KeyboardHidWriter<'d>) -> Self {
        Self { writer }
    }

    /// Wait until the device is ready (USB enumerated).
    pub async fn wait_ready(&mut self) {
        self.writer.ready().await;
    }
}

impl ReportWriter for UsbReportWriter<'_> {
    async fn write_report(&mut self, report: &KeyReport) -> Result<(), OutputError> {
        if !self.is_ready() {
            return Err(OutputError::NotReady);
        }

        let report = KeyboardReport {
            modifier: report.modifiers(),
            reserved: 0,
            leds: 0,
            keycodes: *report.keys(),
        };
        self.writer
            .write_serialize(&report)
            .await
            .map_err(endpoint_error_to_output_error)
    }

    fn is_ready(&self) -> bool {
        USB_CONFIGURED.load(Ordering::Relaxed)
    }
}

/// Configure the USB HID boot keyboard class in the USB builder.
///
/// Returns the HID writer for use by the application.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, Driver<'d, USB>>,
    state: &'d mut State<'d>,
) -> KeyboardHidWriter<'d> {
    let config = HidConfig {
        report_descriptor: KeyboardReport::desc(),
        request_handler: None,
        poll_ms: 1,
        max_packet_size: KeyReport::SIZE as u16,
        hid_subclass: HidSubclass::Boot,
        hid_boot_protocol: HidBootProtocol::Keyboard,
    };

    HidWriter::new(builder, state, config)
}
