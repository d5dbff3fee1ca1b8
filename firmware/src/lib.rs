//! UART to USB keyboard bridge for RP2040.
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Receives key commands over UART (115200 baud, 8N1)
//! 2. Frames and decodes them into key lists
//! 3. Presses the keys on a USB HID boot keyboard
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | UART1 TX | 8    | Diagnostics echo |
//! | UART1 RX | 9    | Key command input |
//! | LED      | 25   | On-board LED (toggles on faults) |
//!
//! # Architecture
//!
//! Two Embassy tasks: the USB device task runs the USB stack, and the
//! keyboard task runs a [`KeyboardBridge`] over [`UartInput`] and a
//! [`HidKeyboard`] backed by [`UsbReportWriter`].
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`legacy-framing`**: A chunk containing a terminator ends the line as a whole
//! - **`quiet`**: Echo only faults on the UART; use it for senders that do
//!   not pace their lines (see [`diagnostics`])

#![no_std]

// Re-export core types for convenience
pub use keyboard_core::{
    BridgeError, Command, Config, Diagnostics, Event, FramingPolicy, HidKeyboard, InputError,
    KeyReport, KeyboardBridge, KeyboardOutput, Keycode, OutputError, ReportWriter, SerialInput,
};

pub mod diagnostics;
pub mod uart_input;
pub mod usb_output;

pub use diagnostics::{FirmwareDiagnostics, UartWriter};
pub use uart_input::{UartInput, BAUD_RATE};
pub use usb_output::{configure_usb_hid, KeyboardHidWriter, UsbReportWriter, UsbStateHandler};

/// Loop configuration selected by Cargo features.
pub const CONFIG: Config = Config::new()
    .with_framing(if cfg!(feature = "legacy-framing") {
        FramingPolicy::WholeBuffer
    } else {
        FramingPolicy::SplitAtTerminator
    })
    .with_echo_input(!cfg!(feature = "quiet"));
