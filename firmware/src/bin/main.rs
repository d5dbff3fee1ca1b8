#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{UART1, USB};
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use static_cell::StaticCell;
use uart_to_keyboard::{
    configure_usb_hid, FirmwareDiagnostics, HidKeyboard, KeyboardBridge, UartInput,
    UsbReportWriter, UsbStateHandler, BAUD_RATE, CONFIG,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();

/// USB device state handler.
static USB_HANDLER: StaticCell<UsbStateHandler> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("UART-to-Keyboard starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BAUD_RATE;

    let uart = Uart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (tx, rx) = uart.split();
    let input = UartInput::new(rx);

    // Fault indicator (on-board LED on Pico)
    let led = Output::new(p.PIN_25, Level::Low);
    let diagnostics = FirmwareDiagnostics::new(tx, led, CONFIG.echo_input);

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    usb_config.manufacturer = Some("Rust Keyboard");
    usb_config.product = Some("UART-to-Keyboard Bridge");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );
    builder.handler(USB_HANDLER.init(UsbStateHandler));

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let hid_writer = configure_usb_hid(&mut builder, hid_state);

    // Build the USB device
    let usb_device = builder.build();

    let keyboard = HidKeyboard::new(UsbReportWriter::new(hid_writer));

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(keyboard_task(input, keyboard, diagnostics).unwrap());

    info!("UART-to-Keyboard initialized, waiting for USB...");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Keyboard task - reads UART chunks, decodes commands and types them.
#[embassy_executor::task]
async fn keyboard_task(
    input: UartInput<'static>,
    mut keyboard: HidKeyboard<UsbReportWriter<'static>>,
    diagnostics: FirmwareDiagnostics<'static>,
) {
    // Wait for USB to be ready
    keyboard.writer_mut().wait_ready().await;
    info!("USB HID ready, forwarding key commands...");

    let mut bridge = KeyboardBridge::new(input, keyboard, diagnostics, &CONFIG);
    bridge.run().await;
}
