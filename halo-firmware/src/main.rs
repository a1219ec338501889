//! Halo - Round display firmware
//!
//! Main firmware binary for RP2040-based display terminals. The device
//! renders a small set of prebuilt screens on a 466x466 round AMOLED
//! panel and is driven entirely by a host controller over serial.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use halo_core::{LinkConfig, TransitionConfig};

mod channels;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Halo firmware starting...");

    let p = embassy_rp::init(Default::default());

    let link = LinkConfig::default();

    let mut uart_config = UartConfig::default();
    uart_config.baudrate = link.baud;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, rx) = uart.split();

    info!("host link up: {} baud, {} mode", link.baud, link.mode);

    spawner.spawn(tasks::render_task()).unwrap();
    spawner.spawn(tasks::serial_rx_task(rx, link.mode)).unwrap();
    spawner.spawn(tasks::ui_task(TransitionConfig::default())).unwrap();

    info!("all tasks spawned");

    loop {
        Timer::after_secs(60).await;
        trace!("heartbeat");
    }
}
