//! Ecusim - Engine Position-Signal Simulator Firmware
//!
//! Generates crankshaft and camshaft position-sensor pulse trains on two
//! GPIO pins so an ECU can be bench-tested without a running engine.
//! Controlled over a line-oriented serial console.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ecusim_core::pattern::preset_by_id;
use ecusim_core::scheduler::EdgeSequencer;
use ecusim_hal_rp2040::GpioEdgeOutputs;

mod channels;
mod config;
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
    info!("Ecusim firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Setup UART0 for the control console (115200 8N1 default)
    let uart_config = UartConfig::default();

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("Control UART initialized");

    // Output lines: crank on GPIO14, cam on GPIO15
    let outputs = GpioEdgeOutputs::new(p.PIN_14, p.PIN_15, config::OUTPUTS);

    // Boot geometry comes from the compiled-in preset; presets are
    // validated at test time, so failure here means a build defect
    let (tooth, cam) = preset_by_id(config::DEFAULT_PRESET_ID).unwrap();
    let sequencer = EdgeSequencer::new(tooth, cam, config::SPEED).unwrap();

    info!("Sequencer initialized (preset {})", config::DEFAULT_PRESET_ID);

    // Spawn tasks
    spawner.spawn(tasks::sequencer_task(outputs, sequencer)).unwrap();
    spawner.spawn(tasks::control_task(rx, tx)).unwrap();

    info!("All tasks spawned, simulator ready");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
