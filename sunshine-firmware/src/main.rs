//! Sunshine - Weather Watch Face Firmware
//!
//! Main firmware binary for RP2040-based watches. Shows the time, the date
//! and the day's high/low temperatures with an icon. Weather comes from
//! the companion phone app through a BLE-UART bridge.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use sunshine_core::config::FaceConfig;
use sunshine_core::sync::WeatherSync;

mod channels;
mod companion;
mod config;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// SPI clock for the panel
const PANEL_SPI_HZ: u32 = 62_500_000;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 512]> = StaticCell::new();

// Configuration and sync state shared with tasks for the program lifetime
static FACE_CONFIG: StaticCell<FaceConfig> = StaticCell::new();
static WEATHER_SYNC: StaticCell<WeatherSync> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Sunshine firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config: &'static FaceConfig = FACE_CONFIG.init(config::load());
    info!(
        "Screen {}x{} round={} low_bit_ambient={}",
        config.screen.width, config.screen.height, config.screen.round, config.screen.low_bit_ambient
    );

    // Setup UART for the companion bridge
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 512]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for companion bridge");

    // Setup SPI1 for the panel
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = PANEL_SPI_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PIN_10, p.PIN_11, spi_config);
    let cs = Output::new(p.PIN_9, Level::High);
    let dc = Output::new(p.PIN_8, Level::Low);
    let rst = Output::new(p.PIN_12, Level::High);
    let backlight = Output::new(p.PIN_13, Level::Low);

    let panel = match display::init(spi, cs, dc, rst, &config.screen) {
        Ok(panel) => {
            info!("Panel initialized");
            Some(panel)
        }
        Err(e) => {
            // Keep syncing so the face is current once the panel recovers
            error!("Panel init failed: {:?}", e);
            None
        }
    };

    // Key A on the Pico-LCD-1.3, active low
    let button = Input::new(p.PIN_15, Pull::Up);

    let sync = WEATHER_SYNC.init(WeatherSync::new(config.companion.peer_selection));

    // Spawn tasks
    spawner.spawn(tasks::redraw_timer_task()).unwrap();
    spawner.spawn(tasks::minute_tick_task()).unwrap();
    spawner.spawn(tasks::companion_rx_task(rx)).unwrap();
    spawner.spawn(tasks::companion_tx_task(tx)).unwrap();
    spawner
        .spawn(tasks::sync_task(sync, config.companion.request_timeout_ms))
        .unwrap();
    if let Some(panel) = panel {
        spawner.spawn(tasks::display_task(panel, config)).unwrap();
    }
    spawner
        .spawn(tasks::input_task(button, backlight, config.ambient.timeout_s))
        .unwrap();
    spawner.spawn(tasks::controller_task(config.screen)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
