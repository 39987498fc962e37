//! ST7789 panel bring-up
//!
//! Pin assignments follow the Waveshare Pico-LCD-1.3 (240x240 IPS):
//! SPI1 CLK=GPIO10, MOSI=GPIO11, CS=GPIO9, DC=GPIO8, RST=GPIO12,
//! backlight GPIO13.

use display_interface_spi::SPIInterface;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::models::ST7789;
use mipidsi::options::ColorInversion;
use mipidsi::{Builder, Display};

use sunshine_core::config::ScreenConfig;

/// SPI device owning the panel chip select
pub type PanelSpi = ExclusiveDevice<Spi<'static, SPI1, Blocking>, Output<'static>, NoDelay>;

/// Initialized panel
pub type Panel = Display<SPIInterface<PanelSpi, Output<'static>>, ST7789, Output<'static>>;

/// Panel bring-up errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Chip select could not be driven
    ChipSelect,
    /// Controller did not accept the init sequence
    Init,
}

/// Reset and configure the panel
pub fn init(
    spi: Spi<'static, SPI1, Blocking>,
    cs: Output<'static>,
    dc: Output<'static>,
    rst: Output<'static>,
    screen: &ScreenConfig,
) -> Result<Panel, PanelError> {
    let device = ExclusiveDevice::new_no_delay(spi, cs).map_err(|_| PanelError::ChipSelect)?;
    let di = SPIInterface::new(device, dc);

    Builder::new(ST7789, di)
        .display_size(screen.width, screen.height)
        .invert_colors(ColorInversion::Inverted)
        .reset_pin(rst)
        .init(&mut Delay)
        .map_err(|_| PanelError::Init)
}
