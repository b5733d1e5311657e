//! Transport adapters
//!
//! Each adapter wires an SSD1306 to its bus, initializes it and hands
//! the driver to a [`TextConsole`]. Bus peripheral setup (pins, clock,
//! mode) stays with the board code; the constants here are the settings
//! the modules are known to work with.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::{Mode, SpiBus, MODE_2};
use oledterm_core::{ConfigError, ConsoleConfig, TextConsole};

use crate::framebuffer::DisplaySize;
use crate::interface::{hardware_reset, DisplayError, I2cInterface, SpiInterface};
use crate::ssd1306::Ssd1306;

/// I2C clock for SSD1306 modules (fast mode)
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// SPI clock for SSD1306 modules
pub const SPI_FREQUENCY_HZ: u32 = 500_000;

/// SPI mode: clock idles high, data captured on the first edge
pub const SPI_MODE: Mode = MODE_2;

/// Errors while bringing up a console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Display did not accept the init sequence
    Display(DisplayError),
    /// Console settings do not fit the panel
    Config(ConfigError),
}

impl From<DisplayError> for TransportError {
    fn from(e: DisplayError) -> Self {
        TransportError::Display(e)
    }
}

impl From<ConfigError> for TransportError {
    fn from(e: ConfigError) -> Self {
        TransportError::Config(e)
    }
}

/// Console on an I2C-attached SSD1306
pub type I2cConsole<I2C> = TextConsole<Ssd1306<I2cInterface<I2C>>>;

/// Console on an SPI-attached SSD1306
pub type SpiConsole<SPI, DC, CS> = TextConsole<Ssd1306<SpiInterface<SPI, DC, CS>>>;

/// Build a console on an I2C bus
pub fn i2c_console<I2C: I2c>(
    i2c: I2C,
    address: u8,
    size: DisplaySize,
    config: &ConsoleConfig,
) -> Result<I2cConsole<I2C>, TransportError> {
    config.validate(size.width(), size.height())?;

    let mut display = Ssd1306::new(I2cInterface::with_address(i2c, address), size);
    display.init()?;

    Ok(TextConsole::with_config(display, config)?)
}

/// Build a console on an SPI bus
///
/// The display is reset through `rst` first. The reset pin is borrowed
/// so the caller keeps it driven high afterwards.
#[allow(clippy::too_many_arguments)]
pub fn spi_console<SPI, DC, CS, RST, D>(
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: &mut RST,
    delay: &mut D,
    size: DisplaySize,
    config: &ConsoleConfig,
) -> Result<SpiConsole<SPI, DC, CS>, TransportError>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    config.validate(size.width(), size.height())?;

    hardware_reset(rst, delay)?;

    let mut display = Ssd1306::new(SpiInterface::new(spi, dc, cs), size);
    display.init()?;

    Ok(TextConsole::with_config(display, config)?)
}
