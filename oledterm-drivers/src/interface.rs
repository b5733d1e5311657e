//! Display bus interfaces
//!
//! The SSD1306 accepts the same command and data bytes over I2C and SPI;
//! only the framing differs. I2C prefixes every write with a control
//! byte, SPI uses a separate data/command (DC) pin.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiBus;

use crate::framebuffer::WIDTH;

/// Default 7-bit I2C address of SSD1306 modules
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

/// Control byte: following bytes are commands
const CONTROL_COMMAND: u8 = 0x00;

/// Control byte: following bytes are display data
const CONTROL_DATA: u8 = 0x40;

/// Display bus errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    Bus,
    /// Control pin (DC, CS or reset) could not be driven
    Pin,
}

/// Byte-level link to a display controller
pub trait DisplayInterface {
    /// Send command bytes
    fn send_commands(&mut self, commands: &[u8]) -> Result<(), DisplayError>;

    /// Send display RAM data
    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError>;
}

/// I2C display interface
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> I2cInterface<I2C> {
    /// Create an interface at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_I2C_ADDRESS)
    }

    /// Create an interface at a specific 7-bit address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> DisplayInterface for I2cInterface<I2C> {
    fn send_commands(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        for &cmd in commands {
            self.i2c
                .write(self.address, &[CONTROL_COMMAND, cmd])
                .map_err(|_| DisplayError::Bus)?;
        }
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        let mut buf = [0u8; WIDTH + 1];
        buf[0] = CONTROL_DATA;

        for chunk in data.chunks(WIDTH) {
            buf[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c
                .write(self.address, &buf[..=chunk.len()])
                .map_err(|_| DisplayError::Bus)?;
        }
        Ok(())
    }
}

/// 4-wire SPI display interface
///
/// Chip select is driven here, so `SPI` is the raw bus.
pub struct SpiInterface<SPI, DC, CS> {
    spi: SPI,
    dc: DC,
    cs: CS,
}

impl<SPI, DC, CS> SpiInterface<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Create an interface from the bus and control pins
    pub fn new(spi: SPI, dc: DC, cs: CS) -> Self {
        Self { spi, dc, cs }
    }

    /// Consume the interface and return the bus and pins
    pub fn release(self) -> (SPI, DC, CS) {
        (self.spi, self.dc, self.cs)
    }

    fn transfer(&mut self, dc: PinState, bytes: &[u8]) -> Result<(), DisplayError> {
        self.cs.set_high().map_err(|_| DisplayError::Pin)?;
        self.dc.set_state(dc).map_err(|_| DisplayError::Pin)?;
        self.cs.set_low().map_err(|_| DisplayError::Pin)?;

        let result = self
            .spi
            .write(bytes)
            .and_then(|()| self.spi.flush())
            .map_err(|_| DisplayError::Bus);

        // Release the chip even when the transfer failed
        self.cs.set_high().map_err(|_| DisplayError::Pin)?;
        result
    }
}

impl<SPI, DC, CS> DisplayInterface for SpiInterface<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    fn send_commands(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        self.transfer(PinState::Low, commands)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.transfer(PinState::High, data)
    }
}

/// Pulse the reset line: high 1 ms, low 10 ms, then high
pub fn hardware_reset<RST, D>(rst: &mut RST, delay: &mut D) -> Result<(), DisplayError>
where
    RST: OutputPin,
    D: DelayNs,
{
    rst.set_high().map_err(|_| DisplayError::Pin)?;
    delay.delay_ms(1);
    rst.set_low().map_err(|_| DisplayError::Pin)?;
    delay.delay_ms(10);
    rst.set_high().map_err(|_| DisplayError::Pin)
}
