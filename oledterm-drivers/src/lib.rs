//! Display driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in oledterm-core:
//!
//! - 1-bit framebuffer in SSD1306 page layout
//! - SSD1306 controller driver implementing `PixelDriver`
//! - I2C and SPI display interfaces
//! - Transport adapters that build a ready console per bus
//! - Seven-segment LED digit driver

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod framebuffer;
pub mod interface;
pub mod segment;
pub mod ssd1306;
pub mod transport;

pub use framebuffer::{DisplaySize, FrameBuffer};
pub use interface::{DisplayError, DisplayInterface, I2cInterface, SpiInterface};
pub use segment::{SegmentError, SevenSegment, TwoDigitDisplay};
pub use ssd1306::Ssd1306;
pub use transport::{i2c_console, spi_console, I2cConsole, SpiConsole, TransportError};
