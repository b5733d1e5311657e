//! Board-agnostic core logic for monochrome text consoles
//!
//! This crate contains everything that does not depend on a specific
//! display controller or bus:
//!
//! - Pixel driver trait implemented by display drivers
//! - Color policy (text/fill polarity)
//! - Header registry for lines retained across scrolls
//! - Cursor tracking
//! - The text console itself (scroll/clear state machine)
//! - Console configuration
//! - Seven-segment digit encoding
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (oledterm-firmware, etc.)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  TextConsole (this crate)               │
//! └─────────────────────────────────────────┘
//!                     │  PixelDriver
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  oledterm-drivers (SSD1306 over I2C/SPI)│
//! └─────────────────────────────────────────┘
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod console;
pub mod cursor;
pub mod digit;
pub mod header;
pub mod traits;

// Re-export key types
pub use color::{ColorPolicy, PixelValue};
pub use config::{ConfigError, ConsoleConfig};
pub use console::{Placement, TextConsole};
pub use cursor::Cursor;
pub use header::HeaderRegistry;
pub use traits::PixelDriver;
