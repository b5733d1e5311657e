//! oledterm firmware
//!
//! Status console demo for RP2040 boards: one SSD1306 on I2C, one on SPI
//! and a two-digit seven-segment counter. Display settings come from
//! display.toml at build time.
//!
//! Wiring:
//! - I2C0: SDA=GPIO4, SCL=GPIO5
//! - SPI1: SCK=GPIO10, MOSI=GPIO11, DC=GPIO8, CS=GPIO9, RST=GPIO12
//! - Ones digit A..G: GPIO13-19
//! - Tens digit A..G: GPIO20-22, GPIO26-28, GPIO3

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::spi::{self, Spi};
use embassy_time::Delay;
use embedded_hal::spi::{Phase, Polarity};
use oledterm_drivers::transport::SPI_MODE;
use oledterm_drivers::{i2c_console, spi_console, SevenSegment, TwoDigitDisplay};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

mod config;
mod tasks;

// Reset line must stay driven high for the life of the SPI display
static SPI_RESET: StaticCell<Output<'static>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("oledterm firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // I2C OLED
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = config::I2C_FREQUENCY_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    match i2c_console(i2c, config::I2C_ADDRESS, config::I2C_SIZE, &config::CONSOLE) {
        Ok(console) => {
            info!("I2C display at {:#x} initialized", config::I2C_ADDRESS);
            spawner.spawn(tasks::i2c_console_task(console)).unwrap();
        }
        Err(e) => error!("I2C display init failed: {}", e),
    }

    // SPI OLED
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PIN_10, p.PIN_11, spi_config());
    let dc = Output::new(p.PIN_8, Level::Low);
    let cs = Output::new(p.PIN_9, Level::High);
    let rst = SPI_RESET.init(Output::new(p.PIN_12, Level::High));

    match spi_console(
        spi,
        dc,
        cs,
        rst,
        &mut Delay,
        config::SPI_SIZE,
        &config::CONSOLE,
    ) {
        Ok(console) => {
            info!("SPI display initialized");
            spawner.spawn(tasks::spi_console_task(console)).unwrap();
        }
        Err(e) => error!("SPI display init failed: {}", e),
    }

    // Seven-segment counter
    let ones = SevenSegment::new(
        [
            Output::new(p.PIN_13, Level::Low),
            Output::new(p.PIN_14, Level::Low),
            Output::new(p.PIN_15, Level::Low),
            Output::new(p.PIN_16, Level::Low),
            Output::new(p.PIN_17, Level::Low),
            Output::new(p.PIN_18, Level::Low),
            Output::new(p.PIN_19, Level::Low),
        ],
        config::SEGMENT_POLARITY,
    );
    let tens = SevenSegment::new(
        [
            Output::new(p.PIN_20, Level::Low),
            Output::new(p.PIN_21, Level::Low),
            Output::new(p.PIN_22, Level::Low),
            Output::new(p.PIN_26, Level::Low),
            Output::new(p.PIN_27, Level::Low),
            Output::new(p.PIN_28, Level::Low),
            Output::new(p.PIN_3, Level::Low),
        ],
        config::SEGMENT_POLARITY,
    );
    spawner
        .spawn(tasks::counter_task(TwoDigitDisplay::new(ones, tens)))
        .unwrap();

    info!("All tasks spawned");
}

/// SPI settings for the OLED, in the mode the driver expects
fn spi_config() -> spi::Config {
    let mut settings = spi::Config::default();
    settings.frequency = config::SPI_FREQUENCY_HZ;
    settings.polarity = match SPI_MODE.polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    settings.phase = match SPI_MODE.phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    settings
}
