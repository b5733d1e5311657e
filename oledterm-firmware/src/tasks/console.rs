//! Status console tasks
//!
//! One task per transport. Each writes the boot header, then appends a
//! round of status lines every few seconds and lets the console scroll
//! them under the header.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::i2c::{Blocking as I2cBlocking, I2c};
use embassy_rp::peripherals::{I2C0, SPI1};
use embassy_rp::spi::{Blocking as SpiBlocking, Spi};
use embassy_time::{Duration, Instant, Ticker};
use oledterm_core::{PixelDriver, TextConsole};
use oledterm_drivers::{I2cConsole, SpiConsole};

use crate::config::{HEADER, STATUS_INTERVAL_S};

/// Console on the I2C OLED
pub type I2cStatusConsole = I2cConsole<I2c<'static, I2C0, I2cBlocking>>;

/// Console on the SPI OLED
pub type SpiStatusConsole =
    SpiConsole<Spi<'static, SPI1, SpiBlocking>, Output<'static>, Output<'static>>;

#[embassy_executor::task]
pub async fn i2c_console_task(mut console: I2cStatusConsole) {
    info!("I2C console task started");
    run_status(&mut console, "i2c").await;
}

#[embassy_executor::task]
pub async fn spi_console_task(mut console: SpiStatusConsole) {
    info!("SPI console task started");
    run_status(&mut console, "spi").await;
}

async fn run_status<D>(console: &mut TextConsole<D>, label: &'static str)
where
    D: PixelDriver,
    D::Error: Format,
{
    for line in HEADER {
        if let Err(e) = console.write_line(line) {
            error!("{} header write failed: {}", label, e);
        }
    }

    let mut ticker = Ticker::every(Duration::from_secs(STATUS_INTERVAL_S));
    let mut round: u32 = 0;

    loop {
        ticker.next().await;
        round = round.wrapping_add(1);

        let uptime = Instant::now().as_secs();
        match status_round(console, uptime, round) {
            Ok(()) => debug!("{} round {} at row {}", label, round, console.cursor().current()),
            Err(e) => warn!("{} status write failed: {}", label, e),
        }
    }
}

fn status_round<D: PixelDriver>(
    console: &mut TextConsole<D>,
    uptime: u64,
    round: u32,
) -> Result<(), D::Error> {
    console.show_fmt(format_args!("1.uptime {}s", uptime), 0, None, true)?;
    console.show_fmt(format_args!("2.round {}", round), 0, None, true)?;
    let row = console.cursor().current();
    console.show_fmt(format_args!("3.cursor y={}", row), 0, None, true)
}
