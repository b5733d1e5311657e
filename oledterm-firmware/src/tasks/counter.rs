//! Two-digit seven-segment counter
//!
//! Counts seconds from 0 to 99 and wraps.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Ticker};
use oledterm_drivers::TwoDigitDisplay;

/// Counter update interval
const COUNT_INTERVAL_MS: u64 = 1000;

#[embassy_executor::task]
pub async fn counter_task(mut display: TwoDigitDisplay<Output<'static>>) {
    info!("Counter task started");

    let mut ticker = Ticker::every(Duration::from_millis(COUNT_INTERVAL_MS));
    let mut value: u8 = 0;

    loop {
        if let Err(e) = display.show_number(value) {
            warn!("Counter update failed: {}", e);
        }
        value = (value + 1) % 100;
        ticker.next().await;
    }
}
