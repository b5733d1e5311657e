//! Display settings compiled in from display.toml
//!
//! `build.rs` validates the file and generates the constants below; a bad
//! value fails the build instead of the boot.

use oledterm_core::digit::LedPolarity;
use oledterm_core::ConsoleConfig;
use oledterm_drivers::DisplaySize;

include!(concat!(env!("OUT_DIR"), "/display_config.rs"));

/// Header lines written once at boot on every console
pub const HEADER: [&str; 3] = ["-Status Console-", "Updating in 5sec", ""];

/// Seconds between status rounds
pub const STATUS_INTERVAL_S: u64 = 5;
