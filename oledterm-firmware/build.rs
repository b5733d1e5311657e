//! Build script for oledterm-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml at compile time
//! - Emits the validated settings as constants (`display_config.rs`)

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use oledterm_core::ConsoleConfig;
use serde::Deserialize;

/// Panel width; both supported sizes are 128 columns wide
const PANEL_WIDTH: u32 = 128;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DisplayFile {
    #[serde(default)]
    console: ConsoleConfig,
    i2c: I2cSection,
    spi: SpiSection,
    #[serde(default)]
    segment: SegmentSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct I2cSection {
    #[serde(default = "default_address")]
    address: u8,
    #[serde(default = "default_i2c_frequency")]
    frequency_hz: u32,
    #[serde(default = "default_height")]
    height: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SpiSection {
    #[serde(default = "default_spi_frequency")]
    frequency_hz: u32,
    #[serde(default = "default_height")]
    height: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SegmentSection {
    #[serde(default)]
    common_anode: bool,
}

fn default_address() -> u8 {
    0x3C
}

fn default_i2c_frequency() -> u32 {
    400_000
}

fn default_spi_frequency() -> u32 {
    500_000
}

fn default_height() -> u32 {
    64
}

fn main() {
    setup_linker();
    let config = validate_config();
    write_constants(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse and validate display.toml
fn validate_config() -> DisplayFile {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: display.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a display.toml configuration file.        ║\n\
            ║  Please create one in the oledterm-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read display.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: DisplayFile = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid display.toml                                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let errors = check_values(&config);
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid display configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=display.toml validated successfully");
    config
}

/// Range checks serde cannot express
fn check_values(config: &DisplayFile) -> Vec<String> {
    let mut errors = Vec::new();

    for (section, height) in [("i2c", config.i2c.height), ("spi", config.spi.height)] {
        if height != 32 && height != 64 {
            errors.push(format!("[{}] height must be 32 or 64", section));
            continue;
        }
        if let Err(e) = config.console.validate(PANEL_WIDTH, height) {
            errors.push(format!("[console] does not fit [{}]: {:?}", section, e));
        }
    }

    if !(0x08..=0x77).contains(&config.i2c.address) {
        errors.push("[i2c] address must be a 7-bit address (0x08-0x77)".to_string());
    }
    if config.i2c.frequency_hz == 0 || config.i2c.frequency_hz > 1_000_000 {
        errors.push("[i2c] frequency_hz must be 1-1000000".to_string());
    }
    if config.spi.frequency_hz == 0 || config.spi.frequency_hz > 10_000_000 {
        errors.push("[spi] frequency_hz must be 1-10000000".to_string());
    }

    errors
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn size_variant(height: u32) -> &'static str {
    if height == 32 {
        "DisplaySize::Display128x32"
    } else {
        "DisplaySize::Display128x64"
    }
}

/// Write the validated settings to `$OUT_DIR/display_config.rs`
fn write_constants(config: &DisplayFile) {
    let console = &config.console;
    let mut out = String::new();

    writeln!(out, "// Generated from display.toml").unwrap();
    writeln!(
        out,
        "pub const CONSOLE: ConsoleConfig = ConsoleConfig {{ \
         background_colored: {}, header_capacity: {}, line_height: {}, clear_vacated_rows: {} }};",
        console.background_colored,
        console.header_capacity,
        console.line_height,
        console.clear_vacated_rows
    )
    .unwrap();
    writeln!(out, "pub const I2C_ADDRESS: u8 = {:#04x};", config.i2c.address).unwrap();
    writeln!(out, "pub const I2C_FREQUENCY_HZ: u32 = {};", config.i2c.frequency_hz).unwrap();
    let size = size_variant(config.i2c.height);
    writeln!(out, "pub const I2C_SIZE: DisplaySize = {};", size).unwrap();
    writeln!(out, "pub const SPI_FREQUENCY_HZ: u32 = {};", config.spi.frequency_hz).unwrap();
    let size = size_variant(config.spi.height);
    writeln!(out, "pub const SPI_SIZE: DisplaySize = {};", size).unwrap();
    writeln!(
        out,
        "pub const SEGMENT_POLARITY: LedPolarity = LedPolarity::{};",
        if config.segment.common_anode {
            "CommonAnode"
        } else {
            "CommonCathode"
        }
    )
    .unwrap();

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("display_config.rs"), out).unwrap();
}
