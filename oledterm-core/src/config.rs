//! Console configuration
//!
//! Settings are fixed at construction. Firmware builds them from
//! `display.toml` at compile time (see the `serde` feature).

use crate::cursor::DEFAULT_LINE_HEIGHT;
use crate::header::MAX_HEADER_LINES;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration errors detected when building a console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Surface has no columns
    ZeroWidth,
    /// Surface has no rows
    ZeroHeight,
    /// Line height of zero would never advance the cursor
    ZeroLineHeight,
    /// A single line does not fit on the surface
    LineTooTall { line_height: u32, height: u32 },
    /// More header lines requested than can be stored, or than fit
    /// above the row a scroll writes to
    TooManyHeaderLines { requested: usize, max: usize },
}

/// Text console configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConsoleConfig {
    /// Background is lit and text is drawn dark
    pub background_colored: bool,
    /// Number of leading lines kept at the top across scrolls (0 = none)
    ///
    /// The header slots must end above the lowest two line bands, which
    /// scrolling overwrites.
    pub header_capacity: usize,
    /// Text line height in pixels
    pub line_height: u32,
    /// Also clear the bottom band exposed by a scroll
    ///
    /// Off by default, which leaves the shifted-out pixels of the last
    /// band on screen until something is drawn over them.
    pub clear_vacated_rows: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ConsoleConfig {
    /// Dark background, no headers, 10 px lines
    pub const DEFAULT: Self = Self {
        background_colored: false,
        header_capacity: 0,
        line_height: DEFAULT_LINE_HEIGHT,
        clear_vacated_rows: false,
    };

    /// Configuration from the two user-facing settings
    pub const fn new(background_colored: bool, header_capacity: usize) -> Self {
        Self {
            background_colored,
            header_capacity,
            ..Self::DEFAULT
        }
    }

    /// Check the configuration against a surface size
    pub fn validate(&self, width: u32, height: u32) -> Result<(), ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if self.line_height == 0 {
            return Err(ConfigError::ZeroLineHeight);
        }
        if self.line_height >= height {
            return Err(ConfigError::LineTooTall {
                line_height: self.line_height,
                height,
            });
        }
        if self.header_capacity > MAX_HEADER_LINES {
            return Err(ConfigError::TooManyHeaderLines {
                requested: self.header_capacity,
                max: MAX_HEADER_LINES,
            });
        }
        let fitting = Self::max_headers(height, self.line_height);
        if self.header_capacity > fitting {
            return Err(ConfigError::TooManyHeaderLines {
                requested: self.header_capacity,
                max: fitting,
            });
        }
        Ok(())
    }

    /// Header lines that stay clear of the bottom two line bands
    fn max_headers(height: u32, line_height: u32) -> usize {
        (height.saturating_sub(line_height.saturating_mul(2)) / line_height) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid_for_128x64() {
        let config = ConsoleConfig::default();
        assert_eq!(config.line_height, 10);
        assert_eq!(config.header_capacity, 0);
        assert!(config.validate(128, 64).is_ok());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let config = ConsoleConfig::default();
        assert_eq!(config.validate(0, 64), Err(ConfigError::ZeroWidth));
        assert_eq!(config.validate(128, 0), Err(ConfigError::ZeroHeight));
    }

    #[test]
    fn test_line_height_must_fit() {
        let config = ConsoleConfig {
            line_height: 64,
            ..Default::default()
        };
        assert_eq!(
            config.validate(128, 64),
            Err(ConfigError::LineTooTall {
                line_height: 64,
                height: 64
            })
        );

        let config = ConsoleConfig {
            line_height: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(128, 64), Err(ConfigError::ZeroLineHeight));
    }

    #[test]
    fn test_header_capacity_bounded() {
        let config = ConsoleConfig::new(false, MAX_HEADER_LINES + 1);
        assert_eq!(
            config.validate(128, 64),
            Err(ConfigError::TooManyHeaderLines {
                requested: MAX_HEADER_LINES + 1,
                max: MAX_HEADER_LINES
            })
        );
    }

    #[test]
    fn test_headers_must_stay_above_scroll_rows() {
        // Slots 0..4 end at row 40; a scroll writes from row 44 down
        assert!(ConsoleConfig::new(true, 4).validate(128, 64).is_ok());
        assert_eq!(
            ConsoleConfig::new(false, 5).validate(128, 64),
            Err(ConfigError::TooManyHeaderLines {
                requested: 5,
                max: 4
            })
        );
        assert_eq!(
            ConsoleConfig::new(false, MAX_HEADER_LINES).validate(128, 64),
            Err(ConfigError::TooManyHeaderLines {
                requested: MAX_HEADER_LINES,
                max: 4
            })
        );

        assert!(ConsoleConfig::new(false, 1).validate(128, 32).is_ok());
        assert_eq!(
            ConsoleConfig::new(false, 2).validate(128, 32),
            Err(ConfigError::TooManyHeaderLines {
                requested: 2,
                max: 1
            })
        );
        // Two bands do not fit at all: no headers
        assert!(ConsoleConfig::new(false, 0).validate(128, 15).is_ok());
        assert!(ConsoleConfig::new(false, 1).validate(128, 15).is_err());
    }
}
