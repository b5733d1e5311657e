//! Scrolling text console
//!
//! [`TextConsole`] writes one line of text per call below the previous
//! one. When a line would not fit above the bottom band it either scrolls
//! the screen up by one line or wipes it, depending on the caller.
//!
//! # Scrolling
//!
//! A scroll shifts the whole surface up by one line height, then redraws
//! the retained header lines at their fixed slots (`slot * line_height`)
//! so status text stays on top, and finally clears the target row before
//! the new line is drawn.
//!
//! ```ignore
//! let mut console = TextConsole::new(driver, false, 1)?;
//! console.write_line("-Status-")?; // retained header
//! for i in 0..20 {
//!     console.show_fmt(format_args!("tick {}", i), 0, None, true)?;
//! }
//! ```

use core::fmt;

use heapless::String;

use crate::color::{ColorPolicy, PixelValue};
use crate::config::{ConfigError, ConsoleConfig};
use crate::cursor::Cursor;
use crate::header::HeaderRegistry;
use crate::traits::PixelDriver;

/// Maximum length of a line formatted by [`TextConsole::show_fmt`]
pub const MAX_RENDER_LEN: usize = 64;

/// Where a requested row lands relative to the bottom band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Placement {
    /// Row is above the bottom band; draw directly
    Fits,
    /// Row overflows; scroll up one line and replay headers
    Scroll,
    /// Row overflows and scrolling is off; wipe and start at the top
    Reset,
}

/// Pixel driver together with its fixed dimensions
#[derive(Debug)]
struct DisplaySurface<D> {
    driver: D,
    width: u32,
    height: u32,
}

impl<D: PixelDriver> DisplaySurface<D> {
    /// Fill a full-width band of `height` rows starting at `(x, y)`
    fn fill_band(
        &mut self,
        x: i32,
        y: i32,
        height: u32,
        value: PixelValue,
    ) -> Result<(), D::Error> {
        self.driver.fill_rect(x, y, self.width, height, value)
    }
}

/// Line-oriented text console over a pixel driver
pub struct TextConsole<D> {
    surface: DisplaySurface<D>,
    colors: ColorPolicy,
    cursor: Cursor,
    headers: HeaderRegistry,
    clear_vacated_rows: bool,
}

impl<D: PixelDriver> TextConsole<D> {
    /// Create a console with the default line height
    pub fn new(
        driver: D,
        background_is_colored: bool,
        header_capacity: usize,
    ) -> Result<Self, ConfigError> {
        Self::with_config(driver, &ConsoleConfig::new(background_is_colored, header_capacity))
    }

    /// Create a console from a full configuration
    pub fn with_config(driver: D, config: &ConsoleConfig) -> Result<Self, ConfigError> {
        let (width, height) = driver.dimensions();
        config.validate(width, height)?;

        Ok(Self {
            surface: DisplaySurface {
                driver,
                width,
                height,
            },
            colors: ColorPolicy::derive(config.background_colored),
            cursor: Cursor::new(config.line_height),
            headers: HeaderRegistry::new(config.header_capacity),
            clear_vacated_rows: config.clear_vacated_rows,
        })
    }

    /// Fill the whole surface with the background and move to the top
    ///
    /// Headers are not redrawn. Nothing is flushed until the next
    /// [`show_text`](Self::show_text) or [`flush`](Self::flush).
    pub fn clear(&mut self) -> Result<(), D::Error> {
        let (width, height) = (self.surface.width, self.surface.height);
        self.surface
            .driver
            .fill_rect(0, 0, width, height, self.colors.fill())?;
        self.cursor.reset();
        Ok(())
    }

    /// Clear one line-height band starting at `(x, y)`
    pub fn clear_line(&mut self, x: i32, y: i32) -> Result<(), D::Error> {
        let fill = self.colors.fill();
        self.surface
            .fill_band(x, y, self.cursor.line_height(), fill)
    }

    /// Draw a line of text
    ///
    /// - `x`: column offset in pixels
    /// - `y`: row in pixels, or `None` to write at the cursor
    /// - `scroll`: on overflow, scroll (`true`) or wipe the screen (`false`)
    ///
    /// The first calls fill the header registry with `text` as given.
    /// Driver errors are returned unchanged; the cursor only moves once
    /// the line has been flushed.
    pub fn show_text(
        &mut self,
        text: &str,
        x: i32,
        y: Option<i32>,
        scroll: bool,
    ) -> Result<(), D::Error> {
        self.headers.try_retain(text);

        let requested = y.unwrap_or_else(|| self.cursor.current()).max(0);
        let row = match self.placement(requested, scroll) {
            Placement::Fits => requested,
            Placement::Scroll => self.scroll_up(requested)?,
            Placement::Reset => {
                #[cfg(feature = "defmt")]
                defmt::trace!("console reset at row {}", requested);
                self.clear()?;
                0
            }
        };

        let value = self.colors.text();
        self.surface.driver.text(text, x, row, value)?;
        self.surface.driver.show()?;

        self.cursor.advance_to(row);
        Ok(())
    }

    /// Write `text` at the cursor, scrolling on overflow
    pub fn write_line(&mut self, text: &str) -> Result<(), D::Error> {
        self.show_text(text, 0, None, true)
    }

    /// Format and draw a line
    ///
    /// Output longer than [`MAX_RENDER_LEN`] bytes is cut off.
    pub fn show_fmt(
        &mut self,
        args: fmt::Arguments<'_>,
        x: i32,
        y: Option<i32>,
        scroll: bool,
    ) -> Result<(), D::Error> {
        let mut line = LineBuffer::default();
        // Err only signals truncation; keep what fit
        let _ = fmt::write(&mut line, args);
        self.show_text(line.0.as_str(), x, y, scroll)
    }

    /// Flush pending drawing to the display
    pub fn flush(&mut self) -> Result<(), D::Error> {
        self.surface.driver.show()
    }

    /// Classify a requested row
    pub fn placement(&self, y: i32, scroll: bool) -> Placement {
        if y < self.overflow_row() {
            Placement::Fits
        } else if scroll {
            Placement::Scroll
        } else {
            Placement::Reset
        }
    }

    /// Scroll up one line and replay headers; returns the new target row
    fn scroll_up(&mut self, requested: i32) -> Result<i32, D::Error> {
        let line_height = self.cursor.line_height();
        let step = line_height as i32;
        let fill = self.colors.fill();
        let text = self.colors.text();

        self.surface.driver.scroll(0, -step)?;

        if self.clear_vacated_rows {
            let band = self.overflow_row();
            self.surface.fill_band(0, band, line_height, fill)?;
        }

        for (slot, line) in self.headers.iter() {
            let slot_row = slot as i32 * step;
            self.surface.fill_band(0, slot_row, line_height, fill)?;
            self.surface.driver.text(line, 0, slot_row, text)?;
        }

        // Keep the new line and the cursor below it on screen
        let row = (requested - step).clamp(0, self.last_row());

        // The scroll leaves fragments of the old content in the target row
        self.surface.fill_band(0, row, line_height, fill)?;

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "console scrolled, row {} -> {}, {} headers",
            requested,
            row,
            self.headers.len()
        );

        Ok(row)
    }

    /// First row that no longer fits a line
    fn overflow_row(&self) -> i32 {
        (self.surface.height - self.cursor.line_height()) as i32
    }

    /// Lowest row a line may start on after a scroll
    fn last_row(&self) -> i32 {
        self.overflow_row() - 1
    }

    /// Current cursor
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Retained header lines
    pub fn headers(&self) -> &HeaderRegistry {
        &self.headers
    }

    /// Text and fill values
    pub fn colors(&self) -> ColorPolicy {
        self.colors
    }

    /// Surface width in pixels
    pub fn width(&self) -> u32 {
        self.surface.width
    }

    /// Surface height in pixels
    pub fn height(&self) -> u32 {
        self.surface.height
    }

    /// Text line height in pixels
    pub fn line_height(&self) -> u32 {
        self.cursor.line_height()
    }

    /// Get access to the underlying driver
    pub fn driver(&self) -> &D {
        &self.surface.driver
    }

    /// Get mutable access to the underlying driver
    ///
    /// Drawing through the driver does not move the cursor.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.surface.driver
    }

    /// Consume the console and return the driver
    pub fn release(self) -> D {
        self.surface.driver
    }
}

/// Bounded line buffer that keeps as many characters as fit
#[derive(Default)]
struct LineBuffer(String<MAX_RENDER_LEN>);

impl fmt::Write for LineBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            self.0.push(ch).map_err(|_| fmt::Error)?;
        }
        Ok(())
    }
}
