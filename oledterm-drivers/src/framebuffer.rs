//! 1-bit framebuffer
//!
//! Pixels are stored in SSD1306 page layout: each byte covers eight
//! vertical pixels of one column, least significant bit on top. A page
//! can be sent to the controller as-is.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

/// Columns per page
pub const WIDTH: usize = 128;

/// Maximum number of 8-pixel pages
pub const MAX_PAGES: usize = 8;

/// Supported panel sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplaySize {
    /// 128x64 pixels
    #[default]
    Display128x64,
    /// 128x32 pixels
    Display128x32,
}

impl DisplaySize {
    /// Width in pixels
    pub const fn width(self) -> u32 {
        WIDTH as u32
    }

    /// Height in pixels
    pub const fn height(self) -> u32 {
        match self {
            Self::Display128x64 => 64,
            Self::Display128x32 => 32,
        }
    }

    /// Number of 8-pixel pages
    pub const fn pages(self) -> usize {
        self.height() as usize / 8
    }

    /// COM pins hardware configuration byte
    pub const fn com_pins(self) -> u8 {
        match self {
            Self::Display128x64 => 0x12,
            Self::Display128x32 => 0x02,
        }
    }
}

/// Monochrome framebuffer
#[derive(Clone)]
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; MAX_PAGES],
    size: DisplaySize,
}

impl FrameBuffer {
    /// Create a dark framebuffer
    pub const fn new(size: DisplaySize) -> Self {
        Self {
            pages: [[0; WIDTH]; MAX_PAGES],
            size,
        }
    }

    /// Panel size
    pub fn size(&self) -> DisplaySize {
        self.size
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.size.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.size.height()
    }

    /// Raw bytes of one page
    pub fn page(&self, index: usize) -> Option<&[u8; WIDTH]> {
        if index < self.size.pages() {
            self.pages.get(index)
        } else {
            None
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    /// Read a pixel; outside the surface reads as off
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        self.pages[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// Write a pixel; writes outside the surface are dropped
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if !self.contains(x, y) {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let mask = 1 << (y % 8);
        if on {
            self.pages[y / 8][x] |= mask;
        } else {
            self.pages[y / 8][x] &= !mask;
        }
    }

    /// Set every pixel
    pub fn fill(&mut self, on: bool) {
        let byte = if on { 0xFF } else { 0x00 };
        for page in self.pages.iter_mut() {
            page.fill(byte);
        }
    }

    /// Fill a rectangle, clipped to the surface
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, on: bool) {
        let x_start = x.max(0);
        let y_start = y.max(0);
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(height).unwrap_or(i32::MAX);
        let x_end = x.saturating_add(width).min(self.width() as i32);
        let y_end = y.saturating_add(height).min(self.height() as i32);

        for py in y_start..y_end {
            for px in x_start..x_end {
                self.set_pixel(px, py, on);
            }
        }
    }

    /// Draw text in the 6x10 font with its top-left corner at `(x, y)`
    ///
    /// Only glyph pixels are written.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, on: bool) {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::from(on));
        // Infallible target
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(self);
    }

    /// Shift the content by `(dx, dy)` pixels
    ///
    /// Pixels in the band uncovered by the shift keep their old values.
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        let width = self.width() as i32;
        let height = self.height() as i32;

        // Walk away from the destination so sources are read before overwritten
        let (x_start, x_end, x_step) = if dx < 0 {
            (0, width + dx, 1)
        } else {
            (width - 1, dx - 1, -1)
        };
        let (y_start, y_end, y_step) = if dy < 0 {
            (0, height + dy, 1)
        } else {
            (height - 1, dy - 1, -1)
        };

        if x_step > 0 && x_end <= 0 || x_step < 0 && x_end >= x_start {
            return;
        }
        if y_step > 0 && y_end <= 0 || y_step < 0 && y_end >= y_start {
            return;
        }

        let mut y = y_start;
        while y != y_end {
            let mut x = x_start;
            while x != x_end {
                let on = self.pixel(x - dx, y - dy);
                self.set_pixel(x, y, on);
                x += x_step;
            }
            y += y_step;
        }
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lit_in(fb: &FrameBuffer, x: i32, y: i32, w: i32, h: i32) -> usize {
        (y..y + h)
            .flat_map(|py| (x..x + w).map(move |px| (px, py)))
            .filter(|&(px, py)| fb.pixel(px, py))
            .count()
    }

    #[test]
    fn test_page_layout() {
        let mut fb = FrameBuffer::new(DisplaySize::Display128x64);
        fb.set_pixel(3, 9, true);
        assert_eq!(fb.page(1).unwrap()[3], 0b0000_0010);
        assert!(fb.pixel(3, 9));

        fb.set_pixel(3, 9, false);
        assert_eq!(fb.page(1).unwrap()[3], 0);
    }

    #[test]
    fn test_size_limits_pages() {
        let fb = FrameBuffer::new(DisplaySize::Display128x32);
        assert_eq!(fb.height(), 32);
        assert!(fb.page(3).is_some());
        assert!(fb.page(4).is_none());
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut fb = FrameBuffer::new(DisplaySize::Display128x64);
        fb.fill_rect(120, 60, 128, 10, true);
        assert_eq!(lit_in(&fb, 0, 0, 128, 64), 8 * 4);

        fb.fill_rect(-10, -10, 20, 20, true);
        assert_eq!(lit_in(&fb, 0, 0, 10, 10), 100);
    }

    #[test]
    fn test_fill_rect_huge_size_covers_panel() {
        let mut fb = FrameBuffer::new(DisplaySize::Display128x64);
        fb.fill_rect(0, 0, u32::MAX, 64, true);
        assert_eq!(lit_in(&fb, 0, 0, 128, 64), 128 * 64);

        fb.fill(false);
        fb.fill_rect(-5, 10, u32::MAX, u32::MAX, true);
        assert_eq!(lit_in(&fb, 0, 0, 128, 64), 128 * 54);
    }

    #[test]
    fn test_text_only_writes_glyph_pixels() {
        let mut fb = FrameBuffer::new(DisplaySize::Display128x64);
        fb.draw_text("Hi", 0, 0, true);

        let lit = lit_in(&fb, 0, 0, 12, 10);
        assert!(lit > 0);
        assert!(lit < 12 * 10);
        assert_eq!(lit_in(&fb, 0, 10, 128, 54), 0);
        assert_eq!(lit_in(&fb, 12, 0, 116, 10), 0);
    }

    #[test]
    fn test_scroll_up_keeps_vacated_band() {
        let mut fb = FrameBuffer::new(DisplaySize::Display128x64);
        fb.fill_rect(0, 20, 128, 1, true);
        fb.fill_rect(0, 63, 128, 1, true);

        fb.scroll(0, -10);

        assert_eq!(lit_in(&fb, 0, 10, 128, 1), 128);
        assert_eq!(lit_in(&fb, 0, 20, 128, 1), 0);
        assert_eq!(lit_in(&fb, 0, 53, 128, 1), 128);
        // Row 63 was not overwritten by the shift
        assert_eq!(lit_in(&fb, 0, 63, 128, 1), 128);
    }

    #[test]
    fn test_scroll_right_and_down() {
        let mut fb = FrameBuffer::new(DisplaySize::Display128x64);
        fb.set_pixel(0, 0, true);
        fb.scroll(5, 3);
        assert!(fb.pixel(5, 3));
        // Source stays lit: it lies in the vacated band
        assert!(fb.pixel(0, 0));
    }

    #[test]
    fn test_scroll_past_edge_is_noop() {
        let mut fb = FrameBuffer::new(DisplaySize::Display128x64);
        fb.set_pixel(1, 1, true);
        fb.scroll(0, -64);
        fb.scroll(200, 0);
        assert!(fb.pixel(1, 1));
        assert_eq!(lit_in(&fb, 0, 0, 128, 64), 1);
    }

    proptest! {
        #[test]
        fn prop_fill_rect_never_panics(
            x in -200i32..200,
            y in -200i32..200,
            w in 0u32..300,
            h in 0u32..300,
        ) {
            let mut fb = FrameBuffer::new(DisplaySize::Display128x32);
            fb.fill_rect(x, y, w, h, true);
            let expected_w = (x + w as i32).min(128).max(0) - x.max(0).min(128);
            let expected_h = (y + h as i32).min(32).max(0) - y.max(0).min(32);
            let expected = (expected_w.max(0) * expected_h.max(0)) as usize;
            prop_assert_eq!(lit_in(&fb, 0, 0, 128, 32), expected);
        }
    }
}
