//! Pixel driver trait for monochrome displays

use crate::color::PixelValue;

/// Pixel-level display driver
///
/// Provides the drawing primitives a [`TextConsole`](crate::TextConsole)
/// needs. Implementations handle the specifics of the display controller
/// and bus. Coordinates outside the surface are clipped by the driver.
pub trait PixelDriver {
    /// Error type for driver operations
    type Error;

    /// Fill a rectangle with a single value
    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        value: PixelValue,
    ) -> Result<(), Self::Error>;

    /// Rasterize text with its top-left corner at `(x, y)`
    ///
    /// Only glyph pixels are written; the background is left untouched.
    fn text(&mut self, text: &str, x: i32, y: i32, value: PixelValue) -> Result<(), Self::Error>;

    /// Shift the surface content by `(dx, dy)` pixels
    ///
    /// Negative `dy` moves content up. Pixels in the vacated band keep
    /// their previous values.
    fn scroll(&mut self, dx: i32, dy: i32) -> Result<(), Self::Error>;

    /// Flush pending drawing to the physical display
    fn show(&mut self) -> Result<(), Self::Error>;

    /// Surface size in pixels as (width, height)
    fn dimensions(&self) -> (u32, u32);
}
