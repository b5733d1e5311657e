//! Write cursor

/// Default text line height in pixels
pub const DEFAULT_LINE_HEIGHT: u32 = 10;

/// Vertical write position of a text console
///
/// Holds the pixel row where the next line is drawn when the caller
/// does not give one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    y: i32,
    line_height: u32,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_HEIGHT)
    }
}

impl Cursor {
    /// Create a cursor at the top of the screen
    pub const fn new(line_height: u32) -> Self {
        Self { y: 0, line_height }
    }

    /// Row of the next write
    pub const fn current(&self) -> i32 {
        self.y
    }

    /// Height of one text line
    pub const fn line_height(&self) -> u32 {
        self.line_height
    }

    /// Move below a line drawn at `new_y`
    pub fn advance_to(&mut self, new_y: i32) {
        self.y = new_y.max(0) + self.line_height as i32;
    }

    /// Move back to the top
    pub fn reset(&mut self) {
        self.y = 0;
    }
}
