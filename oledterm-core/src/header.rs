//! Header lines retained across scrolls
//!
//! The first `capacity` lines written to a console are kept here and
//! redrawn at the top of the screen after every scroll.

use heapless::{String, Vec};

/// Maximum number of header lines a console can retain
pub const MAX_HEADER_LINES: usize = 6;

/// Maximum stored length of a header line in bytes
pub const MAX_LINE_LEN: usize = 32;

/// A retained header line
pub type HeaderLine = String<MAX_LINE_LEN>;

/// Append-only, capacity-bounded list of header lines
#[derive(Debug, Clone, Default)]
pub struct HeaderRegistry {
    lines: Vec<HeaderLine, MAX_HEADER_LINES>,
    capacity: usize,
}

impl HeaderRegistry {
    /// Create a registry holding up to `capacity` lines
    ///
    /// Capacity is limited to [`MAX_HEADER_LINES`]; zero disables retention.
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Vec::new(),
            capacity: capacity.min(MAX_HEADER_LINES),
        }
    }

    /// Retain `line` if there is room left
    ///
    /// Returns whether the line was stored. Lines longer than
    /// [`MAX_LINE_LEN`] are truncated on a character boundary.
    pub fn try_retain(&mut self, line: &str) -> bool {
        if !self.has_capacity() {
            return false;
        }

        let mut stored = HeaderLine::new();
        // Cannot fail: the slice is cut to MAX_LINE_LEN
        let _ = stored.push_str(truncate(line, MAX_LINE_LEN));
        self.lines.push(stored).is_ok()
    }

    /// Retained lines paired with their slot index, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.lines.iter().map(|line| line.as_str()).enumerate()
    }

    /// Get a retained line by slot
    pub fn get(&self, slot: usize) -> Option<&str> {
        self.lines.get(slot).map(|line| line.as_str())
    }

    /// Number of retained lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if nothing has been retained
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check if the registry stopped accepting lines
    pub fn is_full(&self) -> bool {
        self.lines.len() >= self.capacity
    }

    /// Check if another line would be retained
    pub fn has_capacity(&self) -> bool {
        !self.is_full()
    }
}

/// Cut `text` to at most `max` bytes without splitting a character
fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
