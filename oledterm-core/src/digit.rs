//! Seven-segment digit encoding
//!
//! ```text
//!         A
//!     o--------o
//!     |        | B
//!   F |   G    |
//!     o--------o
//!     |        | C
//!   E |        |
//!     o--------o
//!         D
//! ```

/// A single LED segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Segment {
    /// All segments in pin order
    pub const ALL: [Segment; 7] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G,
    ];

    /// Index into a pin array ordered A..G
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of lit segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentSet(u8);

impl SegmentSet {
    /// No segment lit
    pub const EMPTY: Self = Self(0);

    /// Every segment lit (shows an 8)
    pub const FULL: Self = Self(0x7F);

    /// Build a set from a list of segments
    pub const fn from_segments(segments: &[Segment]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < segments.len() {
            bits |= segments[i].mask();
            i += 1;
        }
        Self(bits)
    }

    /// Check if a segment is lit
    pub const fn contains(&self, segment: Segment) -> bool {
        self.0 & segment.mask() != 0
    }

    /// Raw bitmask, bit 0 = A
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Number of lit segments
    pub const fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Lit segments in A..G order
    pub fn iter(&self) -> impl Iterator<Item = Segment> + '_ {
        Segment::ALL.into_iter().filter(|s| self.contains(*s))
    }
}

use Segment::{A, B, C, D, E, F, G};

const DIGITS: [SegmentSet; 10] = [
    SegmentSet::from_segments(&[A, B, C, D, E, F]),
    SegmentSet::from_segments(&[B, C]),
    SegmentSet::from_segments(&[A, B, D, E, G]),
    SegmentSet::from_segments(&[A, B, C, D, G]),
    SegmentSet::from_segments(&[B, C, F, G]),
    SegmentSet::from_segments(&[A, C, D, F, G]),
    SegmentSet::from_segments(&[A, C, D, E, F, G]),
    SegmentSet::from_segments(&[A, B, C]),
    SegmentSet::from_segments(&[A, B, C, D, E, F, G]),
    SegmentSet::from_segments(&[A, B, C, D, F, G]),
];

/// Segments to light for a decimal digit, `None` above 9
pub const fn segments_for(digit: u8) -> Option<SegmentSet> {
    if digit < 10 {
        Some(DIGITS[digit as usize])
    } else {
        None
    }
}

/// Position of a digit in a two-digit display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitPosition {
    Ones,
    Tens,
}

/// LED wiring polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedPolarity {
    /// Shared cathode, segments are active-high
    #[default]
    CommonCathode,
    /// Shared anode, segments are active-low
    CommonAnode,
}

impl LedPolarity {
    /// Pin level (true = high) that puts a segment in the `lit` state
    pub const fn pin_level(self, lit: bool) -> bool {
        match self {
            Self::CommonCathode => lit,
            Self::CommonAnode => !lit,
        }
    }
}

/// Split `0..=99` into (tens, ones)
///
/// The tens digit is `None` for single-digit numbers so it stays dark.
pub const fn split_number(number: u8) -> Option<(Option<u8>, u8)> {
    if number > 99 {
        return None;
    }
    let tens = if number > 9 { Some(number / 10) } else { None };
    Some((tens, number % 10))
}

/// Digit shown at `position` for `number`, if any
pub const fn digit_at(number: u8, position: DigitPosition) -> Option<u8> {
    match split_number(number) {
        Some((tens, ones)) => match position {
            DigitPosition::Ones => Some(ones),
            DigitPosition::Tens => tens,
        },
        None => None,
    }
}
