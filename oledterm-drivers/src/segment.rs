//! Seven-segment LED driver
//!
//! Drives one GPIO per segment. Pins are ordered A..G; the polarity
//! decides which level lights a segment.

use embedded_hal::digital::{OutputPin, PinState};
use oledterm_core::digit::{
    digit_at, segments_for, DigitPosition, LedPolarity, Segment, SegmentSet,
};

/// Seven-segment errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SegmentError {
    /// Digit above 9
    InvalidDigit(u8),
    /// Number above 99
    InvalidNumber(u8),
    /// A segment pin could not be driven
    Pin,
}

/// Single seven-segment digit
pub struct SevenSegment<P> {
    pins: [P; 7],
    polarity: LedPolarity,
}

impl<P: OutputPin> SevenSegment<P> {
    /// Create a digit from pins ordered A..G
    pub fn new(pins: [P; 7], polarity: LedPolarity) -> Self {
        Self { pins, polarity }
    }

    /// Light the segments of `digit`
    pub fn show_digit(&mut self, digit: u8) -> Result<(), SegmentError> {
        let segments = segments_for(digit).ok_or(SegmentError::InvalidDigit(digit))?;
        self.apply(segments)
    }

    /// Turn every segment off
    pub fn clear(&mut self) -> Result<(), SegmentError> {
        self.apply(SegmentSet::EMPTY)
    }

    fn apply(&mut self, segments: SegmentSet) -> Result<(), SegmentError> {
        for segment in Segment::ALL {
            let level = self.polarity.pin_level(segments.contains(segment));
            self.pins[segment.index()]
                .set_state(PinState::from(level))
                .map_err(|_| SegmentError::Pin)?;
        }
        Ok(())
    }

    pub fn release(self) -> [P; 7] {
        self.pins
    }
}

/// Two digits showing `0..=99`
pub struct TwoDigitDisplay<P> {
    ones: SevenSegment<P>,
    tens: SevenSegment<P>,
}

impl<P: OutputPin> TwoDigitDisplay<P> {
    pub fn new(ones: SevenSegment<P>, tens: SevenSegment<P>) -> Self {
        Self { ones, tens }
    }

    /// Show a number; the tens digit stays dark below 10
    pub fn show_number(&mut self, number: u8) -> Result<(), SegmentError> {
        if number > 99 {
            return Err(SegmentError::InvalidNumber(number));
        }

        for position in [DigitPosition::Tens, DigitPosition::Ones] {
            let digit = self.digit_mut(position);
            match digit_at(number, position) {
                Some(value) => digit.show_digit(value)?,
                None => digit.clear()?,
            }
        }
        Ok(())
    }

    /// Digit at `position`
    pub fn digit_mut(&mut self, position: DigitPosition) -> &mut SevenSegment<P> {
        match position {
            DigitPosition::Ones => &mut self.ones,
            DigitPosition::Tens => &mut self.tens,
        }
    }

    /// Blank both digits
    pub fn clear(&mut self) -> Result<(), SegmentError> {
        self.tens.clear()?;
        self.ones.clear()
    }

    pub fn release(self) -> (SevenSegment<P>, SevenSegment<P>) {
        (self.ones, self.tens)
    }
}
