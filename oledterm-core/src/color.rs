//! Text and fill polarity for 1-bit displays

/// Value of a single monochrome pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelValue {
    /// Pixel dark (bit 0)
    #[default]
    Off,
    /// Pixel lit (bit 1)
    On,
}

impl PixelValue {
    /// Create from a raw bit
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Self::On
        } else {
            Self::Off
        }
    }

    /// Raw bit value (0 or 1)
    pub const fn bit(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }

    /// Check if the pixel is lit
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// The opposite value
    pub const fn inverted(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }
}

/// Text and background pixel values
///
/// The two values are always complementary. With a colored (lit)
/// background, text is drawn dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorPolicy {
    text: PixelValue,
    fill: PixelValue,
}

impl ColorPolicy {
    /// Derive the policy from the background flag
    pub const fn derive(background_is_colored: bool) -> Self {
        let text = PixelValue::from_bit(!background_is_colored);
        Self {
            text,
            fill: text.inverted(),
        }
    }

    /// Value used to draw glyphs
    pub const fn text(&self) -> PixelValue {
        self.text
    }

    /// Value used to clear lines and the screen
    pub const fn fill(&self) -> PixelValue {
        self.fill
    }
}

impl Default for ColorPolicy {
    fn default() -> Self {
        Self::derive(false)
    }
}
