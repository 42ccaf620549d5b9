//! Line state helpers
//!
//! The SPI lines share one drive word with signals owned by other parts of
//! the system, so every helper here is a pure function of the word: it
//! returns the updated value and leaves writing it back to the caller.
//!
//! # Bit layout
//!
//! | Bit | Drive word | Sense word |
//! |-----|------------|------------|
//! | 3   | -          | MISO       |
//! | 4   | CS         | -          |
//! | 5   | CLK        | -          |
//! | 6   | MOSI       | -          |
//!
//! All other bits pass through untouched.

/// Chip-select bit in the drive word (active low at the slave).
pub const CS_BIT: u8 = 4;
/// Clock bit in the drive word.
pub const CLK_BIT: u8 = 5;
/// Data-out bit in the drive word.
pub const MOSI_BIT: u8 = 6;
/// Data-in bit in the sense word.
pub const MISO_BIT: u8 = 3;

#[inline]
pub const fn get_bit(value: u8, index: u8) -> bool {
    value & (1 << index) != 0
}

#[inline]
pub const fn set_bit(value: u8, index: u8) -> u8 {
    value | (1 << index)
}

#[inline]
pub const fn clear_bit(value: u8, index: u8) -> u8 {
    value & !(1 << index)
}

#[inline]
pub const fn toggle_bit(value: u8, index: u8) -> u8 {
    value ^ (1 << index)
}

/// Logic level of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    #[inline]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Snapshot of a port word with named accessors for the SPI lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortWord(u8);

impl PortWord {
    pub const fn new(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Drive CS low, selecting the slave.
    #[must_use]
    pub const fn assert_cs(self) -> Self {
        Self(clear_bit(self.0, CS_BIT))
    }

    /// Drive CS high, releasing the slave.
    #[must_use]
    pub const fn deassert_cs(self) -> Self {
        Self(set_bit(self.0, CS_BIT))
    }

    /// True while CS is driven low.
    pub const fn cs_asserted(self) -> bool {
        !get_bit(self.0, CS_BIT)
    }

    #[must_use]
    pub const fn clock_toggle(self) -> Self {
        Self(toggle_bit(self.0, CLK_BIT))
    }

    #[must_use]
    pub const fn clock_set(self, level: Level) -> Self {
        match level {
            Level::High => Self(set_bit(self.0, CLK_BIT)),
            Level::Low => Self(clear_bit(self.0, CLK_BIT)),
        }
    }

    pub const fn clock(self) -> Level {
        if get_bit(self.0, CLK_BIT) {
            Level::High
        } else {
            Level::Low
        }
    }

    #[must_use]
    pub const fn drive_data(self, bit: bool) -> Self {
        if bit {
            Self(set_bit(self.0, MOSI_BIT))
        } else {
            Self(clear_bit(self.0, MOSI_BIT))
        }
    }

    pub const fn data_out(self) -> bool {
        get_bit(self.0, MOSI_BIT)
    }

    /// MISO as seen in a sense word.
    pub const fn data_in(self) -> bool {
        get_bit(self.0, MISO_BIT)
    }
}

impl From<u8> for PortWord {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl From<PortWord> for u8 {
    fn from(word: PortWord) -> Self {
        word.0
    }
}
