//! SPI clock modes and the out-of-band control word

use crate::lines::Level;

/// Clock polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// CPOL = 0
    IdleLow,
    /// CPOL = 1
    IdleHigh,
}

/// Clock phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// CPHA = 0: data is valid before the first edge and captured on it.
    CaptureOnFirstTransition,
    /// CPHA = 1: data changes on the first edge and is captured on the second.
    CaptureOnSecondTransition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiMode {
    pub polarity: Polarity,
    pub phase: Phase,
}

/// CPOL = 0, CPHA = 0
pub const MODE_0: SpiMode = SpiMode {
    polarity: Polarity::IdleLow,
    phase: Phase::CaptureOnFirstTransition,
};

/// CPOL = 0, CPHA = 1
pub const MODE_1: SpiMode = SpiMode {
    polarity: Polarity::IdleLow,
    phase: Phase::CaptureOnSecondTransition,
};

/// CPOL = 1, CPHA = 0
pub const MODE_2: SpiMode = SpiMode {
    polarity: Polarity::IdleHigh,
    phase: Phase::CaptureOnFirstTransition,
};

/// CPOL = 1, CPHA = 1
pub const MODE_3: SpiMode = SpiMode {
    polarity: Polarity::IdleHigh,
    phase: Phase::CaptureOnSecondTransition,
};

/// Control-word bit carrying CPOL.
pub const CPOL_BIT: u8 = 0;
/// Control-word bit carrying CPHA.
pub const CPHA_BIT: u8 = 1;
/// Control-word bit selecting which peripheral listens on the shared lines.
pub const PERIPHERAL_SELECT_BIT: u8 = 7;

impl SpiMode {
    /// Build a mode from raw CPOL/CPHA bits; only bit 0 of each is used.
    pub const fn from_bits(cpol: u8, cpha: u8) -> Self {
        Self {
            polarity: if cpol & 1 == 0 {
                Polarity::IdleLow
            } else {
                Polarity::IdleHigh
            },
            phase: if cpha & 1 == 0 {
                Phase::CaptureOnFirstTransition
            } else {
                Phase::CaptureOnSecondTransition
            },
        }
    }

    pub const fn cpol(self) -> u8 {
        match self.polarity {
            Polarity::IdleLow => 0,
            Polarity::IdleHigh => 1,
        }
    }

    pub const fn cpha(self) -> u8 {
        match self.phase {
            Phase::CaptureOnFirstTransition => 0,
            Phase::CaptureOnSecondTransition => 1,
        }
    }

    /// Level the clock rests at between transactions.
    pub const fn idle_level(self) -> Level {
        match self.polarity {
            Polarity::IdleLow => Level::Low,
            Polarity::IdleHigh => Level::High,
        }
    }

    /// CPHA = 0 presents the first bit with CS and needs a closing toggle.
    pub const fn samples_on_leading_edge(self) -> bool {
        matches!(self.phase, Phase::CaptureOnFirstTransition)
    }

    /// `(CPHA << 1) | CPOL`, as the slave expects it on its control inputs.
    pub const fn control_bits(self) -> u8 {
        (self.cpha() << CPHA_BIT) | (self.cpol() << CPOL_BIT)
    }

    /// Full control word: mode bits plus peripheral select.
    pub const fn control_word(self, peripheral: Peripheral) -> u8 {
        self.control_bits() | (peripheral.select_bit() << PERIPHERAL_SELECT_BIT)
    }
}

impl Default for SpiMode {
    fn default() -> Self {
        MODE_1
    }
}

/// Peripheral sharing the serial lines behind the control word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Peripheral {
    #[default]
    Spi,
    I2c,
}

impl Peripheral {
    const fn select_bit(self) -> u8 {
        match self {
            Peripheral::Spi => 0,
            Peripheral::I2c => 1,
        }
    }
}
