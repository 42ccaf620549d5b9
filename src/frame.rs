//! Transaction framing
//!
//! Every transaction is sixteen clock periods, MSB first:
//!
//! ```text
//!  15   14..12   11..8     7..0
//! +---+--------+---------+--------+
//! |cmd|  000   | address |  data  |
//! +---+--------+---------+--------+
//! ```
//!
//! The command bit is 1 for a write and 0 for a read. That polarity is
//! particular to the peripheral on the other end; check a different slave's
//! datasheet before reusing it.

/// Clock periods in one transaction.
pub const FRAME_BITS: usize = 16;
/// Clock periods carrying the data byte.
pub const DATA_BITS: usize = 8;
/// Mask applied to register addresses.
pub const ADDRESS_MASK: u8 = 0x0F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Write,
    Read,
}

impl Command {
    pub const fn bit(self) -> bool {
        matches!(self, Command::Write)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub command: Command,
    address: u8,
    pub data: u8,
}

impl Frame {
    /// Address bits above the low nibble are dropped.
    pub const fn new(command: Command, address: u8, data: u8) -> Self {
        Self {
            command,
            address: address & ADDRESS_MASK,
            data,
        }
    }

    pub const fn write(address: u8, data: u8) -> Self {
        Self::new(Command::Write, address, data)
    }

    /// `dummy` is shifted out during the data phase and otherwise ignored.
    pub const fn read(address: u8, dummy: u8) -> Self {
        Self::new(Command::Read, address, dummy)
    }

    pub const fn address(&self) -> u8 {
        self.address
    }

    /// The sixteen bits in transmission order, packed MSB first.
    pub const fn bits(&self) -> u16 {
        ((self.command.bit() as u16) << 15) | ((self.address as u16) << 8) | self.data as u16
    }

    /// Bit driven during period `index` (0 = first on the wire).
    pub const fn bit(&self, index: usize) -> bool {
        (self.bits() >> (FRAME_BITS - 1 - index)) & 1 == 1
    }

    /// True for the periods where a read samples MISO.
    pub const fn is_data_period(index: usize) -> bool {
        index >= FRAME_BITS - DATA_BITS && index < FRAME_BITS
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..FRAME_BITS).map(move |index| self.bit(index))
    }
}
