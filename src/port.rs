//! Boundary between the engine and the lines it drives
//!
//! The engine never caches a port word: each transition reads the current
//! drive word, changes the SPI bits, and writes the whole word back.

use core::fmt::Debug;

use crate::lines::PortWord;

/// Error type shared by the drive and sense sides of a port.
pub trait ErrorType {
    type Error: Debug;
}

/// Write access to the word holding CS, CLK and MOSI.
pub trait DrivePort: ErrorType {
    /// Current state of the whole drive word, unrelated bits included.
    fn read_drive(&mut self) -> Result<PortWord, Self::Error>;

    fn write_drive(&mut self, word: PortWord) -> Result<(), Self::Error>;
}

/// Read access to the word carrying MISO.
pub trait SensePort: ErrorType {
    fn read_sense(&mut self) -> Result<PortWord, Self::Error>;
}

/// Half-bit-period delay source.
///
/// A tick is one period of whatever reference clock the implementation is
/// tied to: a simulator's cycle counter or a hardware timer.
#[allow(async_fn_in_trait)]
pub trait TickWait {
    async fn wait_ticks(&mut self, ticks: u32);
}

impl<T: ErrorType + ?Sized> ErrorType for &mut T {
    type Error = T::Error;
}

impl<T: DrivePort + ?Sized> DrivePort for &mut T {
    fn read_drive(&mut self) -> Result<PortWord, Self::Error> {
        (**self).read_drive()
    }

    fn write_drive(&mut self, word: PortWord) -> Result<(), Self::Error> {
        (**self).write_drive(word)
    }
}

impl<T: SensePort + ?Sized> SensePort for &mut T {
    fn read_sense(&mut self) -> Result<PortWord, Self::Error> {
        (**self).read_sense()
    }
}

impl<T: TickWait + ?Sized> TickWait for &mut T {
    async fn wait_ticks(&mut self, ticks: u32) {
        (**self).wait_ticks(ticks).await
    }
}
