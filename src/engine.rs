//! Bit-banged SPI master
//!
//! One routine serves all four clock modes. The differences between them
//! reduce to three decisions taken from [`SpiMode`]:
//!
//! | CPHA | CS assertion                  | First data update        | After last bit  |
//! |------|-------------------------------|--------------------------|-----------------|
//! | 1    | own update, one half-period   | with the leading toggle  | nothing         |
//! | 0    | together with the first bit   | with CS                  | one more toggle |
//!
//! CPOL only sets the level the clock is parked at by [`SpiMaster::idle`];
//! the transaction itself works purely in toggles.
//!
//! Each bit period is: drive MOSI together with a line change, wait half a
//! period, sample MISO (reads, data phase only), toggle the clock, wait half a
//! period. Every line update is followed by exactly one half-period wait.

use crate::error::Error;
use crate::frame::{Command, Frame};
use crate::lines::PortWord;
use crate::mode::SpiMode;
use crate::port::{DrivePort, SensePort, TickWait};

/// Half-periods spent by one transaction in any mode.
///
/// CS release, CS assert (or CS + first bit), 32 clock half-periods split
/// according to CPHA, final CS release.
pub const HALF_PERIODS_PER_TRANSACTION: u32 = 35;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiMasterConfig {
    pub mode: SpiMode,
    /// Reference clock ticks waited after every line update.
    pub half_period_ticks: u32,
}

impl Default for SpiMasterConfig {
    fn default() -> Self {
        Self {
            mode: SpiMode::default(),
            half_period_ticks: 10,
        }
    }
}

impl SpiMasterConfig {
    /// Reference ticks from the opening CS release to the end of the closing one.
    pub const fn transaction_ticks(&self) -> u32 {
        HALF_PERIODS_PER_TRANSACTION * self.half_period_ticks
    }
}

pub struct SpiMaster<P, W> {
    port: P,
    wait: W,
    config: SpiMasterConfig,
}

impl<P, W> SpiMaster<P, W>
where
    P: DrivePort + SensePort,
    W: TickWait,
{
    /// Creates a new master. Lines are left untouched until [`idle`](Self::idle)
    /// or the first transaction.
    pub fn new(port: P, wait: W, config: SpiMasterConfig) -> Self {
        Self { port, wait, config }
    }

    pub fn config(&self) -> &SpiMasterConfig {
        &self.config
    }

    pub fn mode(&self) -> SpiMode {
        self.config.mode
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn release(self) -> (P, W) {
        (self.port, self.wait)
    }

    /// Parks the lines for the current mode: CS released, clock at its idle
    /// level, then one extra half-period to settle.
    pub async fn idle(&mut self) -> Result<(), Error<P::Error>> {
        let level = self.config.mode.idle_level();
        self.update(PortWord::deassert_cs).await?;
        self.update(|word| word.clock_set(level)).await?;
        self.half_period().await;
        Ok(())
    }

    /// Switches clock mode and re-parks the lines.
    ///
    /// The slave learns the mode out of band; program its control inputs
    /// before calling this.
    pub async fn set_mode(&mut self, mode: SpiMode) -> Result<(), Error<P::Error>> {
        debug!(
            "spi mode -> cpol={} cpha={}",
            mode.cpol(),
            mode.cpha()
        );
        self.config.mode = mode;
        self.idle().await
    }

    /// Writes `data` to register `address`. Only the low four address bits
    /// are sent.
    pub async fn write(&mut self, address: u8, data: u8) -> Result<(), Error<P::Error>> {
        self.shift(Frame::write(address, data)).await?;
        Ok(())
    }

    /// Reads register `address`. `dummy` fills MOSI during the data phase;
    /// its value does not matter to the slave.
    pub async fn read(&mut self, address: u8, dummy: u8) -> Result<u8, Error<P::Error>> {
        self.shift(Frame::read(address, dummy)).await
    }

    /// Runs one framed transaction.
    ///
    /// # Returns
    /// * `Some(byte)` - for reads, the sampled data byte
    /// * `None` - for writes
    pub async fn transfer(&mut self, frame: Frame) -> Result<Option<u8>, Error<P::Error>> {
        let rx = self.shift(frame).await?;
        Ok(match frame.command {
            Command::Read => Some(rx),
            Command::Write => None,
        })
    }

    async fn shift(&mut self, frame: Frame) -> Result<u8, Error<P::Error>> {
        let leading = self.config.mode.samples_on_leading_edge();
        let sample = frame.command == Command::Read;
        let mut rx = 0u8;

        self.update(PortWord::deassert_cs).await?;
        if !leading {
            self.update(PortWord::assert_cs).await?;
        }

        for (index, bit) in frame.iter().enumerate() {
            if index == 0 && leading {
                self.update(|word| word.assert_cs().drive_data(bit)).await?;
            } else {
                self.update(|word| word.clock_toggle().drive_data(bit)).await?;
            }

            if sample && Frame::is_data_period(index) {
                let miso = self.port.read_sense()?.data_in();
                rx = (rx << 1) | miso as u8;
            }

            self.update(PortWord::clock_toggle).await?;
        }

        // CPHA = 0 ends on a leading edge; bring the clock back to idle.
        if leading {
            self.update(PortWord::clock_toggle).await?;
        }

        self.update(PortWord::deassert_cs).await?;

        trace!(
            "spi {:?} addr={} data={:#x} rx={:#x}",
            frame.command,
            frame.address(),
            frame.data,
            rx
        );
        Ok(rx)
    }

    /// Read-modify-write of the drive word followed by one half-period.
    async fn update<F>(&mut self, f: F) -> Result<(), Error<P::Error>>
    where
        F: FnOnce(PortWord) -> PortWord,
    {
        let word = self.port.read_drive()?;
        self.port.write_drive(f(word))?;
        self.half_period().await;
        Ok(())
    }

    async fn half_period(&mut self) {
        self.wait.wait_ticks(self.config.half_period_ticks).await;
    }
}
