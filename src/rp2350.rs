//! RP2350 binding: GPIO-backed ports and an embassy-time tick source

use core::convert::Infallible;

use embassy_rp::gpio::{Input, Level, Output};
use embassy_time::{Duration, Timer};

use crate::lines::{get_bit, PortWord, CLK_BIT, CS_BIT, MISO_BIT, MOSI_BIT};
use crate::mode::{CPHA_BIT, CPOL_BIT, PERIPHERAL_SELECT_BIT};
use crate::port::{DrivePort, ErrorType, SensePort, TickWait};

const PIN_BACKED: u8 = (1 << CS_BIT) | (1 << CLK_BIT) | (1 << MOSI_BIT);

fn level(high: bool) -> Level {
    if high {
        Level::High
    } else {
        Level::Low
    }
}

/// SPI lines on individual GPIOs, presented as one drive word and one sense
/// word. Drive bits without a pin behind them are kept in a shadow byte so
/// read-modify-write round-trips them unchanged.
pub struct GpioPort<'d> {
    cs: Output<'d>,
    clk: Output<'d>,
    mosi: Output<'d>,
    miso: Input<'d>,
    shadow: u8,
}

impl<'d> GpioPort<'d> {
    /// Creates a port from already-configured pins; their current output
    /// levels become the initial drive word.
    pub fn new(cs: Output<'d>, clk: Output<'d>, mosi: Output<'d>, miso: Input<'d>) -> Self {
        Self {
            cs,
            clk,
            mosi,
            miso,
            shadow: 0,
        }
    }
}

impl ErrorType for GpioPort<'_> {
    type Error = Infallible;
}

impl DrivePort for GpioPort<'_> {
    fn read_drive(&mut self) -> Result<PortWord, Self::Error> {
        let mut bits = self.shadow & !PIN_BACKED;
        if self.cs.is_set_high() {
            bits |= 1 << CS_BIT;
        }
        if self.clk.is_set_high() {
            bits |= 1 << CLK_BIT;
        }
        if self.mosi.is_set_high() {
            bits |= 1 << MOSI_BIT;
        }
        Ok(PortWord::new(bits))
    }

    fn write_drive(&mut self, word: PortWord) -> Result<(), Self::Error> {
        let bits = word.bits();
        self.shadow = bits;
        // data before clock so MOSI is stable by the time the edge lands
        self.mosi.set_level(level(get_bit(bits, MOSI_BIT)));
        self.cs.set_level(level(get_bit(bits, CS_BIT)));
        self.clk.set_level(level(get_bit(bits, CLK_BIT)));
        Ok(())
    }
}

impl SensePort for GpioPort<'_> {
    fn read_sense(&mut self) -> Result<PortWord, Self::Error> {
        Ok(PortWord::new((self.miso.is_high() as u8) << MISO_BIT))
    }
}

/// Pins feeding the slave's out-of-band control inputs.
pub struct ControlPins<'d> {
    cpol: Output<'d>,
    cpha: Output<'d>,
    select: Output<'d>,
}

impl<'d> ControlPins<'d> {
    pub fn new(cpol: Output<'d>, cpha: Output<'d>, select: Output<'d>) -> Self {
        Self { cpol, cpha, select }
    }

    /// Drives a control word built by [`SpiMode::control_word`](crate::SpiMode::control_word).
    pub fn apply(&mut self, word: u8) {
        self.cpol.set_level(level(get_bit(word, CPOL_BIT)));
        self.cpha.set_level(level(get_bit(word, CPHA_BIT)));
        self.select.set_level(level(get_bit(word, PERIPHERAL_SELECT_BIT)));
    }
}

/// Half-period waits on the embassy time driver.
pub struct TimerTicks {
    tick: Duration,
}

impl TimerTicks {
    pub fn new(tick: Duration) -> Self {
        Self { tick }
    }

    /// One tick per period of a reference clock running at `hz`.
    pub fn from_hz(hz: u64) -> Self {
        Self::new(Duration::from_hz(hz))
    }
}

impl TickWait for TimerTicks {
    async fn wait_ticks(&mut self, ticks: u32) {
        Timer::after(self.tick * ticks).await;
    }
}
