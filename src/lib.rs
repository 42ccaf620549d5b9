#![cfg_attr(not(test), no_std)]

//! Bit-banged SPI master for a 16-bit register protocol
//!
//! Drives chip-select, clock and data-out through a shared port word and
//! samples data-in from a second word, producing edge-accurate waveforms in
//! all four CPOL/CPHA modes. The half-bit-period delay is an async tick wait,
//! so the same engine runs against a cycle-counting simulator or real GPIOs.
//!
//! # Frame Format
//!
//! Each transaction is 16 clock periods, MSB first:
//! - **Bit 15**: Command
//!   - `1`: Write - the data byte is shifted out to the slave
//!   - `0`: Read - the data byte is shifted in from MISO
//! - **Bits [14:12]**: Reserved, always 0
//! - **Bits [11:8]**: Register address
//! - **Bits [7:0]**: Data (dummy byte for reads)
//!
//! # Protocol
//!
//! 1. **Select**: CS is released, then asserted (CPHA=0 asserts it together
//!    with the first data bit)
//! 2. **Header**: command, reserved and address bits are clocked out
//! 3. **Data**: eight bits are clocked out (write) or sampled (read)
//! 4. **Release**: CPHA=0 adds one toggle to park the clock, then CS is released
//!
//! # Lines
//!
//! - **CS**: drive word bit 4, active low
//! - **CLK**: drive word bit 5, idles at the CPOL level
//! - **MOSI**: drive word bit 6
//! - **MISO**: sense word bit 3
//!
//! Drive word bits outside these three are read back and written unchanged
//! on every update.

mod fmt;

pub mod engine;
pub mod error;
pub mod frame;
pub mod lines;
pub mod mode;
pub mod port;
pub mod selftest;

#[cfg(feature = "rp2350")]
pub mod rp2350;

pub use engine::{SpiMaster, SpiMasterConfig};
pub use error::Error;
pub use frame::{Command, Frame};
pub use lines::{Level, PortWord};
pub use mode::{Peripheral, Phase, Polarity, SpiMode, MODE_0, MODE_1, MODE_2, MODE_3};
pub use port::{DrivePort, ErrorType, SensePort, TickWait};
