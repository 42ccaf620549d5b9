//! Register round-trip check against the reference peripheral
//!
//! The peripheral exposes eight read/write data registers at addresses 0-7
//! and eight read-only status registers at 8-15 holding fixed bytes. A check
//! writes a payload to every data register, reads all sixteen back, and
//! reports what differed. Mismatches are data, not errors: only port
//! failures abort a check.

use heapless::Vec;

use crate::engine::SpiMaster;
use crate::error::Error;
use crate::port::{DrivePort, SensePort, TickWait};

/// Read/write data registers, at addresses `0..REGISTER_COUNT`.
pub const REGISTER_COUNT: usize = 8;
/// First status register address.
pub const STATUS_BASE: u8 = REGISTER_COUNT as u8;
/// Fixed contents of status registers 8..=15.
pub const EXPECTED_STATUS: [u8; REGISTER_COUNT] = [0xCA, 0x10, 0xAA, 0x55, 0xFF, 0x00, 0xA5, 0x5A];

const CHECKED_REGISTERS: usize = 2 * REGISTER_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mismatch {
    pub address: u8,
    pub expected: u8,
    pub actual: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// SPI transactions issued.
    pub transactions: u32,
    pub mismatches: Vec<Mismatch, CHECKED_REGISTERS>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Accumulates another report into this one, keeping the first
    /// mismatches seen.
    pub fn merge(&mut self, other: &CheckReport) {
        self.transactions += other.transactions;
        for mismatch in &other.mismatches {
            if self.mismatches.push(*mismatch).is_err() {
                break;
            }
        }
    }

    fn compare(&mut self, address: u8, expected: u8, actual: u8) {
        if expected != actual {
            error!(
                "reg {}: expected {:#x}, read {:#x}",
                address,
                expected,
                actual
            );
            // one entry per register, so capacity is never exceeded
            let _ = self.mismatches.push(Mismatch {
                address,
                expected,
                actual,
            });
        }
    }
}

/// Writes `payload` to the data registers and verifies every register.
pub async fn check_registers<P, W>(
    spi: &mut SpiMaster<P, W>,
    payload: &[u8; REGISTER_COUNT],
) -> Result<CheckReport, Error<P::Error>>
where
    P: DrivePort + SensePort,
    W: TickWait,
{
    let mut report = CheckReport::default();

    for (address, &data) in payload.iter().enumerate() {
        spi.write(address as u8, data).await?;
        report.transactions += 1;
    }

    for (address, &expected) in payload.iter().enumerate() {
        let actual = spi.read(address as u8, 0).await?;
        report.transactions += 1;
        report.compare(address as u8, expected, actual);
    }

    for (offset, &expected) in EXPECTED_STATUS.iter().enumerate() {
        let address = STATUS_BASE + offset as u8;
        let actual = spi.read(address, 0).await?;
        report.transactions += 1;
        report.compare(address, expected, actual);
    }

    if report.passed() {
        debug!("register check passed ({} transactions)", report.transactions);
    } else {
        warn!(
            "register check failed: {} of {} registers wrong",
            report.mismatches.len(),
            CHECKED_REGISTERS
        );
    }
    Ok(report)
}

/// xorshift32 source of register payloads.
pub struct PayloadSource {
    state: u32,
}

impl PayloadSource {
    pub fn new(seed: u32) -> Self {
        // zero is a fixed point of xorshift
        let state = if seed == 0 { 0x2545_F491 } else { seed };
        Self { state }
    }

    pub fn next_byte(&mut self) -> u8 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        (self.state & 0xFF) as u8
    }

    pub fn next_payload(&mut self) -> [u8; REGISTER_COUNT] {
        let mut payload = [0u8; REGISTER_COUNT];
        for byte in payload.iter_mut() {
            *byte = self.next_byte();
        }
        payload
    }
}
