#![no_std]
#![no_main]

use bitbang_spi::mode::{Peripheral, MODE_0, MODE_1, MODE_2, MODE_3};
use bitbang_spi::rp2350::{ControlPins, GpioPort, TimerTicks};
use bitbang_spi::selftest::{check_registers, CheckReport, PayloadSource};
use bitbang_spi::{SpiMaster, SpiMasterConfig};
use defmt::{error, info, Debug2Format};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

/// Passes per mode before moving to the next one.
const ITERATIONS: u32 = 10;

/// Reference clock the half-period tick count is measured against (100 kHz).
const REFERENCE_CLOCK_HZ: u64 = 100_000;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Bit-bang SPI register check starting");

    let p = embassy_rp::init(Default::default());

    let port = GpioPort::new(
        Output::new(p.PIN_2, Level::High), // CS
        Output::new(p.PIN_3, Level::Low),  // CLK
        Output::new(p.PIN_4, Level::Low),  // MOSI
        Input::new(p.PIN_5, Pull::Down),   // MISO
    );

    // Slave control inputs: CPOL, CPHA, peripheral select
    let mut control = ControlPins::new(
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        Output::new(p.PIN_8, Level::Low),
    );

    let mut spi = SpiMaster::new(
        port,
        TimerTicks::from_hz(REFERENCE_CLOCK_HZ),
        SpiMasterConfig::default(),
    );
    let mut payloads = PayloadSource::new(Instant::now().as_ticks() as u32);

    loop {
        for mode in [MODE_1, MODE_3, MODE_0, MODE_2] {
            control.apply(mode.control_word(Peripheral::Spi));
            if let Err(e) = spi.set_mode(mode).await {
                error!("Failed to park lines: {:?}", Debug2Format(&e));
                continue;
            }

            let mut total = CheckReport::default();
            for _ in 0..ITERATIONS {
                let payload = payloads.next_payload();
                match check_registers(&mut spi, &payload).await {
                    Ok(report) => total.merge(&report),
                    Err(e) => error!("Register check aborted: {:?}", Debug2Format(&e)),
                }
            }

            if total.passed() {
                info!(
                    "CPOL={} CPHA={}: PASS ({} transactions)",
                    mode.cpol(),
                    mode.cpha(),
                    total.transactions
                );
            } else {
                error!(
                    "CPOL={} CPHA={}: FAIL ({} mismatches)",
                    mode.cpol(),
                    mode.cpha(),
                    total.mismatches.len()
                );
                for mismatch in &total.mismatches {
                    error!("  {}", mismatch);
                }
            }
        }

        Timer::after_millis(1000).await;
    }
}
