//! Behavioural model of the register peripheral plus a line recorder.
#![allow(dead_code)]

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use bitbang_spi::lines::MISO_BIT;
use bitbang_spi::{
    DrivePort, ErrorType, Level, PortWord, SensePort, SpiMaster, SpiMasterConfig, SpiMode,
    TickWait,
};

/// Fixed status bytes the peripheral reports at addresses 8..=15.
pub const STATUS_ROM: [u8; 8] = [0xCA, 0x10, 0xAA, 0x55, 0xFF, 0x00, 0xA5, 0x5A];

/// Bits the peripheral drives on its output word besides MISO.
const SENSE_NOISE: u8 = 0b1010_0110;

/// What the slave latched between one CS assertion and the matching release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latched {
    pub bits: u16,
    pub count: u8,
}

/// Register peripheral reacting to line edges the way the hardware does:
/// MOSI is captured on the sample edge for the configured mode, MISO changes
/// on the opposite edge.
pub struct SimSlave {
    mode: SpiMode,
    pub registers: [u8; 8],
    selected: bool,
    rx: u16,
    rx_count: u8,
    tx: u8,
    miso: bool,
    /// Forces MISO to a fixed level when set.
    pub stuck_miso: Option<bool>,
    pub latched: Vec<Latched>,
}

impl SimSlave {
    pub fn new(mode: SpiMode) -> Self {
        Self {
            mode,
            registers: [0; 8],
            selected: false,
            rx: 0,
            rx_count: 0,
            tx: 0,
            miso: false,
            stuck_miso: None,
            latched: Vec::new(),
        }
    }

    pub fn set_mode(&mut self, mode: SpiMode) {
        self.mode = mode;
    }

    fn register(&self, address: u8) -> u8 {
        match address {
            0..=7 => self.registers[address as usize],
            _ => STATUS_ROM[(address - 8) as usize],
        }
    }

    fn on_drive(&mut self, old: PortWord, new: PortWord) {
        if !old.cs_asserted() && new.cs_asserted() {
            self.selected = true;
            self.rx = 0;
            self.rx_count = 0;
        }

        if self.selected && old.clock() != new.clock() {
            let leading = new.clock() != self.mode.idle_level();
            if leading == self.mode.samples_on_leading_edge() {
                self.sample(new.data_out());
            } else if (8..16).contains(&self.rx_count) {
                let index = 7 - (self.rx_count - 8);
                self.miso = (self.tx >> index) & 1 == 1;
            }
        }

        if old.cs_asserted() && !new.cs_asserted() && self.selected {
            self.selected = false;
            self.latched.push(Latched {
                bits: self.rx,
                count: self.rx_count,
            });
            let is_write = (self.rx >> 15) & 1 == 1;
            let address = ((self.rx >> 8) & 0xF) as u8;
            if self.rx_count == 16 && is_write && address < 8 {
                self.registers[address as usize] = self.rx as u8;
            }
        }
    }

    fn sample(&mut self, mosi: bool) {
        if self.rx_count >= 16 {
            return;
        }
        self.rx = (self.rx << 1) | mosi as u16;
        self.rx_count += 1;
        if self.rx_count == 8 {
            let is_read = (self.rx >> 7) & 1 == 0;
            if is_read {
                self.tx = self.register((self.rx & 0xF) as u8);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Drive { tick: u64, word: PortWord },
    Sense { tick: u64 },
}

/// Port wired to a [`SimSlave`], recording every line update.
pub struct Bench {
    pub slave: SimSlave,
    drive: PortWord,
    parked: PortWord,
    clock: Rc<Cell<u64>>,
    pub events: Vec<Event>,
}

impl Bench {
    pub fn drive(&self) -> PortWord {
        self.drive
    }

    pub fn clear_events(&mut self) {
        self.parked = self.drive;
        self.events.clear();
        self.slave.latched.clear();
    }

    /// Drive words written since the last clear, in order.
    pub fn drive_words(&self) -> Vec<PortWord> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Drive { word, .. } => Some(*word),
                Event::Sense { .. } => None,
            })
            .collect()
    }

    /// Clock edges since the last clear, `true` where the slave samples MOSI.
    pub fn clock_edges(&self, mode: SpiMode) -> Vec<bool> {
        let mut previous = self.parked;
        let mut edges = Vec::new();
        for word in self.drive_words() {
            if word.clock() != previous.clock() {
                let leading = word.clock() != mode.idle_level();
                edges.push(leading == mode.samples_on_leading_edge());
            }
            previous = word;
        }
        edges
    }
}

impl ErrorType for Bench {
    type Error = Infallible;
}

impl DrivePort for Bench {
    fn read_drive(&mut self) -> Result<PortWord, Self::Error> {
        Ok(self.drive)
    }

    fn write_drive(&mut self, word: PortWord) -> Result<(), Self::Error> {
        let old = self.drive;
        self.drive = word;
        self.slave.on_drive(old, word);
        self.events.push(Event::Drive {
            tick: self.clock.get(),
            word,
        });
        Ok(())
    }
}

impl SensePort for Bench {
    fn read_sense(&mut self) -> Result<PortWord, Self::Error> {
        self.events.push(Event::Sense {
            tick: self.clock.get(),
        });
        let miso = self.slave.stuck_miso.unwrap_or(self.slave.miso);
        Ok(PortWord::new(
            (SENSE_NOISE & !(1 << MISO_BIT)) | ((miso as u8) << MISO_BIT),
        ))
    }
}

/// Reference clock that advances instantly when waited on.
pub struct SimTicks {
    clock: Rc<Cell<u64>>,
}

impl TickWait for SimTicks {
    async fn wait_ticks(&mut self, ticks: u32) {
        self.clock.set(self.clock.get() + ticks as u64);
    }
}

/// Unrelated drive-word bits the engine must leave alone.
pub const FOREIGN_BITS: u8 = 0b1000_0011;

/// A master wired to a fresh slave, lines parked for `mode`.
pub fn bench(mode: SpiMode) -> SpiMaster<Bench, SimTicks> {
    let clock = Rc::new(Cell::new(0));
    let initial = PortWord::new(FOREIGN_BITS)
        .deassert_cs()
        .clock_set(mode.idle_level().toggled());
    let port = Bench {
        slave: SimSlave::new(mode),
        drive: initial,
        parked: initial,
        clock: clock.clone(),
        events: Vec::new(),
    };
    let config = SpiMasterConfig {
        mode,
        ..Default::default()
    };
    let mut spi = SpiMaster::new(port, SimTicks { clock }, config);
    futures::executor::block_on(spi.idle()).unwrap();
    assert_eq!(spi.port().drive().clock(), mode.idle_level());
    spi.port_mut().clear_events();
    spi
}

/// Switches both ends to `mode`, as the harness does through the control word.
pub fn switch_mode(spi: &mut SpiMaster<Bench, SimTicks>, mode: SpiMode) {
    spi.port_mut().slave.set_mode(mode);
    futures::executor::block_on(spi.set_mode(mode)).unwrap();
    spi.port_mut().clear_events();
}

pub fn clock_levels(words: &[PortWord]) -> Vec<Level> {
    words.iter().map(|word| word.clock()).collect()
}
