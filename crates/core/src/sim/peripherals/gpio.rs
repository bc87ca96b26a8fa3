use std::any::Any;

use crate::sim::{Peripheral, SimResult};

const OE: u32 = 0x134;
const DATAIN: u32 = 0x138;
const DATAOUT: u32 = 0x13C;
const CLEARDATAOUT: u32 = 0x190;
const SETDATAOUT: u32 = 0x194;

/// AM335x GPIO bank model.
///
/// SETDATAOUT/CLEARDATAOUT act on the bits written as 1 and leave the rest
/// of DATAOUT alone. Edges are counted only on pins whose OE bit is 0.
#[derive(Debug)]
pub struct GpioBank {
    name: String,
    oe: u32,
    dataout: u32,
    edges: [u64; 32],
}

impl GpioBank {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            oe: 0xFFFF_FFFF, // Reset value: all inputs
            dataout: 0,
            edges: [0; 32],
        }
    }

    pub fn oe(&self) -> u32 {
        self.oe
    }

    pub fn dataout(&self) -> u32 {
        self.dataout
    }

    /// Driven level of the pins in `mask`; false if any is an input.
    pub fn is_high(&self, mask: u32) -> bool {
        self.oe & mask == 0 && self.dataout & mask == mask
    }

    /// Level changes seen on `pin` while driven as an output.
    pub fn edges(&self, pin: u32) -> u64 {
        self.edges[pin as usize]
    }

    fn drive(&mut self, dataout: u32) {
        let changed = (self.dataout ^ dataout) & !self.oe;
        for pin in 0..32 {
            if changed & (1 << pin) != 0 {
                self.edges[pin] += 1;
                tracing::info!(
                    "{}: pin {} {}",
                    self.name,
                    pin,
                    if dataout & (1 << pin) != 0 { "high" } else { "low" }
                );
            }
        }
        self.dataout = dataout;
    }
}

impl Peripheral for GpioBank {
    fn read(&self, offset: u32) -> SimResult<u32> {
        let value = match offset {
            OE => self.oe,
            // No external drivers modelled: inputs read low.
            DATAIN => self.dataout & !self.oe,
            DATAOUT | CLEARDATAOUT | SETDATAOUT => self.dataout,
            _ => 0,
        };
        Ok(value)
    }

    fn write(&mut self, offset: u32, value: u32) -> SimResult<()> {
        match offset {
            OE => self.oe = value,
            DATAOUT => self.drive(value),
            CLEARDATAOUT => self.drive(self.dataout & !value),
            SETDATAOUT => self.drive(self.dataout | value),
            _ => {}
        }
        Ok(())
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}
