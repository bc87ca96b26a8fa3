use std::any::Any;
use std::collections::BTreeMap;

use crate::sim::{Peripheral, SimResult};

/// Plain read/write register window. Used for the clock and control
/// modules, where the drivers only store configuration words.
#[derive(Debug, Default)]
pub struct RegisterFile {
    regs: BTreeMap<u32, u32>,
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, offset: u32, value: u32) -> Self {
        self.regs.insert(offset, value);
        self
    }

    pub fn get(&self, offset: u32) -> u32 {
        self.regs.get(&offset).copied().unwrap_or(0)
    }
}

impl Peripheral for RegisterFile {
    fn read(&self, offset: u32) -> SimResult<u32> {
        Ok(self.get(offset))
    }

    fn write(&mut self, offset: u32, value: u32) -> SimResult<()> {
        self.regs.insert(offset, value);
        Ok(())
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}
