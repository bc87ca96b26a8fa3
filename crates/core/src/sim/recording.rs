use std::cell::RefCell;
use std::collections::HashMap;

use crate::regs::RegisterBank;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read { addr: u32, value: u32 },
    Write { addr: u32, value: u32 },
}

/// Flat register store that keeps an ordered log of every access.
///
/// Addresses never written read as their preset value, or zero.
#[derive(Debug, Default)]
pub struct RecordingBank {
    words: RefCell<HashMap<u32, u32>>,
    log: RefCell<Vec<Access>>,
}

impl RecordingBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a register without logging it.
    pub fn preset(&self, addr: u32, value: u32) {
        self.words.borrow_mut().insert(addr, value);
    }

    pub fn value(&self, addr: u32) -> u32 {
        self.words.borrow().get(&addr).copied().unwrap_or(0)
    }

    pub fn accesses(&self) -> Vec<Access> {
        self.log.borrow().clone()
    }

    /// Writes only, in issue order.
    pub fn writes(&self) -> Vec<(u32, u32)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|a| match *a {
                Access::Write { addr, value } => Some((addr, value)),
                Access::Read { .. } => None,
            })
            .collect()
    }

    pub fn writes_to(&self, addr: u32) -> Vec<u32> {
        self.writes()
            .into_iter()
            .filter(|&(a, _)| a == addr)
            .map(|(_, v)| v)
            .collect()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }
}

impl RegisterBank for RecordingBank {
    fn read32(&self, addr: u32) -> u32 {
        let value = self.value(addr);
        self.log.borrow_mut().push(Access::Read { addr, value });
        value
    }

    fn write32(&self, addr: u32, value: u32) {
        self.words.borrow_mut().insert(addr, value);
        self.log.borrow_mut().push(Access::Write { addr, value });
    }
}
