//! Host-side stand-ins for the AM335x register file.
//!
//! [`RecordingBank`] is a flat word store that logs every access, for checking
//! exact driver sequences. [`Soc`] models the peripherals the drivers touch
//! closely enough to run a firmware entry on the host.

pub mod bus;
pub mod peripherals;
pub mod recording;

use std::any::Any;

use crate::delay::Delay;

pub use bus::{PeripheralEntry, Soc};
pub use recording::{Access, RecordingBank};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("Unmapped register access at {0:#010x}")]
    Unmapped(u32),
    #[error("Access to {peripheral} at {addr:#010x} while its clock is gated")]
    ClockGated { peripheral: String, addr: u32 },
    #[error("Write to read-only register at {0:#010x}")]
    ReadOnly(u32),
    #[error("Register sequence violation at {addr:#010x}: {reason}")]
    Sequence { addr: u32, reason: &'static str },
}

pub type SimResult<T> = Result<T, SimulationError>;

/// A modelled peripheral. Offsets are relative to the peripheral base and
/// always word aligned.
pub trait Peripheral: std::fmt::Debug {
    fn read(&self, offset: u32) -> SimResult<u32>;
    fn write(&mut self, offset: u32, value: u32) -> SimResult<()>;
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }
}

/// Records requested spins instead of burning host cycles.
#[derive(Debug, Default, Clone)]
pub struct CountingDelay {
    pub spins: Vec<u32>,
}

impl CountingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u64 {
        self.spins.iter().map(|&n| n as u64).sum()
    }
}

impl Delay for CountingDelay {
    fn spin(&mut self, iterations: u32) {
        self.spins.push(iterations);
    }
}
