//! Polled UART and LED bring-up for the AM335x (BeagleBone Black).
//!
//! Drivers are generic over [`regs::RegisterBank`] so the same code drives
//! silicon through [`regs::Mmio`] and the host-side models in [`sim`].

#![cfg_attr(not(any(test, feature = "sim")), no_std)]

pub mod app;
pub mod delay;
pub mod entry;
pub mod led;
pub mod regs;
pub mod soc;
pub mod uart;

#[cfg(any(test, feature = "sim"))]
pub mod sim;


pub use delay::{Delay, SpinDelay};
pub use regs::{Mmio, RegisterBank};
