use std::cell::RefCell;

use crate::regs::RegisterBank;
use crate::sim::peripherals::gpio::GpioBank;
use crate::sim::peripherals::registers::RegisterFile;
use crate::sim::peripherals::uart::Uart;
use crate::sim::{Peripheral, SimResult, SimulationError};
use crate::soc::{self, cm_per, cm_wkup, control, gpio1, uart0};

pub struct PeripheralEntry {
    pub name: String,
    pub base: u32,
    pub size: u32,
    /// `*_CLKCTRL` register gating this peripheral, if any.
    pub clock: Option<u32>,
    pub dev: Box<dyn Peripheral>,
}

impl PeripheralEntry {
    fn contains(&self, addr: u32) -> bool {
        addr >= self.base && addr - self.base < self.size
    }
}

#[derive(Default)]
struct SocState {
    peripherals: Vec<PeripheralEntry>,
    faults: Vec<SimulationError>,
    accesses: u64,
}

/// Simulated AM335x: clock module, control module, UART0 and GPIO1.
///
/// Register faults are recorded, not returned, since driver code has no
/// error path. Check [`Soc::faults`] after a run.
pub struct Soc {
    state: RefCell<SocState>,
}

impl Soc {
    /// Cold reset: every module clock off, UART0 disabled, GPIO pins inputs.
    pub fn new() -> Self {
        Self::with_peripherals(vec![
            PeripheralEntry {
                name: "cm".to_string(),
                base: cm_per::BASE,
                size: 0x800,
                clock: None,
                dev: Box::new(RegisterFile::new()),
            },
            PeripheralEntry {
                name: "control".to_string(),
                base: control::BASE,
                size: 0x2000,
                clock: None,
                dev: Box::new(RegisterFile::new()),
            },
            PeripheralEntry {
                name: "uart0".to_string(),
                base: uart0::BASE,
                size: 0x1000,
                clock: Some(cm_wkup::UART0_CLKCTRL),
                dev: Box::new(Uart::new(uart0::BASE)),
            },
            PeripheralEntry {
                name: "gpio1".to_string(),
                base: gpio1::BASE,
                size: 0x1000,
                clock: Some(cm_per::GPIO1_CLKCTRL),
                dev: Box::new(GpioBank::new("gpio1")),
            },
        ])
    }

    /// State on hand-off from the boot ROM: UART0 clocked, muxed and
    /// running at 115200 8N1. GPIO1 is still gated.
    pub fn after_rom() -> Self {
        Self::with_peripherals(vec![
            PeripheralEntry {
                name: "cm".to_string(),
                base: cm_per::BASE,
                size: 0x800,
                clock: None,
                dev: Box::new(
                    RegisterFile::new()
                        .with(cm_wkup::UART0_CLKCTRL - cm_per::BASE, soc::MODULEMODE_ENABLE),
                ),
            },
            PeripheralEntry {
                name: "control".to_string(),
                base: control::BASE,
                size: 0x2000,
                clock: None,
                dev: Box::new(
                    RegisterFile::new()
                        .with(control::CONF_UART0_RXD - control::BASE, control::UART0_RXD_MUX)
                        .with(control::CONF_UART0_TXD - control::BASE, control::UART0_TXD_MUX),
                ),
            },
            PeripheralEntry {
                name: "uart0".to_string(),
                base: uart0::BASE,
                size: 0x1000,
                clock: Some(cm_wkup::UART0_CLKCTRL),
                dev: Box::new(Uart::rom_configured(uart0::BASE)),
            },
            PeripheralEntry {
                name: "gpio1".to_string(),
                base: gpio1::BASE,
                size: 0x1000,
                clock: Some(cm_per::GPIO1_CLKCTRL),
                dev: Box::new(GpioBank::new("gpio1")),
            },
        ])
    }

    pub fn with_peripherals(peripherals: Vec<PeripheralEntry>) -> Self {
        Self {
            state: RefCell::new(SocState {
                peripherals,
                ..Default::default()
            }),
        }
    }

    pub fn faults(&self) -> Vec<SimulationError> {
        self.state.borrow().faults.clone()
    }

    pub fn access_count(&self) -> u64 {
        self.state.borrow().accesses
    }

    /// Runs `f` on the peripheral called `name` if it has type `T`.
    pub fn inspect<T: 'static, R>(&self, name: &str, f: impl FnOnce(&T) -> R) -> Option<R> {
        let state = self.state.borrow();
        let entry = state.peripherals.iter().find(|p| p.name == name)?;
        let dev = entry.dev.as_any()?.downcast_ref::<T>()?;
        Some(f(dev))
    }

    /// Bytes captured from UART0's transmit holding register.
    pub fn uart_output(&self) -> Vec<u8> {
        self.inspect("uart0", |u: &Uart| u.tx().to_vec())
            .unwrap_or_default()
    }

    pub fn led_is_on(&self) -> bool {
        self.inspect("gpio1", |g: &GpioBank| g.is_high(gpio1::USR0_PIN))
            .unwrap_or(false)
    }

    /// Level changes on the USR0 LED.
    pub fn led_edges(&self) -> u64 {
        self.inspect("gpio1", |g: &GpioBank| g.edges(gpio1::USR0_PIN.trailing_zeros()))
            .unwrap_or(0)
    }

    fn clock_enabled(peripherals: &[PeripheralEntry], clkctrl: u32) -> bool {
        peripherals
            .iter()
            .find(|p| p.contains(clkctrl))
            .and_then(|p| p.dev.read(clkctrl - p.base).ok())
            .map(|v| v & soc::MODULEMODE_MASK == soc::MODULEMODE_ENABLE)
            .unwrap_or(false)
    }

    fn access<R>(
        &self,
        addr: u32,
        op: impl FnOnce(&mut dyn Peripheral, u32) -> SimResult<R>,
    ) -> SimResult<R> {
        let mut state = self.state.borrow_mut();
        state.accesses += 1;

        let idx = state
            .peripherals
            .iter()
            .position(|p| p.contains(addr))
            .ok_or(SimulationError::Unmapped(addr))?;

        if let Some(clkctrl) = state.peripherals[idx].clock {
            if !Self::clock_enabled(&state.peripherals, clkctrl) {
                return Err(SimulationError::ClockGated {
                    peripheral: state.peripherals[idx].name.clone(),
                    addr,
                });
            }
        }

        let entry = &mut state.peripherals[idx];
        op(entry.dev.as_mut(), addr - entry.base)
    }

    fn record(&self, err: SimulationError) {
        tracing::warn!("{}", err);
        self.state.borrow_mut().faults.push(err);
    }
}

impl Default for Soc {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterBank for Soc {
    fn read32(&self, addr: u32) -> u32 {
        match self.access(addr, |dev, offset| dev.read(offset)) {
            Ok(value) => {
                tracing::debug!("read  {:#010x} -> {:#010x}", addr, value);
                value
            }
            Err(e) => {
                self.record(e);
                0
            }
        }
    }

    fn write32(&self, addr: u32, value: u32) {
        tracing::debug!("write {:#010x} <- {:#010x}", addr, value);
        if let Err(e) = self.access(addr, |dev, offset| dev.write(offset, value)) {
            self.record(e);
        }
    }
}
