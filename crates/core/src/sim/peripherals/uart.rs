use std::any::Any;

use crate::sim::{Peripheral, SimResult, SimulationError};
use crate::soc::{uart0, Lcr, Lsr, Mdr1Mode};

// THR/RHR/DLL and IER/DLH share offsets, banked by LCR.DLAB.
const RHR_THR_DLL: u32 = uart0::RHR - uart0::BASE;
const IER_DLH: u32 = uart0::IER - uart0::BASE;
const FCR: u32 = uart0::FCR - uart0::BASE;
const LCR: u32 = uart0::LCR - uart0::BASE;
const LSR: u32 = uart0::LSR - uart0::BASE;
const MDR1: u32 = uart0::MDR1 - uart0::BASE;

/// AM335x UART model, transmit side only.
///
/// The transmitter drains instantly, so LSR always reports THRE and TEMT.
/// Bytes written to THR are captured only while MDR1 selects 16x mode.
#[derive(Debug)]
pub struct Uart {
    base: u32,
    lcr: u32,
    ier: u32,
    dll: u32,
    dlh: u32,
    fcr: u32,
    mdr1: u32,
    tx: Vec<u8>,
}

impl Uart {
    /// Reset state: module disabled, divisor zero.
    pub fn new(base: u32) -> Self {
        Self {
            base,
            lcr: 0,
            ier: 0,
            dll: 0,
            dlh: 0,
            fcr: 0,
            mdr1: Mdr1Mode::Disable as u32,
            tx: Vec::new(),
        }
    }

    /// State the boot ROM leaves UART0 in: 115200 8N1, 16x mode.
    pub fn rom_configured(base: u32) -> Self {
        Self {
            lcr: Lcr::WORD_LEN_8.bits(),
            dll: 26,
            mdr1: Mdr1Mode::Uart16x as u32,
            ..Self::new(base)
        }
    }

    pub fn tx(&self) -> &[u8] {
        &self.tx
    }

    pub fn divisor(&self) -> u32 {
        (self.dlh << 8) | self.dll
    }

    /// Effective baud rate, `None` while the divisor is zero.
    pub fn baud(&self) -> Option<u32> {
        match self.divisor() {
            0 => None,
            div => Some(uart0::FCLK_HZ / (16 * div)),
        }
    }

    pub fn lcr(&self) -> u32 {
        self.lcr
    }

    pub fn fcr(&self) -> u32 {
        self.fcr
    }

    pub fn is_enabled(&self) -> bool {
        self.mdr1 == Mdr1Mode::Uart16x as u32
    }

    fn dlab(&self) -> bool {
        Lcr::from_bits_retain(self.lcr).contains(Lcr::DIV_EN)
    }

    fn check_divisor_write(&self, offset: u32) -> SimResult<()> {
        if self.mdr1 != Mdr1Mode::Disable as u32 {
            return Err(SimulationError::Sequence {
                addr: self.base + offset,
                reason: "divisor written while UART enabled",
            });
        }
        Ok(())
    }
}

impl Peripheral for Uart {
    fn read(&self, offset: u32) -> SimResult<u32> {
        let value = match offset {
            RHR_THR_DLL if self.dlab() => self.dll,
            RHR_THR_DLL => 0,
            IER_DLH if self.dlab() => self.dlh,
            IER_DLH => self.ier,
            LCR => self.lcr,
            LSR => (Lsr::TX_FIFO_E | Lsr::TX_SR_E).bits(),
            MDR1 => self.mdr1,
            _ => 0,
        };
        Ok(value)
    }

    fn write(&mut self, offset: u32, value: u32) -> SimResult<()> {
        match offset {
            RHR_THR_DLL if self.dlab() => {
                self.check_divisor_write(offset)?;
                self.dll = value & 0xFF;
            }
            RHR_THR_DLL => {
                if !self.is_enabled() {
                    return Err(SimulationError::Sequence {
                        addr: self.base + offset,
                        reason: "THR written while UART disabled",
                    });
                }
                self.tx.push(value as u8);
            }
            IER_DLH if self.dlab() => {
                self.check_divisor_write(offset)?;
                self.dlh = value & 0x3F;
            }
            IER_DLH => self.ier = value & 0xFF,
            FCR => self.fcr = value & 0xFF,
            LCR => self.lcr = value & 0xFF,
            LSR => return Err(SimulationError::ReadOnly(self.base + offset)),
            MDR1 => {
                self.mdr1 = value & 0x7;
                tracing::debug!(
                    "UART: MDR1 mode {:#x}, divisor {}, LCR {:#x}",
                    self.mdr1,
                    self.divisor(),
                    self.lcr
                );
            }
            _ => {}
        }
        Ok(())
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dlab_banks_divisor_registers() {
        let mut uart = Uart::new(uart0::BASE);
        uart.write(LCR, Lcr::DIV_EN.bits()).unwrap();
        uart.write(RHR_THR_DLL, 26).unwrap();
        uart.write(IER_DLH, 0).unwrap();
        uart.write(LCR, Lcr::WORD_LEN_8.bits()).unwrap();

        assert_eq!(uart.divisor(), 26);
        assert_eq!(uart.baud(), Some(115_384));
        // With DLAB clear, offset 0x04 is IER again.
        assert_eq!(uart.read(IER_DLH).unwrap(), 0);
        assert!(uart.tx().is_empty());
    }

    #[test]
    fn test_thr_dropped_while_disabled() {
        let mut uart = Uart::new(uart0::BASE);
        let err = uart.write(RHR_THR_DLL, b'A' as u32).unwrap_err();
        assert!(matches!(err, SimulationError::Sequence { .. }));
        assert!(uart.tx().is_empty());
    }

    #[test]
    fn test_divisor_change_requires_disable() {
        let mut uart = Uart::rom_configured(uart0::BASE);
        uart.write(LCR, Lcr::DIV_EN.bits()).unwrap();
        assert!(uart.write(RHR_THR_DLL, 13).is_err());
        assert_eq!(uart.divisor(), 26);
    }

    #[test]
    fn test_lsr_is_read_only() {
        let mut uart = Uart::rom_configured(uart0::BASE);
        assert_eq!(
            uart.write(LSR, 0),
            Err(SimulationError::ReadOnly(uart0::LSR))
        );
        let lsr = Lsr::from_bits_retain(uart.read(LSR).unwrap());
        assert!(lsr.contains(Lsr::TX_FIFO_E | Lsr::TX_SR_E));
        // Receive side is not modelled.
        assert!(!lsr.contains(Lsr::RX_FIFO_E));
    }
}
