//! Polled UART0 transmitter.

use core::fmt;

use crate::delay::Delay;
use crate::regs::RegisterBank;
use crate::soc::{self, control, uart0, Fcr, Lcr, Lsr, Mdr1Mode};

/// Iterations to wait after enabling the UART0 clock.
pub const CLOCK_SETTLE_SPIN: u32 = 1_000;

/// Baud divisor for 16x oversampling. Truncates; 48 MHz / 115200 gives 26.
pub const fn divisor(clock_hz: u32, baud: u32) -> u32 {
    clock_hz / (16 * baud)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    pub clock_hz: u32,
    pub baud: u32,
}

impl UartConfig {
    pub const UART0: UartConfig = UartConfig {
        clock_hz: uart0::FCLK_HZ,
        baud: uart0::BAUD,
    };

    pub const fn divisor(&self) -> u32 {
        divisor(self.clock_hz, self.baud)
    }

    pub const fn dll(&self) -> u32 {
        self.divisor() & 0xFF
    }

    pub const fn dlh(&self) -> u32 {
        (self.divisor() >> 8) & 0xFF
    }
}

pub struct Uart<B> {
    bank: B,
}

impl<B: RegisterBank> Uart<B> {
    /// Wraps UART0 without touching it. Use [`Uart::init`] unless an earlier
    /// boot stage already configured the line.
    pub fn new(bank: B) -> Self {
        Self { bank }
    }

    /// Brings UART0 up at 115200 8N1. The register sequence is fixed: the
    /// divisor latch is only writable while the module is disabled and
    /// DLAB is set.
    pub fn init<D: Delay>(bank: B, delay: &mut D) -> Self {
        let config = UartConfig::UART0;

        bank.write32(soc::cm_wkup::UART0_CLKCTRL, soc::MODULEMODE_ENABLE);
        delay.spin(CLOCK_SETTLE_SPIN);

        bank.write32(control::CONF_UART0_RXD, control::UART0_RXD_MUX);
        bank.write32(control::CONF_UART0_TXD, control::UART0_TXD_MUX);

        bank.write32(uart0::MDR1, Mdr1Mode::Disable as u32);

        bank.write32(uart0::LCR, Lcr::DIV_EN.bits());
        bank.write32(uart0::DLL, config.dll());
        bank.write32(uart0::DLH, config.dlh());
        bank.write32(uart0::LCR, Lcr::WORD_LEN_8.bits());

        let fifo = Fcr::FIFO_EN | Fcr::RX_FIFO_CLEAR | Fcr::TX_FIFO_CLEAR;
        bank.write32(uart0::FCR, fifo.bits());

        bank.write32(uart0::MDR1, Mdr1Mode::Uart16x as u32);

        Self { bank }
    }

    /// Blocks until the holding register is empty, then sends `c`.
    pub fn put_char(&self, c: u8) {
        while !Lsr::from_bits_retain(self.bank.read32(uart0::LSR)).contains(Lsr::TX_FIFO_E) {}
        self.bank.write32(uart0::THR, c as u32);
    }

    /// Sends `s`, expanding every `\n` to `\r\n`.
    pub fn put_string(&self, s: &str) {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.put_char(b'\r');
            }
            self.put_char(byte);
        }
    }
}

impl<B: RegisterBank> fmt::Write for Uart<B> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put_string(s);
        Ok(())
    }
}
