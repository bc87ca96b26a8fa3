//! AM335x register map used by the bring-up drivers.
//!
//! Addresses are absolute physical addresses from the AM335x TRM.

use bitflags::bitflags;

/// Value written to a `*_CLKCTRL` register to enable the module clock.
pub const MODULEMODE_ENABLE: u32 = 0x2;
pub const MODULEMODE_MASK: u32 = 0x3;

/// Clock module, peripheral domain.
pub mod cm_per {
    pub const BASE: u32 = 0x44E0_0000;
    pub const GPIO1_CLKCTRL: u32 = BASE + 0xAC;
}

/// Clock module, wakeup domain.
pub mod cm_wkup {
    pub const BASE: u32 = 0x44E0_0400;
    pub const UART0_CLKCTRL: u32 = BASE + 0xB4;
}

/// Control module: pad configuration (pin mux).
pub mod control {
    pub const BASE: u32 = 0x44E1_0000;
    pub const CONF_GPMC_AD9: u32 = BASE + 0x824;
    pub const CONF_UART0_RXD: u32 = BASE + 0x970;
    pub const CONF_UART0_TXD: u32 = BASE + 0x974;

    /// Mode 0, receiver enabled, pull-up.
    pub const UART0_RXD_MUX: u32 = 0x30;
    /// Mode 0, no pull.
    pub const UART0_TXD_MUX: u32 = 0x00;
    /// Mode 7 (GPIO), pull disabled.
    pub const USR0_MUX: u32 = 7;
}

pub mod uart0 {
    pub const BASE: u32 = 0x44E0_9000;

    pub const THR: u32 = BASE + 0x00;
    pub const RHR: u32 = BASE + 0x00;
    pub const IER: u32 = BASE + 0x04;
    pub const FCR: u32 = BASE + 0x08;
    pub const LCR: u32 = BASE + 0x0C;
    pub const LSR: u32 = BASE + 0x14;
    pub const MDR1: u32 = BASE + 0x20;

    // Only visible while LCR.DLAB is set.
    pub const DLL: u32 = BASE + 0x00;
    pub const DLH: u32 = BASE + 0x04;

    /// UART functional clock.
    pub const FCLK_HZ: u32 = 48_000_000;
    pub const BAUD: u32 = 115_200;
}

pub mod gpio1 {
    pub const BASE: u32 = 0x4804_C000;

    pub const OE: u32 = BASE + 0x134;
    pub const DATAOUT: u32 = BASE + 0x13C;
    pub const CLEARDATAOUT: u32 = BASE + 0x190;
    pub const SETDATAOUT: u32 = BASE + 0x194;

    /// USR0 LED, GPIO1_21.
    pub const USR0_PIN: u32 = 1 << 21;
}

bitflags! {
    /// Line control register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Lcr: u32 {
        const WORD_LEN_8 = 0x03;
        const DIV_EN = 0x80;
    }

    /// Line status register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Lsr: u32 {
        const RX_FIFO_E = 0x01;
        const TX_FIFO_E = 0x20;
        const TX_SR_E = 0x40;
    }

    /// FIFO control register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Fcr: u32 {
        const FIFO_EN = 0x01;
        const RX_FIFO_CLEAR = 0x02;
        const TX_FIFO_CLEAR = 0x04;
    }
}

/// Mode definition register 1, `MODE_SELECT` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Mdr1Mode {
    Uart16x = 0x0,
    Disable = 0x7,
}
