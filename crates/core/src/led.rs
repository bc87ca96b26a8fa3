//! USR0 LED on GPIO1_21.

use crate::delay::Delay;
use crate::regs::RegisterBank;
use crate::soc::{self, control, gpio1};

/// Iterations spent in each phase of [`Led::blink_forever`].
pub const BLINK_SPIN: u32 = 1_000_000;

pub struct Led<B> {
    bank: B,
}

impl<B: RegisterBank> Led<B> {
    /// Clocks GPIO1, muxes the pad to GPIO and drives the pin as an output.
    pub fn init(bank: B) -> Self {
        bank.write32(soc::cm_per::GPIO1_CLKCTRL, soc::MODULEMODE_ENABLE);
        bank.write32(control::CONF_GPMC_AD9, control::USR0_MUX);
        // OE: 0 = output.
        bank.modify32(gpio1::OE, |oe| oe & !gpio1::USR0_PIN);
        Self { bank }
    }

    pub fn on(&self) {
        self.bank.write32(gpio1::SETDATAOUT, gpio1::USR0_PIN);
    }

    pub fn off(&self) {
        self.bank.write32(gpio1::CLEARDATAOUT, gpio1::USR0_PIN);
    }

    /// One on/off period of [`Led::blink_forever`].
    pub fn blink_once<D: Delay>(&self, delay: &mut D) {
        self.on();
        delay.spin(BLINK_SPIN);
        self.off();
        delay.spin(BLINK_SPIN);
    }

    pub fn blink_forever<D: Delay>(&self, delay: &mut D) -> ! {
        loop {
            self.blink_once(delay);
        }
    }
}
