//! Entry sequencing for the two firmware images.
//!
//! `Blinky` is the main image: serial banner then a counted blink loop.
//! [`hello`] is the standalone serial demo. Each firmware crate calls exactly
//! one of them.

use crate::delay::Delay;
use crate::led::Led;
use crate::regs::RegisterBank;
use crate::uart::Uart;

pub const BANNER: [&str; 6] = [
    "\n\n",
    "========================================\n",
    "BeagleBone Black Bootloader Started!\n",
    "UART0 @ 115200 baud, 8N1\n",
    "========================================\n",
    "\n",
];

pub const LED_READY: &str = "LED initialization complete.\n";
pub const BLINK_START: &str = "Starting LED blink sequence...\n\n";

/// Iterations spent in each LED phase of the main loop.
pub const PHASE_SPIN: u32 = 5_000_000;

pub const HELLO_MESSAGE: &str = "HELLO BBB FROM BARE METAL\n";
pub const HELLO_REPEAT: usize = 50;

/// Status tag printed for cycle `count`.
pub const fn status_digit(count: u64) -> u8 {
    b'0' + (count % 10) as u8
}

pub struct Blinky<'a, B: RegisterBank, D> {
    uart: Uart<&'a B>,
    led: Led<&'a B>,
    delay: D,
    count: u64,
}

impl<'a, B: RegisterBank, D: Delay> Blinky<'a, B, D> {
    /// Runs everything up to the first loop iteration: UART init, banner,
    /// LED init and the two status lines.
    pub fn boot(bank: &'a B, mut delay: D) -> Self {
        let uart = Uart::init(bank, &mut delay);
        for line in BANNER {
            uart.put_string(line);
        }

        let led = Led::init(bank);
        uart.put_string(LED_READY);
        uart.put_string(BLINK_START);

        Self {
            uart,
            led,
            delay,
            count: 0,
        }
    }

    /// One on/off period with its two status lines.
    pub fn cycle(&mut self) {
        let tag = status_digit(self.count);

        self.led.on();
        self.status("LED ON  [", tag);
        self.delay.spin(PHASE_SPIN);

        self.led.off();
        self.status("LED OFF [", tag);
        self.delay.spin(PHASE_SPIN);

        self.count = self.count.wrapping_add(1);
    }

    pub fn run(mut self) -> ! {
        loop {
            self.cycle();
        }
    }

    /// Completed cycles.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    fn status(&self, prefix: &str, tag: u8) {
        self.uart.put_string(prefix);
        self.uart.put_char(tag);
        self.uart.put_string("]\n");
    }
}

/// Sends [`HELLO_MESSAGE`] [`HELLO_REPEAT`] times as raw bytes.
pub fn say_hello<B: RegisterBank>(uart: &Uart<B>) {
    for _ in 0..HELLO_REPEAT {
        for byte in HELLO_MESSAGE.bytes() {
            uart.put_char(byte);
        }
    }
}

/// Standalone demo. UART0 is used as the boot ROM left it, so there is no
/// init and no CR insertion.
pub fn hello<B: RegisterBank>(bank: B) -> ! {
    let uart = Uart::new(bank);
    say_hello(&uart);
    halt()
}

#[allow(clippy::empty_loop)]
pub fn halt() -> ! {
    loop {}
}
