//! Main MLO image: serial banner, then the USR0 blink loop with status lines.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
use panic_halt as _;

use boneboot_core::app::Blinky;
use boneboot_core::{Mmio, SpinDelay};

boneboot_core::entry!(blinky);

fn blinky() -> ! {
    // SAFETY: MLO stage, MMU off, and this is the only register-file handle.
    let bank = unsafe { Mmio::new() };
    Blinky::boot(&bank, SpinDelay).run()
}

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("boneboot-firmware targets armv7a-none-eabi; use `boneboot run --entry blinky` on the host");
}
