//! Standalone serial demo: the hello message 50 times, then halt.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
use panic_halt as _;

use boneboot_core::{app, Mmio};

boneboot_core::entry!(hello);

fn hello() -> ! {
    // SAFETY: MLO stage, MMU off, and this is the only register-file handle.
    let bank = unsafe { Mmio::new() };
    app::hello(bank)
}

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("boneboot-hello targets armv7a-none-eabi; use `boneboot run --entry hello` on the host");
}
