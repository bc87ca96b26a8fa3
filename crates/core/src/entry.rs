//! Boot entry for firmware images.
//!
//! The AM335x ROM copies the MLO image into on-chip SRAM and jumps to its
//! first word with no stack set up. [`entry!`](crate::entry) places `_start`
//! there (`.text.start`, first in `mlo.ld`), gives it a stack, clears `.bss`
//! and calls the image's `fn() -> !`.

/// Declares the firmware entry point.
///
/// ```ignore
/// boneboot_core::entry!(main);
///
/// fn main() -> ! {
///     boneboot_core::app::halt()
/// }
/// ```
#[macro_export]
macro_rules! entry {
    ($path:path) => {
        #[cfg(all(target_arch = "arm", target_os = "none"))]
        ::core::arch::global_asm!(
            ".section .text.start, \"ax\"",
            ".global _start",
            "_start:",
            "    ldr sp, =__stack_top",
            "    ldr r0, =__bss_start",
            "    ldr r1, =__bss_end",
            "    mov r2, #0",
            ".Lbss_clear:",
            "    cmp r0, r1",
            "    strlo r2, [r0], #4",
            "    blo .Lbss_clear",
            "    bl __boneboot_entry",
            ".Lhang:",
            "    b .Lhang",
        );

        #[doc(hidden)]
        #[export_name = "__boneboot_entry"]
        pub extern "C" fn __boneboot_entry() -> ! {
            let f: fn() -> ! = $path;
            f()
        }
    };
}
