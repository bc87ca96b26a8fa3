/// Busy-wait measured in loop iterations, not time.
pub trait Delay {
    fn spin(&mut self, iterations: u32);
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn spin(&mut self, iterations: u32) {
        (**self).spin(iterations)
    }
}

/// Uncalibrated spin loop. Wall-clock duration depends on core clock and
/// optimization level; the iteration count is the contract.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinDelay;

impl Delay for SpinDelay {
    fn spin(&mut self, iterations: u32) {
        let mut i = 0u32;
        while core::hint::black_box(i) < iterations {
            i += 1;
        }
    }
}
