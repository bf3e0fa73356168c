//! QEMU `virt` machine constants
pub const CLOCK_FREQ: usize = 12500000;
