//! Architecture-specific modules
//!
//! Everything that touches a CPU register, CSR, or platform constant lives
//! behind this module so the rest of the kernel stays portable.

mod riscv;

pub use riscv::*;
