// constants for the operating system
#![allow(unused)]

// about memory management
pub const PAGE_SIZE: usize = 4096;
pub const KERNEL_HEAP_SIZE: usize = 16 * 1024 * 1024; // 16MB
pub const USER_STACK_SIZE: usize = 4 * 1024 * 1024; // 4MB

/// Number of VPN slots in a process's user address-space window.
pub const USER_PAGES: usize = 1024;
/// Low end (inclusive) of the user address-space window, in bytes.
pub const USER_LO: usize = 0;
/// High end (exclusive) of the user address-space window, in bytes.
pub const USER_HI: usize = USER_LO + USER_PAGES * PAGE_SIZE;

pub use crate::arch::riscv::platform::qemu::*;