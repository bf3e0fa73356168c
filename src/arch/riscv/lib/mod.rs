//! Thin wrappers around SBI calls and an early, lock-free console
//!
//! `console` is usable before the console spin lock and the rest of the
//! kernel are initialized, which is why [`crate::early_test!`] tests print
//! through it instead of `crate::console`.

pub mod console;
pub mod sbi;
