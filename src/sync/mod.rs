//! Synchronization primitives
//!
//! Everything here assumes a single-hart, cooperative kernel: locks exist to
//! keep interrupt handlers from observing a torn critical section, not to
//! arbitrate between multiple cores.
mod intr_guard;
mod raw_spin_lock;
mod raw_spin_lock_without_guard;
mod spin_lock;

pub use intr_guard::*;
pub use raw_spin_lock::*;
pub use raw_spin_lock_without_guard::*;
pub use spin_lock::*;
