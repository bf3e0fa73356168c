//! Shared kernel/user-space declarations
//!
//! Only the memory-mapping flags survive here; syscalls, credentials,
//! signals, sockets, and the rest of a full uapi surface are out of scope.

#![allow(dead_code)]
pub mod mm;
