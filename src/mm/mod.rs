#![allow(dead_code)]
//! Memory management module
//!
//! This module provides architecture-independent memory management abstractions
//! and implementations for the kernel.
//!
//! # Components
//!
//! - [`address`]: Address and page number abstractions
//! - [`global_allocator`]: Global heap allocator
//! - [`memory_object`]: Backing-store abstraction for mapped regions
//! - [`memory_space`]: Virtual address-space map (regions, fork, page faults)

pub mod address;
pub mod global_allocator;
pub mod memory_object;
pub mod memory_space;

pub use global_allocator::init_heap;
pub use memory_object::{DefaultMemoryObjectFactory, MemoryObject, MemoryObjectFactory, MmError};
pub use memory_space::{Region, VasMap, VasMapId};

use crate::println;

/// Initializes the memory management subsystem.
pub fn init() {
    init_heap();
    println!("[mm] heap initialized");
}
