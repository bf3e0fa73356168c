//! Minimal file abstraction
//!
//! Only the session-layer [`File`] trait and [`FsError`] survive here — the
//! dentry/inode/mount/path layers a full VFS needs are out of scope for this
//! crate; they exist only so the memory map's file-backed mapping contract
//! has a real trait to type-check against.

pub mod error;
pub mod file;

pub use error::FsError;
pub use file::{File, MmapRequest};
