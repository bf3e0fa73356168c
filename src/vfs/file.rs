//! File abstraction — just enough of a VFS session layer for the VAS map's
//! vnode contract to type-check against.
//!
//! A full VFS (dentries, inodes, mount table, path resolution) is out of
//! scope for this crate; what survives is the one interface the VAS map
//! actually calls through: a backing file's ability to hand back a memory
//! object for a given mapping request.

use alloc::sync::Arc;

use crate::mm::memory_object::{MemoryObject, MmError};
use crate::mm::memory_space::Region;

/// A file-backed mapping request, as passed to [`File::mmap`].
///
/// Carries only what a vnode needs to decide how to back the mapping: the
/// VAS map's `map()` builds this before the `Region` it describes exists,
/// so it is its own small struct rather than a half-constructed `Region`.
pub struct MmapRequest {
    pub npages: usize,
    pub off_pages: usize,
    pub writable: bool,
}

/// The session-layer interface a mappable backing file exposes.
///
/// Optional capabilities get a default implementation returning
/// `NotSupported`/`Err`, so most files only need to implement
/// `readable`/`writable`/`read`/`write`.
pub trait File: Send + Sync {
    fn readable(&self) -> bool;

    fn writable(&self) -> bool;

    fn read(&self, buf: &mut [u8]) -> Result<usize, FsError>;

    fn write(&self, buf: &[u8]) -> Result<usize, FsError>;

    /// Produce the memory object backing a `mmap` of this file.
    ///
    /// Default: this file cannot be mapped. Concrete vnodes that back
    /// `MAP_SHARED`/`MAP_PRIVATE` regions override this; its internals
    /// (page cache lookup, on-disk layout) are out of scope here — the VAS
    /// map only needs the contract, not an implementation.
    fn mmap(&self, _request: &MmapRequest) -> Result<Arc<dyn MemoryObject>, MmError> {
        Err(MmError::NotSupported)
    }

    /// Ties a freshly-mapped region back to this file, for implementations
    /// that need to track outstanding mappings (e.g. to flush on close).
    /// Default: no bookkeeping needed.
    fn on_mapped(&self, _region: &Region) {}
}

pub use crate::vfs::error::FsError;
