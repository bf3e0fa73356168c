//! Memory objects: the opaque page-content providers a [`Region`](super::memory_space::Region)
//! refers to.
//!
//! Everything in this file is an *external collaborator*: the VAS map only
//! ever calls through [`MemoryObject`] and [`MemoryObjectFactory`], never
//! constructs a concrete anonymous or shadow object itself. The concrete
//! impls below exist so the crate is self-contained and so tests have
//! something real to exercise; a production kernel would swap them for
//! page-cache-backed and disk-backed objects without touching `vas_map.rs`.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::config::PAGE_SIZE;
use crate::mm::address::{PageNum, Paddr, Ppn, UsizeConvert};
use crate::sync::SpinLock;

/// Errors surfaced by the VAS map and its collaborators.
///
/// Mirrors [`crate::vfs::error::FsError`]'s shape (plain enum, hand-written
/// `Display`) rather than reusing it outright: the VAS map's failure kinds
/// (`OUT_OF_SPACE`, `NO_MEMORY`, `IO`, `NOT_FOUND`) don't line up with a
/// POSIX errno table, and that translation deliberately stays a layer
/// above this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmError {
    /// A fixed-size allocator (Region or VAS map shell) returned null.
    OutOfSpace,
    /// A memory-object constructor (`new_anonymous`, `new_shadow`) returned null.
    NoMemory,
    /// Propagated verbatim from `lookup_page` or a vnode's `mmap` callback.
    Io,
    /// `find_gap` found no suitable gap. Surfaced by `map` as `NoMemory`.
    NotFound,
    /// The backing vnode does not support being mapped.
    NotSupported,
}

impl fmt::Display for MmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MmError::OutOfSpace => "out of space",
            MmError::NoMemory => "no memory",
            MmError::Io => "I/O error",
            MmError::NotFound => "not found",
            MmError::NotSupported => "mapping not supported",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for MmError {}

/// A borrowable handle to one physical page, as returned by
/// [`MemoryObject::lookup_page`].
///
/// This crate has no real page-frame cache (explicitly out of scope); a
/// `PageFrame` just names a `Ppn` that the direct-mapped window makes
/// addressable, plus the dirty bit set by `VasMap::write`'s page walker.
pub struct PageFrame {
    ppn: Ppn,
    dirty: bool,
}

impl PageFrame {
    pub fn new(ppn: Ppn) -> Self {
        PageFrame { ppn, dirty: false }
    }

    pub fn ppn(&self) -> Ppn {
        self.ppn
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the frame as holding unflushed writes.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Byte view of the page.
    ///
    /// This kernel never enables the MMU (no satp write, no page-table
    /// walker — out of scope for this subsystem), so physical addresses
    /// are directly dereferenceable; this matches `clear_bss`/`init_heap`
    /// and `alloc_zeroed_frame`'s own raw writes below.
    ///
    /// # Safety
    /// Valid as long as `ppn` names a page this crate actually owns; callers
    /// within the VAS map's read/write walker uphold that by construction.
    unsafe fn as_slice(&self) -> &[u8; PAGE_SIZE] {
        let paddr = self.ppn.start_addr().as_usize();
        unsafe { &*(paddr as *const [u8; PAGE_SIZE]) }
    }

    /// # Safety
    /// See [`PageFrame::as_slice`].
    unsafe fn as_mut_slice(&mut self) -> &mut [u8; PAGE_SIZE] {
        let paddr = self.ppn.start_addr().as_usize();
        unsafe { &mut *(paddr as *mut [u8; PAGE_SIZE]) }
    }

    /// Copy `src` into the page starting at `page_offset`.
    ///
    /// # Safety
    /// See [`PageFrame::as_slice`].
    pub unsafe fn write_at(&mut self, page_offset: usize, src: &[u8]) {
        let dst = unsafe { self.as_mut_slice() };
        dst[page_offset..page_offset + src.len()].copy_from_slice(src);
    }

    /// Copy out of the page starting at `page_offset`.
    ///
    /// # Safety
    /// See [`PageFrame::as_slice`].
    pub unsafe fn read_at(&self, page_offset: usize, dst: &mut [u8]) {
        let src = unsafe { self.as_slice() };
        dst.copy_from_slice(&src[page_offset..page_offset + dst.len()]);
    }
}

/// The opaque backing store a [`Region`](super::memory_space::Region)
/// holds exactly one strong reference to.
///
/// No `acquire`/`release` methods: Rust's `Arc` already provides
/// non-failing refcount increment (`Arc::clone`) and
/// refcount-decrement-frees-on-last-release (`Drop`), so modeling them as
/// explicit trait methods would just be a worse `Arc`.
pub trait MemoryObject: Send + Sync {
    /// Fetch (and on first touch of an anonymous page, zero-fill) the page
    /// at `page_index` within this object.
    fn lookup_page(&self, page_index: usize, will_write: bool) -> Result<PageFrame, MmError>;

    /// Called when a region that referenced this object is unlinked from its
    /// VAS map (the four-case splitter's "engulfed" case, and `destroy`).
    /// Shadow-chain bookkeeping is the memory-object layer's own
    /// responsibility; objects with no chain to maintain can ignore this.
    fn on_region_unlinked(&self) {}
}

/// Constructs the per-flavour memory objects the VAS map never builds
/// itself. Injected into [`VasMap`](super::memory_space::VasMap) so
/// tests can swap in a lightweight fake.
pub trait MemoryObjectFactory: Send + Sync {
    fn new_anonymous(&self) -> Result<Arc<dyn MemoryObject>, MmError>;
    fn new_shadow(&self, base: Arc<dyn MemoryObject>) -> Result<Arc<dyn MemoryObject>, MmError>;
}

/// Zero-fill-on-demand object. Every page reads as zero until written.
///
/// This crate has no page-frame cache, so "zero-fill" here means handing out
/// a fresh zeroed frame for every distinct page index on first touch and
/// remembering it for subsequent lookups — good enough to exercise the VAS
/// map's contract without a real physical allocator.
pub struct AnonymousObject {
    pages: SpinLock<Vec<Option<Ppn>>>,
}

impl AnonymousObject {
    pub fn new() -> Arc<dyn MemoryObject> {
        Arc::new(AnonymousObject {
            pages: SpinLock::new(Vec::new()),
        })
    }
}

impl MemoryObject for AnonymousObject {
    fn lookup_page(&self, page_index: usize, _will_write: bool) -> Result<PageFrame, MmError> {
        let mut pages = self.pages.lock();
        if pages.len() <= page_index {
            pages.resize(page_index + 1, None);
        }
        let ppn = match pages[page_index] {
            Some(ppn) => ppn,
            None => {
                let ppn = alloc_zeroed_frame()?;
                pages[page_index] = Some(ppn);
                ppn
            }
        };
        Ok(PageFrame::new(ppn))
    }
}

/// Copy-on-write overlay over a `base` object, used for `PRIVATE` mappings
/// and for `fork`'s parent/child shadow-stacking.
///
/// Pages that have been privately written are served from `overlay`; every
/// other page falls through to `base`. Standard shadow-object fork design:
/// both the parent's and the child's region repoint at a fresh shadow over
/// the same base, so neither can dirty the other's view of it.
pub struct ShadowObject {
    base: Arc<dyn MemoryObject>,
    overlay: SpinLock<Vec<Option<Ppn>>>,
}

impl ShadowObject {
    pub fn new(base: Arc<dyn MemoryObject>) -> Arc<dyn MemoryObject> {
        Arc::new(ShadowObject {
            base,
            overlay: SpinLock::new(Vec::new()),
        })
    }
}

impl MemoryObject for ShadowObject {
    fn lookup_page(&self, page_index: usize, will_write: bool) -> Result<PageFrame, MmError> {
        {
            let overlay = self.overlay.lock();
            if let Some(Some(ppn)) = overlay.get(page_index) {
                return Ok(PageFrame::new(*ppn));
            }
        }

        if !will_write {
            return self.base.lookup_page(page_index, false);
        }

        // First private write to this page: copy the base page into a fresh
        // frame and remember it in the overlay.
        let base_frame = self.base.lookup_page(page_index, false)?;
        let new_ppn = alloc_zeroed_frame()?;
        let mut new_frame = PageFrame::new(new_ppn);
        let mut buf = [0u8; PAGE_SIZE];
        unsafe {
            base_frame.read_at(0, &mut buf);
            new_frame.write_at(0, &buf);
        }

        let mut overlay = self.overlay.lock();
        if overlay.len() <= page_index {
            overlay.resize(page_index + 1, None);
        }
        overlay[page_index] = Some(new_ppn);
        Ok(PageFrame::new(new_ppn))
    }

    fn on_region_unlinked(&self) {
        self.base.on_region_unlinked();
    }
}

/// Default [`MemoryObjectFactory`], producing [`AnonymousObject`]/[`ShadowObject`].
pub struct DefaultMemoryObjectFactory;

impl MemoryObjectFactory for DefaultMemoryObjectFactory {
    fn new_anonymous(&self) -> Result<Arc<dyn MemoryObject>, MmError> {
        Ok(AnonymousObject::new())
    }

    fn new_shadow(&self, base: Arc<dyn MemoryObject>) -> Result<Arc<dyn MemoryObject>, MmError> {
        Ok(ShadowObject::new(base))
    }
}

/// Hands out a zeroed physical page.
///
/// A real page-frame cache is out of scope for this subsystem; this crate's
/// boot-time frame source is a bump allocator over the region the linker
/// script reserves for it, which is enough to back the handful of pages a
/// demand-paging test exercises.
fn alloc_zeroed_frame() -> Result<Ppn, MmError> {
    use core::sync::atomic::{AtomicUsize, Ordering};
    unsafe extern "C" {
        fn sframes();
        fn eframes();
    }

    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let base = sframes as usize;
    let limit = eframes as usize;
    let offset = NEXT.fetch_add(PAGE_SIZE, Ordering::Relaxed);
    let addr = base + offset;
    if addr + PAGE_SIZE > limit {
        return Err(MmError::NoMemory);
    }
    unsafe {
        core::ptr::write_bytes(addr as *mut u8, 0, PAGE_SIZE);
    }
    Ok(Ppn::from_addr_floor(Paddr::from_usize(addr)))
}
