//! A single contiguous, homogeneously-protected span of a VAS map.

use alloc::sync::Arc;
use core::fmt;

use crate::mm::address::{PageNum, UsizeConvert, Vpn, VpnRange};
use crate::mm::memory_object::MemoryObject;
use crate::uapi::mm::{MapFlags, ProtFlags};

/// Opaque handle identifying the `VasMap` a `Region` belongs to.
///
/// A `Copy` index/generation pair instead of a raw pointer or `Weak<_>`:
/// `Region` never needs to dereference its owner, only to compare against
/// it (the "every linked region's owner matches its containing map"
/// invariant), so a comparable token is all the contract asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VasMapId(u64);

impl VasMapId {
    pub(super) fn next() -> Self {
        use core::sync::atomic::{AtomicU64, Ordering};
        static NEXT: AtomicU64 = AtomicU64::new(1);
        VasMapId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// One mapped span: `[start, end)` VPNs, backed by `off`..`off+len` pages of
/// `obj`, with uniform `prot`/`flags` over the whole span.
pub struct Region {
    start: Vpn,
    end: Vpn,
    /// Offset, in pages, into `obj` where this region's backing begins.
    off: usize,
    prot: ProtFlags,
    flags: MapFlags,
    obj: Arc<dyn MemoryObject>,
    owner: Option<VasMapId>,
}

impl Region {
    pub fn new(
        start: Vpn,
        end: Vpn,
        off: usize,
        prot: ProtFlags,
        flags: MapFlags,
        obj: Arc<dyn MemoryObject>,
    ) -> Self {
        debug_assert!(start < end, "region must be non-empty");
        Region {
            start,
            end,
            off,
            prot,
            flags,
            obj,
            owner: None,
        }
    }

    pub fn range(&self) -> VpnRange {
        VpnRange::new(self.start, self.end)
    }

    pub fn off(&self) -> usize {
        self.off
    }

    pub fn prot(&self) -> ProtFlags {
        self.prot
    }

    pub fn flags(&self) -> MapFlags {
        self.flags
    }

    pub fn obj(&self) -> &Arc<dyn MemoryObject> {
        &self.obj
    }

    pub fn owner(&self) -> Option<VasMapId> {
        self.owner
    }

    pub(super) fn set_owner(&mut self, id: VasMapId) {
        self.owner = Some(id);
    }

    /// Page index into `obj` that backs `vpn`, which must fall in `range()`.
    pub fn obj_index_of(&self, vpn: Vpn) -> usize {
        debug_assert!(self.range().contains(vpn));
        (vpn.as_usize() - self.start.as_usize()) + self.off
    }

    /// Case 3 (left overlap) and the left half of case 1 (interior cut):
    /// move the start of the region forward, adjusting `off` to match.
    pub(super) fn shrink_from_left(&mut self, new_start: Vpn) {
        debug_assert!(new_start > self.start && new_start <= self.end);
        self.off += new_start.as_usize() - self.start.as_usize();
        self.start = new_start;
    }

    /// Case 2 (right overlap): move the end of the region backward. `off`
    /// and `start` are untouched since the region keeps its left edge.
    pub(super) fn truncate_end(&mut self, new_end: Vpn) {
        debug_assert!(new_end >= self.start && new_end < self.end);
        self.end = new_end;
    }

    /// Used by the case-1 splitter to carve off the left half `[start, mid)`
    /// before `self` is shrunk down to `[mid, end)`.
    pub(super) fn clone_left_half(&self, mid: Vpn) -> Self {
        debug_assert!(mid > self.start && mid < self.end);
        Region {
            start: self.start,
            end: mid,
            off: self.off,
            prot: self.prot,
            flags: self.flags,
            obj: Arc::clone(&self.obj),
            owner: self.owner,
        }
    }

    pub fn is_shared(&self) -> bool {
        self.flags.contains(MapFlags::SHARED)
    }
}

impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("off", &self.off)
            .field("prot", &self.prot)
            .field("flags", &self.flags)
            .finish()
    }
}
