//! Ordered container of non-overlapping regions and the private
//! gap-search / splitter algorithms that operate over it.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::mm::address::{PageNum, UsizeConvert, Vpn, VpnRange};
use crate::mm::memory_object::{MemoryObject, MmError};
use crate::mm::memory_space::region::Region;

/// Direction `find_gap` searches in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Return the lowest VPN of the first sufficient gap.
    LowToHigh,
    /// Return the highest VPN g such that `[g, g+npages)` fits a gap.
    HighToLow,
}

/// Sorted-by-start, non-overlapping list of regions covering part of one
/// address-space window. A plain `Vec` rather than a tree: a user window of
/// `USER_PAGES` pages never needs faster than O(n) lookups.
pub struct RegionStore {
    regions: Vec<Region>,
    lo: Vpn,
    hi: Vpn,
}

impl RegionStore {
    pub fn new(lo: Vpn, hi: Vpn) -> Self {
        debug_assert!(lo < hi);
        RegionStore {
            regions: Vec::new(),
            lo,
            hi,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Sequential scan for the region containing `vpn`, if any.
    pub fn lookup(&self, vpn: Vpn) -> Option<&Region> {
        debug_assert!(vpn >= self.lo && vpn < self.hi);
        self.regions.iter().find(|r| r.range().contains(vpn))
    }

    /// True if no region overlaps `[start, start+npages)`. A zero-length
    /// query is vacuously empty, matching the source's
    /// `vmmap_is_range_empty`.
    pub fn is_empty_range(&self, start: Vpn, npages: usize) -> bool {
        if npages == 0 {
            return true;
        }
        let target = VpnRange::new(start, Vpn::from_usize(start.as_usize() + npages));
        !self.regions.iter().any(|r| r.range().overlaps(&target))
    }

    /// First-fit search for a run of `npages` free VPNs within `[lo, hi)`.
    fn gaps(&self) -> Vec<(Vpn, Vpn)> {
        let mut gaps = Vec::new();
        let mut cursor = self.lo;
        for r in self.regions.iter() {
            if r.range().start() > cursor {
                gaps.push((cursor, r.range().start()));
            }
            cursor = r.range().end();
        }
        if cursor < self.hi {
            gaps.push((cursor, self.hi));
        }
        gaps
    }

    pub fn find_gap(&self, npages: usize, direction: Direction) -> Option<Vpn> {
        if npages == 0 {
            return None;
        }
        let gaps = self.gaps();
        match direction {
            Direction::LowToHigh => gaps
                .iter()
                .find(|(lo, hi)| hi.as_usize() - lo.as_usize() >= npages)
                .map(|(lo, _)| *lo),
            Direction::HighToLow => gaps
                .iter()
                .rev()
                .find(|(lo, hi)| hi.as_usize() - lo.as_usize() >= npages)
                .map(|(_, hi)| Vpn::from_usize(hi.as_usize() - npages)),
        }
    }

    /// Insert `region` keeping the store sorted by start VPN. Caller is
    /// responsible for the region not overlapping any existing one; checked
    /// with `debug_assert!` rather than returning a `Result`, since a caller
    /// that violates this has already broken the store's core invariant.
    pub fn insert(&mut self, region: Region) {
        let pos = self
            .regions
            .partition_point(|r| r.range().start() < region.range().start());
        debug_assert!(
            pos == 0 || self.regions[pos - 1].range().end() <= region.range().start()
        );
        debug_assert!(
            pos == self.regions.len() || self.regions[pos].range().start() >= region.range().end()
        );
        self.regions.insert(pos, region);
    }

    /// The four-case splitter: unlink/shrink every region that overlaps
    /// `[lopage, lopage+npages)`.
    ///
    /// Per the calling contract, the only fallible step is allocating the
    /// left-half region in the interior-cut case; it is attempted before any
    /// region is mutated so a failure leaves the store unchanged.
    pub fn remove(&mut self, lopage: Vpn, npages: usize) -> Result<(), MmError> {
        if npages == 0 {
            return Ok(());
        }
        let target = VpnRange::new(lopage, Vpn::from_usize(lopage.as_usize() + npages));
        let r_start = target.start();
        let r_end = target.end();

        let mut i = 0;
        while i < self.regions.len() {
            if !self.regions[i].range().overlaps(&target) {
                i += 1;
                continue;
            }
            let v_start = self.regions[i].range().start();
            let v_end = self.regions[i].range().end();
            let left = v_start < r_start;
            let right = v_end > r_end;

            match (left, right) {
                (true, true) => {
                    // Interior cut: V splits into [v_start, r_start) and
                    // [r_end, v_end). Allocate the left half first; on
                    // failure V is untouched.
                    self.regions
                        .try_reserve(1)
                        .map_err(|_| MmError::OutOfSpace)?;
                    let left_half = self.regions[i].clone_left_half(r_start);
                    self.regions[i].shrink_from_left(r_end);
                    self.regions.insert(i, left_half);
                    i += 2;
                }
                (true, false) => {
                    // Right overlap: truncate V's tail.
                    self.regions[i].truncate_end(r_start);
                    i += 1;
                }
                (false, true) => {
                    // Left overlap: truncate V's head.
                    self.regions[i].shrink_from_left(r_end);
                    i += 1;
                }
                (false, false) => {
                    // Engulfed: unlink entirely.
                    let removed = self.regions.remove(i);
                    removed.obj().on_region_unlinked();
                }
            }
        }
        Ok(())
    }

    /// Deep-ish clone for `fork`: every region is re-homed to the child,
    /// sharing `obj` via `Arc::clone` so the caller can decide (per mapping
    /// type) whether to CoW-wrap it before re-inserting.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn bounds(&self) -> (Vpn, Vpn) {
        (self.lo, self.hi)
    }
}

/// Helper shared with `VasMap::fork`: clone a region's identity (range,
/// off, prot, flags) onto a new backing object.
pub fn rehome(region: &Region, obj: Arc<dyn MemoryObject>) -> Region {
    Region::new(
        region.range().start(),
        region.range().end(),
        region.off(),
        region.prot(),
        region.flags(),
        obj,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mm::memory_object::AnonymousObject;
    use crate::uapi::mm::{MapFlags, ProtFlags};
    use crate::{kassert, test_case};

    fn vpn(n: usize) -> Vpn {
        Vpn::from_usize(n)
    }

    fn region(start: usize, end: usize) -> Region {
        Region::new(
            vpn(start),
            vpn(end),
            0,
            ProtFlags::READ,
            MapFlags::PRIVATE,
            AnonymousObject::new(),
        )
    }

    const USER_PAGES: usize = 1024;

    test_case!(test_find_gap_empty_map, {
        let store = RegionStore::new(vpn(0), vpn(USER_PAGES));
        kassert!(store.find_gap(5, Direction::LowToHigh) == Some(vpn(0)));
        kassert!(store.find_gap(5, Direction::HighToLow) == Some(vpn(USER_PAGES - 5)));
    });

    test_case!(test_find_gap_first_fit_scenario, {
        let mut store = RegionStore::new(vpn(0), vpn(USER_PAGES));
        store.insert(region(10, 20));
        store.insert(region(30, 40));

        kassert!(store.find_gap(5, Direction::LowToHigh) == Some(vpn(0)));
        kassert!(store.find_gap(15, Direction::LowToHigh) == Some(vpn(20)));
        kassert!(store.find_gap(5, Direction::HighToLow) == Some(vpn(USER_PAGES - 5)));
        kassert!(store.find_gap(15, Direction::HighToLow) == Some(vpn(USER_PAGES - 15)));
    });

    test_case!(test_find_gap_no_fit, {
        let mut store = RegionStore::new(vpn(0), vpn(20));
        store.insert(region(0, 20));
        kassert!(store.find_gap(1, Direction::LowToHigh) == None);
    });

    test_case!(test_is_empty_range, {
        let mut store = RegionStore::new(vpn(0), vpn(USER_PAGES));
        store.insert(region(10, 20));
        kassert!(store.is_empty_range(vpn(0), 10));
        kassert!(!store.is_empty_range(vpn(5), 10));
        kassert!(store.is_empty_range(vpn(20), 0));
    });

    test_case!(test_lookup, {
        let mut store = RegionStore::new(vpn(0), vpn(USER_PAGES));
        store.insert(region(10, 20));
        kassert!(store.lookup(vpn(15)).is_some());
        kassert!(store.lookup(vpn(20)).is_none());
        kassert!(store.lookup(vpn(9)).is_none());
    });

    test_case!(test_remove_interior_cut, {
        let mut store = RegionStore::new(vpn(0), vpn(USER_PAGES));
        store.insert(region(10, 30));
        store.remove(vpn(15), 5).unwrap();
        kassert!(store.regions().len() == 2);
        kassert!(store.regions()[0].range() == VpnRange::new(vpn(10), vpn(15)));
        kassert!(store.regions()[1].range() == VpnRange::new(vpn(20), vpn(30)));
    });

    test_case!(test_remove_right_overlap, {
        let mut store = RegionStore::new(vpn(0), vpn(USER_PAGES));
        store.insert(region(10, 30));
        store.remove(vpn(20), 20).unwrap();
        kassert!(store.regions().len() == 1);
        kassert!(store.regions()[0].range() == VpnRange::new(vpn(10), vpn(20)));
    });

    test_case!(test_remove_left_overlap, {
        let mut store = RegionStore::new(vpn(0), vpn(USER_PAGES));
        store.insert(region(10, 30));
        store.remove(vpn(0), 20).unwrap();
        kassert!(store.regions().len() == 1);
        kassert!(store.regions()[0].range() == VpnRange::new(vpn(20), vpn(30)));
        kassert!(store.regions()[0].off() == 10);
    });

    test_case!(test_remove_engulfed, {
        let mut store = RegionStore::new(vpn(0), vpn(USER_PAGES));
        store.insert(region(10, 20));
        store.remove(vpn(0), 100).unwrap();
        kassert!(store.is_empty());
    });

    test_case!(test_remove_spans_multiple_regions, {
        let mut store = RegionStore::new(vpn(0), vpn(USER_PAGES));
        store.insert(region(10, 20));
        store.insert(region(25, 35));
        store.insert(region(40, 50));
        store.remove(vpn(15), 30).unwrap();
        kassert!(store.regions().len() == 2);
        kassert!(store.regions()[0].range() == VpnRange::new(vpn(10), vpn(15)));
        kassert!(store.regions()[1].range() == VpnRange::new(vpn(45), vpn(50)));
    });
}
