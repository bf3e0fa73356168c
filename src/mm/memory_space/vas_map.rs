//! The virtual address-space map: the per-process collection of regions,
//! and the operations (`map`, `remove`, `fork`, `read`/`write`,
//! `format_info`) that keep it consistent.

use alloc::sync::Arc;
use core::fmt;

use crate::mm::address::{Address, PageNum, UsizeConvert, Vaddr, Vpn, VpnRange};
use crate::mm::memory_object::{MemoryObject, MemoryObjectFactory, MmError};
use crate::mm::memory_space::region::{Region, VasMapId};
use crate::mm::memory_space::region_store::{Direction, RegionStore, rehome};
use crate::uapi::mm::{MapFlags, ProtFlags};
use crate::vfs::file::{File, MmapRequest};
use crate::{pr_debug, pr_err};

/// A process's virtual address space over `[lo, hi)`.
///
/// The map never allocates or walks hardware page tables (that is the
/// responsibility of a layer above this one, out of scope here); it is
/// purely the bookkeeping of which VPN ranges are backed by which object,
/// under what protection and mapping flags.
pub struct VasMap {
    id: VasMapId,
    store: RegionStore,
    factory: Arc<dyn MemoryObjectFactory>,
}

impl VasMap {
    /// Create an empty map over `[lo, hi)`.
    pub fn create(lo: Vpn, hi: Vpn, factory: Arc<dyn MemoryObjectFactory>) -> Self {
        VasMap {
            id: VasMapId::next(),
            store: RegionStore::new(lo, hi),
            factory,
        }
    }

    pub fn id(&self) -> VasMapId {
        self.id
    }

    /// Tear the map down. Dropping `self` already releases every region's
    /// `Arc<dyn MemoryObject>` reference; this exists as a named operation
    /// to mirror the calling convention the rest of the kernel uses for
    /// explicit teardown points (e.g. process exit).
    pub fn destroy(self) {
        drop(self);
    }

    pub fn find_gap(&self, npages: usize, direction: Direction) -> Option<Vpn> {
        self.store.find_gap(npages, direction)
    }

    pub fn lookup(&self, vpn: Vpn) -> Option<&Region> {
        self.store.lookup(vpn)
    }

    pub fn is_empty_range(&self, start: Vpn, npages: usize) -> bool {
        self.store.is_empty_range(start, npages)
    }

    /// Link a fully-built region into the map, claiming ownership of it.
    pub fn insert(&mut self, mut region: Region) {
        region.set_owner(self.id);
        self.store.insert(region);
    }

    /// Unlink every region overlapping `[lopage, lopage+npages)`, splitting
    /// partially-overlapping regions as needed.
    pub fn remove(&mut self, lopage: Vpn, npages: usize) -> Result<(), MmError> {
        pr_debug!(
            "vas_map: remove [{:#x}, {:#x})",
            lopage.as_usize(),
            lopage.as_usize() + npages
        );
        self.store.remove(lopage, npages).inspect_err(|e| {
            pr_err!("vas_map: remove failed: {}", e);
        })
    }

    /// Establish a new mapping, following the orchestration order: resolve
    /// placement, obtain the backing object, build the region, and only
    /// then remove whatever previously occupied the range.
    ///
    /// `lopage = None` asks the map to pick a placement via `find_gap`
    /// (the Rust-idiomatic replacement for the source's `lopage == 0`
    /// sentinel, since VPN 0 is itself a valid placement in this crate's
    /// window). `lopage = Some(start)` is a hard placement: whatever
    /// already occupies `[start, start+npages)` is removed to make room,
    /// regardless of whether `flags` carries `FIXED` — this layer never
    /// consults that flag.
    #[allow(clippy::too_many_arguments)]
    pub fn map(
        &mut self,
        file: Option<&dyn File>,
        lopage: Option<Vpn>,
        npages: usize,
        prot: ProtFlags,
        flags: MapFlags,
        off_pages: usize,
        direction: Direction,
    ) -> Result<&Region, MmError> {
        pr_debug!(
            "vas_map: map npages={} prot={:?} flags={:?} off_pages={}",
            npages,
            prot,
            flags,
            off_pages
        );
        debug_assert!(flags.is_valid(), "MAP_SHARED/MAP_PRIVATE must be set exclusively");

        let start = match lopage {
            Some(start) => start,
            None => self
                .store
                .find_gap(npages, direction)
                .ok_or(MmError::NoMemory)?,
        };

        self.map_at(file, start, npages, prot, flags, off_pages)
    }

    fn map_at(
        &mut self,
        file: Option<&dyn File>,
        start: Vpn,
        npages: usize,
        prot: ProtFlags,
        flags: MapFlags,
        off_pages: usize,
    ) -> Result<&Region, MmError> {
        let base = match file {
            Some(f) => f
                .mmap(&MmapRequest {
                    npages,
                    off_pages,
                    writable: prot.contains(ProtFlags::WRITE),
                })
                .inspect_err(|e| pr_err!("vas_map: mmap callback failed: {}", e))?,
            None => {
                debug_assert!(flags.contains(MapFlags::ANONYMOUS));
                self.factory.new_anonymous()?
            }
        };

        // PRIVATE mappings get a shadow over the base object so writes
        // never perturb it; SHARED mappings reference the base directly.
        let obj = if flags.contains(MapFlags::PRIVATE) {
            self.factory.new_shadow(base)?
        } else {
            base
        };

        let end = Vpn::from_usize(start.as_usize() + npages);
        let region = Region::new(start, end, off_pages, prot, flags, obj);

        // The only irreversible step: clear whatever previously occupied
        // the range. Everything above this point was fallible and, on
        // failure, left the map untouched.
        self.store.remove(start, npages)?;
        self.insert(region);

        Ok(self.store.lookup(start).expect("region was just inserted"))
    }

    /// Duplicate this map for `fork`: every region is re-homed onto a new
    /// `VasMap`. Private regions get two independent fresh shadow objects
    /// stacked over the same shared base, one per side, so a write through
    /// either parent or child allocates its own overlay page and never
    /// perturbs the other's view. Shared regions keep referencing the same
    /// object directly, since writes through either side should be visible
    /// to both.
    pub fn fork(&mut self, child_factory: Arc<dyn MemoryObjectFactory>) -> Result<Self, MmError> {
        let (lo, hi) = self.store.bounds();
        let mut child = VasMap::create(lo, hi, child_factory);

        // Build every child region and, for private mappings, both fresh
        // shadow objects up front. Nothing mutates `self` until this
        // entirely succeeds, so a failed shadow allocation leaves the
        // parent map untouched.
        let mut plan = alloc::vec::Vec::with_capacity(self.store.regions().len());
        for region in self.store.regions() {
            if region.is_shared() {
                plan.push((rehome(region, Arc::clone(region.obj())), None));
            } else {
                let base = region.obj();
                let parent_shadow = self.factory.new_shadow(Arc::clone(base))?;
                let child_shadow = self.factory.new_shadow(Arc::clone(base))?;
                let child_region = rehome(region, child_shadow);
                plan.push((child_region, Some((region.range(), parent_shadow))));
            }
        }

        for (child_region, parent_update) in plan {
            if let Some((range, parent_shadow)) = parent_update {
                // Re-point the parent's own region at its own fresh shadow.
                self.store.remove(range.start(), range.len())?;
                self.insert(rehome(&child_region, parent_shadow));
            }
            child.insert(child_region);
        }

        Ok(child)
    }

    /// Copy `buf.len()` bytes starting at `vaddr` out of the mapped pages
    /// backing it. `vaddr` need not be page-aligned; the walk crosses
    /// region boundaries transparently as long as every page it touches is
    /// mapped.
    pub fn read(&self, vaddr: Vaddr, buf: &mut [u8]) -> Result<(), MmError> {
        let mut remaining = buf.len();
        let mut cur = vaddr;
        let mut written = 0usize;
        while remaining > 0 {
            let vpn = Vpn::from_addr_floor(cur);
            let region = self.store.lookup(vpn).ok_or(MmError::NotFound)?;
            let page_off = cur.page_offset();
            let chunk = core::cmp::min(remaining, crate::config::PAGE_SIZE - page_off);
            let index = region.obj_index_of(vpn);
            let frame = region.obj().lookup_page(index, false)?;
            unsafe { frame.read_at(page_off, &mut buf[written..written + chunk]) };
            cur = cur.add_by(chunk);
            written += chunk;
            remaining -= chunk;
        }
        Ok(())
    }

    /// Copy `buf` into the mapped pages starting at `vaddr`, marking each
    /// touched page dirty. No protection check: enforcing `prot` is a
    /// layer above this one's job.
    pub fn write(&self, vaddr: Vaddr, buf: &[u8]) -> Result<(), MmError> {
        let mut remaining = buf.len();
        let mut cur = vaddr;
        let mut read = 0usize;
        while remaining > 0 {
            let vpn = Vpn::from_addr_floor(cur);
            let region = self.store.lookup(vpn).ok_or(MmError::NotFound)?;
            let page_off = cur.page_offset();
            let chunk = core::cmp::min(remaining, crate::config::PAGE_SIZE - page_off);
            let index = region.obj_index_of(vpn);
            let mut frame = region.obj().lookup_page(index, true)?;
            unsafe { frame.write_at(page_off, &buf[read..read + chunk]) };
            frame.mark_dirty();
            cur = cur.add_by(chunk);
            read += chunk;
            remaining -= chunk;
        }
        Ok(())
    }

    /// Render the map in the source's column layout:
    /// `VADDR RANGE | PROT | FLAGS | MMOBJ | OFFSET | VFN RANGE`.
    ///
    /// Truncates without overrun once `w` runs out of room (signalled the
    /// only way `fmt::Write` can: a `write_str` that returns `Err` without
    /// having written anything), returning the byte count actually written
    /// rather than propagating the error.
    pub fn format_info(&self, w: &mut dyn fmt::Write) -> Result<usize, fmt::Error> {
        let mut w = CountingWriter { inner: w, count: 0 };

        if writeln!(
            w,
            "{:>21} {:>5} {:>7} {:>8} {:>10} {:>12}",
            "VADDR RANGE", "PROT", "FLAGS", "MMOBJ", "OFFSET", "VFN RANGE"
        )
        .is_err()
        {
            return Ok(w.count);
        }

        for region in self.store.iter() {
            let range = region.range();
            let prot = region.prot();
            let rwx = [
                if prot.contains(ProtFlags::READ) { 'r' } else { '-' },
                if prot.contains(ProtFlags::WRITE) { 'w' } else { '-' },
                if prot.contains(ProtFlags::EXEC) { 'x' } else { '-' },
            ];
            let flags_str = if region.is_shared() { "SHARED" } else { "PRIVATE" };
            let vaddr_start = range.start().start_addr();
            let vaddr_end = range.end().start_addr();
            if writeln!(
                w,
                "{:#010x}-{:#010x}  {}{}{}  {:>7} {:p} {:#07x} {:#07x}-{:#07x}",
                vaddr_start.as_usize(),
                vaddr_end.as_usize(),
                rwx[0],
                rwx[1],
                rwx[2],
                flags_str,
                Arc::as_ptr(region.obj()),
                region.off(),
                range.start().as_usize(),
                range.end().as_usize(),
            )
            .is_err()
            {
                return Ok(w.count);
            }
        }
        Ok(w.count)
    }
}

/// Tallies bytes successfully forwarded to an inner `fmt::Write`, so
/// `format_info` can report how much it actually wrote even when it stops
/// partway through.
struct CountingWriter<'a> {
    inner: &'a mut dyn fmt::Write,
    count: usize,
}

impl fmt::Write for CountingWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_str(s)?;
        self.count += s.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::USER_PAGES;
    use crate::mm::memory_object::DefaultMemoryObjectFactory;
    use crate::{kassert, test_case};

    fn vpn(n: usize) -> Vpn {
        Vpn::from_usize(n)
    }

    fn new_map() -> VasMap {
        VasMap::create(vpn(0), vpn(USER_PAGES), Arc::new(DefaultMemoryObjectFactory))
    }

    test_case!(test_map_anonymous_first_fit_low, {
        let mut map = new_map();
        let region = map
            .map(
                None,
                None,
                10,
                ProtFlags::READ | ProtFlags::WRITE,
                MapFlags::PRIVATE | MapFlags::ANONYMOUS,
                0,
                Direction::LowToHigh,
            )
            .unwrap();
        kassert!(region.range() == VpnRange::new(vpn(0), vpn(10)));
    });

    test_case!(test_map_anonymous_first_fit_high, {
        let mut map = new_map();
        map.map(
            None,
            None,
            10,
            ProtFlags::READ,
            MapFlags::PRIVATE | MapFlags::ANONYMOUS,
            0,
            Direction::HighToLow,
        )
        .unwrap();
        kassert!(map.lookup(vpn(USER_PAGES - 1)).is_some());
        kassert!(map.lookup(vpn(USER_PAGES - 11)).is_none());
    });

    test_case!(test_map_fixed_overwrites_existing, {
        let mut map = new_map();
        map.map(
            None,
            Some(vpn(10)),
            20,
            ProtFlags::READ,
            MapFlags::PRIVATE | MapFlags::ANONYMOUS,
            0,
            Direction::LowToHigh,
        )
        .unwrap();
        map.map(
            None,
            Some(vpn(15)),
            5,
            ProtFlags::READ | ProtFlags::WRITE,
            MapFlags::PRIVATE | MapFlags::ANONYMOUS | MapFlags::FIXED,
            0,
            Direction::LowToHigh,
        )
        .unwrap();

        kassert!(map.lookup(vpn(10)).unwrap().range() == VpnRange::new(vpn(10), vpn(15)));
        kassert!(map.lookup(vpn(15)).unwrap().prot().contains(ProtFlags::WRITE));
        kassert!(map.lookup(vpn(20)).unwrap().range() == VpnRange::new(vpn(20), vpn(30)));
    });

    test_case!(test_map_out_of_space, {
        let mut map = new_map();
        let result = map.map(
            None,
            None,
            USER_PAGES + 1,
            ProtFlags::READ,
            MapFlags::PRIVATE | MapFlags::ANONYMOUS,
            0,
            Direction::LowToHigh,
        );
        kassert!(result.is_err());
    });

    test_case!(test_read_write_roundtrip, {
        let mut map = new_map();
        map.map(
            None,
            Some(vpn(0)),
            1,
            ProtFlags::READ | ProtFlags::WRITE,
            MapFlags::PRIVATE | MapFlags::ANONYMOUS,
            0,
            Direction::LowToHigh,
        )
        .unwrap();

        let vaddr = vpn(0).start_addr();
        let data = [1u8, 2, 3, 4, 5];
        map.write(vaddr, &data).unwrap();

        let mut out = [0u8; 5];
        map.read(vaddr, &mut out).unwrap();
        kassert!(out == data);
    });

    test_case!(test_read_unmapped_is_not_found, {
        let map = new_map();
        let mut out = [0u8; 4];
        let result = map.read(vpn(5).start_addr(), &mut out);
        kassert!(result == Err(MmError::NotFound));
    });

    test_case!(test_fork_private_region_is_cow, {
        let mut parent = new_map();
        parent
            .map(
                None,
                Some(vpn(0)),
                1,
                ProtFlags::READ | ProtFlags::WRITE,
                MapFlags::PRIVATE | MapFlags::ANONYMOUS,
                0,
                Direction::LowToHigh,
            )
            .unwrap();
        let vaddr = vpn(0).start_addr();
        parent.write(vaddr, &[42u8]).unwrap();

        let mut child = parent.fork(Arc::new(DefaultMemoryObjectFactory)).unwrap();

        let mut buf = [0u8; 1];
        child.read(vaddr, &mut buf).unwrap();
        kassert!(buf[0] == 42);

        // Writing through the child must not perturb the parent's view.
        child.write(vaddr, &[7u8]).unwrap();
        let mut parent_buf = [0u8; 1];
        parent.read(vaddr, &mut parent_buf).unwrap();
        kassert!(parent_buf[0] == 42);

        let mut child_buf = [0u8; 1];
        child.read(vaddr, &mut child_buf).unwrap();
        kassert!(child_buf[0] == 7);
    });

    test_case!(test_format_info_header, {
        let map = new_map();
        let mut out = alloc::string::String::new();
        let written = map.format_info(&mut out).unwrap();
        kassert!(out.contains("VADDR RANGE"));
        kassert!(out.contains("VFN RANGE"));
        kassert!(written == out.len());
    });
}
