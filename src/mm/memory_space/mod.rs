//! A process's virtual address-space map: an ordered set of non-overlapping
//! [`Region`]s between a low and high page bound, plus the fallible
//! operations (`map`, `remove`, `fork`) that keep the set consistent.

mod region;
mod region_store;
mod vas_map;

pub use region::{Region, VasMapId};
pub use region_store::{Direction, RegionStore};
pub use vas_map::VasMap;
