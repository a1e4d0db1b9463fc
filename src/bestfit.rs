use log::debug;

use crate::{
    block::{Block, Pid},
    error::MemError,
    region::Region,
};

/// Outcome of a successful request, describing the block handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub pid: Pid,
    pub lower: usize,
    pub upper: usize,
    pub capacity: usize,
    /// Whether the chosen block was bigger than the request and had to be
    /// split in two.
    pub split: bool,
}

/// Returns the index of the [`Block`] where `size` units should go.
///
/// This is the scan pass of the best-fit algorithm: among all free blocks
/// that can hold `size`, we want the one with the smallest capacity. When
/// several blocks share that capacity the one with the lowest address wins.
pub fn best_fit(region: &Region, size: usize) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;

    for (index, block) in region.iter().enumerate() {
        if !block.fits(size) {
            continue;
        }

        // Strictly smaller only, so ties keep the earlier block.
        match best {
            Some((_, capacity)) if capacity <= block.capacity() => {}
            _ => best = Some((index, block.capacity())),
        }
    }

    best.map(|(index, _)| index)
}

/// Gives `size` units to `pid`.
///
/// The chosen block is either converted in place when it is an exact fit, or
/// split in two: the allocated prefix and a free remainder right after it.
///
/// ```text
///  before:  | ... |        free (c)        | ... |
///  after:   | ... | pid (s) | free (c - s) | ... |
/// ```
///
/// Exactly one block is modified. On error the region is left unchanged.
pub fn allocate(region: &mut Region, pid: Pid, size: usize) -> Result<Allocation, MemError> {
    if size == 0 {
        return Err(MemError::ZeroSize);
    }

    if region.find_owner(pid).is_some() {
        return Err(MemError::DuplicateOwner(pid));
    }

    let Some(index) = best_fit(region, size) else {
        return Err(MemError::OutOfSpace {
            requested: size,
            largest_free: region.largest_free(),
        });
    };

    let capacity = region.blocks()[index].capacity();
    debug!("Best fit for {pid} ({size}) is block {index} with capacity {capacity}");

    let split = capacity != size;
    if split {
        region.split_at(index, size)?;
    }

    let block = region.block_mut(index);
    block.assign(pid);

    Ok(describe(pid, block, split))
}

fn describe(pid: Pid, block: &Block, split: bool) -> Allocation {
    Allocation {
        pid,
        lower: block.lower(),
        upper: block.upper(),
        capacity: block.capacity(),
        split,
    }
}
