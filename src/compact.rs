use log::debug;

use crate::{block::Block, error::MemError, region::Region};

/// Summary of a compaction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compaction {
    /// Occupied blocks whose address changed.
    pub moved: usize,
    /// Free blocks that existed before the pass.
    pub reclaimed_fragments: usize,
    /// Capacity of the single free block left at the end.
    pub free_capacity: usize,
}

/// Packs every occupied block at the start of the region and gathers all the
/// free capacity into one block after them.
///
/// ```text
///  before:  | P1 | free | P2 | free | free | P3 | free |
///  after:   | P1 | P2 | P3 |            free           |
/// ```
///
/// The new block list is built in full before it replaces the old one, so
/// the region is never seen half rebuilt. Owners and capacities are kept,
/// only `lower`/`upper` change.
pub fn compact(region: &mut Region) -> Result<Compaction, MemError> {
    let occupied = region.iter().filter(|b| b.is_occupied()).count();

    let mut blocks = Vec::new();
    blocks.try_reserve_exact(occupied + 1)?;

    let mut next_lower = 0;
    let mut free_capacity = 0;
    let mut moved = 0;
    let mut reclaimed_fragments = 0;

    for block in region.iter() {
        if block.is_free() {
            free_capacity += block.capacity();
            reclaimed_fragments += 1;
            continue;
        }

        if block.lower() != next_lower {
            moved += 1;
        }
        let packed = block.moved_to(next_lower);
        next_lower = packed.upper();
        blocks.push(packed);
    }

    // With nothing occupied `next_lower` is 0 and this is the whole region.
    // A full region gets no trailing block at all.
    if free_capacity > 0 {
        blocks.push(Block::free(next_lower, free_capacity));
    }

    debug!(
        "Compaction moved {moved} blocks and merged {reclaimed_fragments} free blocks into {free_capacity} units"
    );

    region.replace(blocks);

    Ok(Compaction { moved, reclaimed_fragments, free_capacity })
}
