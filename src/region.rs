use std::slice;

use crate::{
    block::{Block, Pid},
    error::{CoverageError, MemError},
};

/// The simulated address range `[0, total_size)` as an ordered sequence of
/// [`Block`].
///
/// Blocks are kept in ascending address order, with no gaps and no overlaps,
/// so together they cover the whole range exactly once:
///
/// ```text
/// 0                                                          total_size
/// +-----------+---------------+--------+-------------------------+
/// |  P1 (300) |   free (120)  | P3 (80)|        free (500)       |
/// +-----------+---------------+--------+-------------------------+
///  blocks[0]     blocks[1]     blocks[2]        blocks[3]
/// ```
///
/// Blocks are addressed by position, so splitting a block is an insert right
/// after its index. Every insertion reserves room first with
/// [`Vec::try_reserve`], so a host allocation failure is reported as
/// [`MemError::AllocationFailure`] instead of aborting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Size of the simulated address range.
    total_size: usize,
    /// Blocks of the region in address order.
    blocks: Vec<Block>,
}

impl Region {
    /// Creates a region made of a single free block spanning all of it.
    pub fn new(total_size: usize) -> Result<Self, MemError> {
        if total_size == 0 {
            return Err(MemError::EmptyRange);
        }

        let mut blocks = Vec::new();
        blocks.try_reserve(1)?;
        blocks.push(Block::free(0, total_size));

        Ok(Self { total_size, blocks })
    }

    #[inline]
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Panics if `index` is out of bounds, like slice indexing.
    #[inline]
    pub(crate) fn block_mut(&mut self, index: usize) -> &mut Block {
        &mut self.blocks[index]
    }

    pub fn iter(&self) -> slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Index of the first block owned by `pid`.
    pub fn find_owner(&self, pid: Pid) -> Option<usize> {
        self.blocks.iter().position(|block| block.owner() == Some(pid))
    }

    /// Shrinks the block at `index` to `size` units and inserts a free block
    /// with the remainder right after it. Returns the index of the new block.
    ///
    /// The caller must make sure `size` is smaller than the block capacity.
    pub(crate) fn split_at(&mut self, index: usize, size: usize) -> Result<usize, MemError> {
        // Reserve before touching the block so a failure leaves us intact.
        self.blocks.try_reserve(1)?;

        let remainder = self.blocks[index].shrink_to(size);
        self.blocks.insert(index + 1, remainder);

        Ok(index + 1)
    }

    /// Swaps in a fully built block list at once.
    pub(crate) fn replace(&mut self, blocks: Vec<Block>) -> Vec<Block> {
        std::mem::replace(&mut self.blocks, blocks)
    }

    pub fn free_capacity(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_free()).map(Block::capacity).sum()
    }

    pub fn used_capacity(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_occupied()).map(Block::capacity).sum()
    }

    /// Capacity of the biggest free block, 0 if everything is taken.
    pub fn largest_free(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| b.is_free())
            .map(Block::capacity)
            .max()
            .unwrap_or(0)
    }

    /// Number of free blocks, i.e. how fragmented the free space is.
    pub fn free_block_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_free()).count()
    }

    /// Checks that the blocks partition `[0, total_size)` exactly.
    pub fn check_coverage(&self) -> Result<(), CoverageError> {
        let mut expected = 0;

        for (index, block) in self.blocks.iter().enumerate() {
            if block.lower() != expected {
                return Err(CoverageError::Gap { index, expected, found: block.lower() });
            }
            if block.upper() != block.lower() + block.capacity() {
                return Err(CoverageError::BadBounds {
                    index,
                    lower: block.lower(),
                    upper: block.upper(),
                    capacity: block.capacity(),
                });
            }
            if block.capacity() == 0 {
                return Err(CoverageError::Empty { index });
            }
            expected = block.upper();
        }

        if expected != self.total_size {
            return Err(CoverageError::Short { covered: expected, total: self.total_size });
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a Region {
    type Item = &'a Block;
    type IntoIter = slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
