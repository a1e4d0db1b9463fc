use crate::{
    block::{Block, Pid},
    error::MemError,
    region::Region,
};

/// Frees the block owned by `pid` and returns a copy of it as it is now.
///
/// Only the first block owned by `pid` is touched. The block keeps its
/// bounds and is *not* merged with free neighbours: free space only gets
/// coalesced by [`crate::compact::compact`].
pub fn release(region: &mut Region, pid: Pid) -> Result<Block, MemError> {
    let index = region.find_owner(pid).ok_or(MemError::NotFound(pid))?;

    let block = region.block_mut(index);
    block.release();

    Ok(block.clone())
}
