use log::{debug, info, warn};

use crate::{
    bestfit::{self, Allocation},
    block::{Block, Pid},
    compact::{self, Compaction},
    error::MemError,
    region::Region,
    report::Status,
};

/// The state of one simulation session. This is what the command loop
/// talks to: it owns the [`Region`] and hands it to the best-fit allocator,
/// the release routine and the compactor.
///
/// The region is created lazily, on the first request, as a single free
/// block spanning `[0, total_size)`. Until then there is nothing to release
/// or compact.
#[derive(Debug)]
pub struct MemoryManager {
    /// Size of the simulated address range, fixed for the session.
    total_size: usize,
    /// Block list, `None` until the first request.
    region: Option<Region>,
}

impl MemoryManager {
    /// Fails with [`MemError::EmptyRange`] when `total_size` is 0.
    pub fn new(total_size: usize) -> Result<Self, MemError> {
        if total_size == 0 {
            return Err(MemError::EmptyRange);
        }

        Ok(Self { total_size, region: None })
    }

    #[inline]
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    #[inline]
    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    /// `RQ`: allocates `size` units to `pid` with best fit.
    pub fn request(&mut self, pid: Pid, size: usize) -> Result<Allocation, MemError> {
        let region = match self.region {
            Some(ref mut region) => region,
            None => {
                debug!("Creating region of {} units", self.total_size);
                self.region.insert(Region::new(self.total_size)?)
            }
        };

        match bestfit::allocate(region, pid, size) {
            Ok(allocation) => {
                info!(
                    "Allocated [{} : {}] to {pid}{}",
                    allocation.lower,
                    allocation.upper,
                    if allocation.split { " (split)" } else { "" }
                );
                Ok(allocation)
            }
            Err(e) => {
                warn!("Request of {size} units for {pid} failed: {e}");
                Err(e)
            }
        }
    }

    /// `RL`: frees the block owned by `pid`.
    pub fn release(&mut self, pid: Pid) -> Result<Block, MemError> {
        let Some(region) = self.region.as_mut() else {
            warn!("Release of {pid} before any request");
            return Err(MemError::EmptyRegion);
        };

        let block = crate::release::release(region, pid).inspect_err(|e| warn!("{e}"))?;
        info!("Released [{} : {}] from {pid}", block.lower(), block.upper());

        Ok(block)
    }

    /// `C`: compacts the region. Compacting before the first request does
    /// nothing.
    pub fn compact(&mut self) -> Result<Option<Compaction>, MemError> {
        let Some(region) = self.region.as_mut() else {
            debug!("Nothing to compact yet");
            return Ok(None);
        };

        let summary = compact::compact(region)?;
        info!(
            "Compacted region, {} units free in one block",
            summary.free_capacity
        );

        Ok(Some(summary))
    }

    /// `STAT`: snapshot of every block in address order.
    pub fn status(&self) -> Status {
        Status::new(self.total_size, self.region.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_size_is_rejected() {
        assert!(matches!(MemoryManager::new(0), Err(MemError::EmptyRange)));
    }

    #[test]
    fn region_is_created_on_first_request() {
        let mut manager = MemoryManager::new(1000).unwrap();
        assert!(manager.region().is_none());

        manager.request(Pid(1), 300).unwrap();

        let region = manager.region().unwrap();
        assert_eq!(region.blocks(), &[Block::occupied(Pid(1), 0, 300), Block::free(300, 700)]);
    }

    #[test]
    fn release_before_request_is_empty_region() {
        let mut manager = MemoryManager::new(1000).unwrap();

        assert_eq!(manager.release(Pid(1)), Err(MemError::EmptyRegion));
        assert!(manager.region().is_none());
    }

    #[test]
    fn release_of_unknown_pid_is_not_found() {
        let mut manager = MemoryManager::new(1000).unwrap();
        manager.request(Pid(1), 10).unwrap();

        assert_eq!(manager.release(Pid(2)), Err(MemError::NotFound(Pid(2))));
    }

    #[test]
    fn compact_before_request_is_a_no_op() {
        let mut manager = MemoryManager::new(1000).unwrap();

        assert_eq!(manager.compact(), Ok(None));
        assert!(manager.region().is_none());
    }

    #[test]
    fn failed_first_request_still_creates_region() {
        let mut manager = MemoryManager::new(100).unwrap();

        assert!(matches!(manager.request(Pid(1), 101), Err(MemError::OutOfSpace { .. })));
        assert_eq!(manager.region().unwrap().blocks(), &[Block::free(0, 100)]);
    }
}
