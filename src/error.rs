use std::collections::TryReserveError;

use thiserror::Error;

use crate::block::Pid;

/// Failures of the allocation engine. Everything except
/// [`MemError::AllocationFailure`] leaves the region untouched and can be
/// reported back to the user.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MemError {
    #[error("No available space for {requested} units (largest free block is {largest_free}).")]
    OutOfSpace { requested: usize, largest_free: usize },

    #[error("No process with id {0} could be found.")]
    NotFound(Pid),

    #[error("There are currently no processes in memory.")]
    EmptyRegion,

    #[error("Process {0} already owns a block.")]
    DuplicateOwner(Pid),

    #[error("Requested size must be greater than zero.")]
    ZeroSize,

    #[error("The region must span at least one unit.")]
    EmptyRange,

    /// The host could not grow the block list.
    #[error("Host allocation failed while growing the block list: {0}")]
    AllocationFailure(#[from] TryReserveError),
}

impl MemError {
    /// Whether the session can't go on after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MemError::AllocationFailure(_))
    }
}

/// Violations of the region coverage invariant. Only produced by
/// [`crate::region::Region::check_coverage`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoverageError {
    #[error("Block {index} starts at {found}, expected {expected}.")]
    Gap { index: usize, expected: usize, found: usize },

    #[error("Block {index} has upper {upper} but lower {lower} + capacity {capacity}.")]
    BadBounds { index: usize, lower: usize, upper: usize, capacity: usize },

    #[error("Block {index} has zero capacity.")]
    Empty { index: usize },

    #[error("Blocks cover [0, {covered}) but the region is {total} units.")]
    Short { covered: usize, total: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_allocation_failure_is_fatal() {
        let mut v: Vec<u8> = Vec::new();
        let reserve = v.try_reserve(usize::MAX).unwrap_err();

        assert!(MemError::from(reserve).is_fatal());
        assert!(!MemError::EmptyRegion.is_fatal());
        assert!(!MemError::NotFound(Pid(3)).is_fatal());
        assert!(!MemError::OutOfSpace { requested: 10, largest_free: 2 }.is_fatal());
    }

    #[test]
    fn messages_name_the_process() {
        assert_eq!(
            MemError::NotFound(Pid(7)).to_string(),
            "No process with id P7 could be found."
        );
    }
}
