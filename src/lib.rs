//! Simulation of a single contiguous address range managed with the
//! best-fit strategy.
//!
//! The range is a [`region::Region`]: an ordered list of [`block::Block`]
//! that are either free or owned by a process. On top of it we have three
//! operations:
//!
//! - [`bestfit::allocate`]: give a process the smallest free block that can
//!   hold its request, splitting it if it is bigger.
//! - [`release::release`]: mark the block of a process as free again.
//! - [`compact::compact`]: pack every occupied block at the start and merge
//!   all the free space in a single block at the end.
//!
//! [`manager::MemoryManager`] owns the region for a session and is what the
//! interactive [`shell`] drives.

pub mod bestfit;
pub mod block;
pub mod command;
pub mod compact;
pub mod config;
pub mod error;
pub mod manager;
pub mod region;
pub mod release;
pub mod report;
pub mod shell;

pub use block::{Block, Pid};
pub use error::MemError;
pub use manager::MemoryManager;
pub use region::Region;
