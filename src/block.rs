use std::fmt;

/// Identifier of a simulated process. Displayed as `P<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pid(pub u32);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// This is the structure of a block. A block is a half-open span of the
/// simulated address range, either free or owned by a process.
///
/// ```text
///   lower                               upper
///     |                                   |
///     v                                   v
///     +-----------------------------------+
///     |   owner (Some(pid) or None/free)  |
///     +-----------------------------------+
///     <------------ capacity ------------->
/// ```
///
/// `upper` is always `lower + capacity`. The fields are private so the only
/// way to change a block is through methods that keep that true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// First address of the block (inclusive).
    lower: usize,
    /// End-of-range marker (exclusive).
    upper: usize,
    /// Size of the block in address units.
    capacity: usize,
    /// Process occupying the block. `None` means the block is free.
    owner: Option<Pid>,
}

impl Block {
    pub fn new(owner: Option<Pid>, lower: usize, capacity: usize) -> Self {
        Self {
            lower,
            upper: lower + capacity,
            capacity,
            owner,
        }
    }

    #[inline]
    pub fn free(lower: usize, capacity: usize) -> Self {
        Self::new(None, lower, capacity)
    }

    #[inline]
    pub fn occupied(pid: Pid, lower: usize, capacity: usize) -> Self {
        Self::new(Some(pid), lower, capacity)
    }

    #[inline]
    pub fn lower(&self) -> usize {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> usize {
        self.upper
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn owner(&self) -> Option<Pid> {
        self.owner
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.owner.is_none()
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.owner.is_some()
    }

    /// Whether a request of `size` units can be placed in this block.
    #[inline]
    pub fn fits(&self, size: usize) -> bool {
        self.is_free() && self.capacity >= size
    }

    /// Hands the block over to `pid`. Bounds are untouched.
    pub(crate) fn assign(&mut self, pid: Pid) {
        self.owner = Some(pid);
    }

    /// Marks the block as free again. Bounds are untouched, the block is
    /// never merged with its neighbours here.
    pub(crate) fn release(&mut self) {
        self.owner = None;
    }

    /// Shrinks the block to `capacity` units, keeping `lower`, and returns
    /// the free block covering what was cut off.
    pub(crate) fn shrink_to(&mut self, capacity: usize) -> Block {
        debug_assert!(capacity < self.capacity);

        let remainder = self.capacity - capacity;
        self.capacity = capacity;
        self.upper = self.lower + capacity;

        Block::free(self.upper, remainder)
    }

    /// Same block moved so it starts at `lower`.
    pub(crate) fn moved_to(&self, lower: usize) -> Block {
        Block::new(self.owner, lower, self.capacity)
    }
}
