use std::fmt;

use crate::{block::Pid, region::Region};

/// Upper bound of a reported block. The block reaching the end of the
/// address range is shown as `END`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    At(usize),
    End,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::At(addr) => write!(f, "{addr}"),
            Bound::End => f.write_str("END"),
        }
    }
}

/// One line of a `STAT` report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReport {
    pub lower: usize,
    pub upper: Bound,
    pub owner: Option<Pid>,
}

impl fmt::Display for BlockReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Addresses [{} : {}] ", self.lower, self.upper)?;
        match self.owner {
            Some(pid) => write!(f, "Process {pid}"),
            None => f.write_str("FREE"),
        }
    }
}

/// Usage counters printed after the block list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub used: usize,
    pub free: usize,
    pub largest_free: usize,
    pub free_blocks: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Used {} / Free {} (largest hole {}, {} free block{})",
            self.used,
            self.free,
            self.largest_free,
            self.free_blocks,
            if self.free_blocks == 1 { "" } else { "s" }
        )
    }
}

/// Read-only snapshot of the region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub total_size: usize,
    pub entries: Vec<BlockReport>,
    pub summary: Summary,
}

impl Status {
    pub fn new(total_size: usize, region: Option<&Region>) -> Self {
        let Some(region) = region else {
            return Self {
                total_size,
                entries: Vec::new(),
                summary: Summary { free: total_size, largest_free: total_size, ..Summary::default() },
            };
        };

        let entries = region
            .iter()
            .map(|block| BlockReport {
                lower: block.lower(),
                upper: if block.upper() >= total_size {
                    Bound::End
                } else {
                    Bound::At(block.upper())
                },
                owner: block.owner(),
            })
            .collect();

        Self {
            total_size,
            entries,
            summary: Summary {
                used: region.used_capacity(),
                free: region.free_capacity(),
                largest_free: region.largest_free(),
                free_blocks: region.free_block_count(),
            },
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            writeln!(f, "No blocks allocated yet ({} units free)", self.total_size)?;
            return Ok(());
        }

        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        writeln!(f, "{}", self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::MemoryManager;

    #[test]
    fn tail_block_is_reported_as_end() {
        let mut manager = MemoryManager::new(1000).unwrap();
        manager.request(Pid(1), 300).unwrap();

        let text = manager.status().to_string();

        assert_eq!(
            text,
            "Addresses [0 : 300] Process P1\n\
             Addresses [300 : END] FREE\n\
             Used 300 / Free 700 (largest hole 700, 1 free block)\n"
        );
    }

    #[test]
    fn full_region_ends_with_owner() {
        let mut manager = MemoryManager::new(100).unwrap();
        manager.request(Pid(1), 40).unwrap();
        manager.request(Pid(2), 60).unwrap();

        let status = manager.status();

        assert_eq!(status.entries[1].upper, Bound::End);
        assert_eq!(status.entries[1].to_string(), "Addresses [40 : END] Process P2");
        assert_eq!(status.summary.free_blocks, 0);
    }

    #[test]
    fn uninitialized_region() {
        let status = MemoryManager::new(64).unwrap().status();

        assert!(status.entries.is_empty());
        assert_eq!(status.to_string(), "No blocks allocated yet (64 units free)\n");
    }
}
