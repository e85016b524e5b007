use crate::{error::ConfigError, NodeId, NodeLocator, Rank, Thread};

/// Placement of virtual processes on ranks and threads.
///
/// Nodes are dealt round-robin over virtual processes (`gid mod num_vps`),
/// virtual processes round-robin over ranks (`vp mod num_ranks`), and
/// `vp / num_ranks` is the thread hosting the virtual process on its rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VpLayout {
    num_ranks: usize,
    num_threads: usize,
    rank: Rank,
}

impl VpLayout {
    pub fn try_new(num_ranks: usize, num_threads: usize, rank: Rank) -> Result<Self, ConfigError> {
        if num_ranks == 0 {
            return Err(ConfigError::ZeroRanks);
        }
        if num_threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        if rank >= num_ranks {
            return Err(ConfigError::RankOutOfRange { rank, num_ranks });
        }
        Ok(Self {
            num_ranks,
            num_threads,
            rank,
        })
    }

    pub fn num_ranks(&self) -> usize {
        self.num_ranks
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn num_virtual_processes(&self) -> usize {
        self.num_ranks * self.num_threads
    }

    pub fn vp_of(&self, gid: NodeId) -> usize {
        (gid % self.num_virtual_processes() as NodeId) as usize
    }

    pub fn rank_of_vp(&self, vp: usize) -> Rank {
        vp % self.num_ranks
    }

    pub fn thread_of_vp(&self, vp: usize) -> Thread {
        vp / self.num_ranks
    }

    pub fn vp_of_thread(&self, tid: Thread) -> usize {
        tid * self.num_ranks + self.rank
    }

    pub fn is_vp_local(&self, vp: usize) -> bool {
        self.rank_of_vp(vp) == self.rank
    }

}

impl NodeLocator for VpLayout {
    fn num_threads(&self) -> usize {
        self.num_threads
    }

    fn process_id_of(&self, gid: NodeId) -> Rank {
        self.rank_of_vp(self.vp_of(gid))
    }

    fn local_thread_of(&self, gid: NodeId) -> Option<Thread> {
        let vp = self.vp_of(gid);
        if self.is_vp_local(vp) {
            Some(self.thread_of_vp(vp))
        } else {
            None
        }
    }
}
