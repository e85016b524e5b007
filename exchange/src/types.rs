/// Index of a worker thread (virtual process slot) within one rank
pub type Thread = usize;
/// Index of a participating process
pub type Rank = usize;
/// Simulation steps since the start of the run
pub type Step = u64;
/// A delay expressed in simulation steps
pub type Delay = u32;
/// Global identifier of a simulated node
pub type NodeId = u64;
/// Identifier of a synapse model
pub type SynIndex = u16;
/// Local connection id within one (thread, synapse model) connector
pub type Lcid = u32;
