use thiserror::Error;

use crate::{Lcid, NodeId, SynIndex, Thread};

/// Errors raised by the connection layer while records are delivered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// No synapse model with this index exists on the thread
    #[error("Thread {tid} has no synapse model {syn_index}")]
    UnknownSynapse {
        tid: Thread,
        syn_index: SynIndex,
    },

    /// The connection addressed by a spike does not exist
    #[error("Thread {tid} has no connection {lcid} for synapse model {syn_index}")]
    UnknownConnection {
        tid: Thread,
        syn_index: SynIndex,
        lcid: Lcid,
    },

    /// A target record names a source node that cannot be resolved
    #[error("Thread {tid} cannot resolve target for source node {gid}")]
    UnresolvableTarget {
        tid: Thread,
        gid: NodeId,
    },
}
