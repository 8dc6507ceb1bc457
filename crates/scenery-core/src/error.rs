//! Error taxonomy for rejected commands.
//!
//! Every variant is reported before anything is written, so a rejected
//! command never leaves a partially edited model behind.

use crate::id::NodeId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The referenced node does not exist.
    #[error("node {0} not found")]
    NotFound(NodeId),

    /// The requested parent exists but is not an assembly.
    #[error("{0} is not an assembly and cannot hold children")]
    InvalidTarget(NodeId),

    /// Disallowed by policy (e.g. deleting or moving the root).
    #[error("cannot {action} {id}")]
    Forbidden { id: NodeId, action: &'static str },

    /// Moving `node` under `target` would make a node its own descendant.
    #[error("moving {node} under {target} would create a cycle")]
    CycleRejected { node: NodeId, target: NodeId },
}
