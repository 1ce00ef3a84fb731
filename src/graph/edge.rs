use super::node::{NodeId, PortGroup, PortId};
use serde::{Deserialize, Serialize};

pub type EdgeId = String;

/// One end of an edge: a port on a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub cell: NodeId,
    pub port: PortId,
}

impl Endpoint {
    pub fn new(cell: impl Into<NodeId>, port: impl Into<PortId>) -> Self {
        Self {
            cell: cell.into(),
            port: port.into(),
        }
    }
}

/// A directed link from an output port to an input port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: Endpoint,
    pub target: Endpoint,
}

impl Edge {
    /// `true` when this edge joins exactly the given ports.
    pub fn joins(&self, source: &Endpoint, target: &Endpoint) -> bool {
        self.source == *source && self.target == *target
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source.cell == node_id || self.target.cell == node_id
    }
}

/// A user's request to connect two ports, as produced by a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub source: Endpoint,
    pub target: Endpoint,
}

impl Connection {
    pub fn new(
        source_node: impl Into<NodeId>,
        source_port: impl Into<PortId>,
        target_node: impl Into<NodeId>,
        target_port: impl Into<PortId>,
    ) -> Self {
        Self {
            source: Endpoint::new(source_node, source_port),
            target: Endpoint::new(target_node, target_port),
        }
    }
}

/// A port end whose group has been resolved against the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortHandle {
    pub endpoint: Endpoint,
    pub group: PortGroup,
}

/// A connection whose ports may or may not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedEdge {
    pub source: Option<PortHandle>,
    pub target: Option<PortHandle>,
}
