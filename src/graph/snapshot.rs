use super::{Edge, GraphDocument, Node};
use super::rules::ConnectionRules;
use crate::error::ImportError;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// The full visual document: everything needed to rebuild an editing session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphDocument {
    pub fn serialize(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    /// Rebuilds a document under the default connection rules.
    pub fn deserialize(snapshot: GraphSnapshot) -> Result<Self, ImportError> {
        Self::from_snapshot(snapshot, ConnectionRules::default())
    }

    /// Rebuilds a document, checking every structural invariant the mutation
    /// API would have enforced.
    pub fn from_snapshot(
        snapshot: GraphSnapshot,
        rules: ConnectionRules,
    ) -> Result<Self, ImportError> {
        let mut document = GraphDocument::with_rules(rules);

        let mut seen = AHashSet::new();
        for mut node in snapshot.nodes {
            if node.id.is_empty() {
                return Err(ImportError::Shape("node without an id".to_string()));
            }
            if !seen.insert(node.id.clone()) {
                return Err(ImportError::DuplicateNode(node.id));
            }
            node.normalize_ports().map_err(ImportError::Shape)?;
            document.index.insert(node.id.clone(), document.nodes.len());
            document.nodes.push(node);
        }

        let mut edge_ids = AHashSet::new();
        for edge in snapshot.edges {
            if edge.id.is_empty() {
                return Err(ImportError::Shape("edge without an id".to_string()));
            }
            if !edge_ids.insert(edge.id.clone()) {
                return Err(ImportError::DuplicateEdge(edge.id));
            }
            for end in [&edge.source, &edge.target] {
                let node = document
                    .node(&end.cell)
                    .ok_or_else(|| ImportError::UnknownNode {
                        edge_id: edge.id.clone(),
                        node_id: end.cell.clone(),
                    })?;
                if node.port(&end.port).is_none() {
                    return Err(ImportError::UnknownPort {
                        edge_id: edge.id.clone(),
                        node_id: end.cell.clone(),
                        port_id: end.port.clone(),
                    });
                }
            }

            let proposed = document.propose(&super::Connection {
                source: edge.source.clone(),
                target: edge.target.clone(),
            });
            if rules.check(&proposed, &document.edges).is_err() {
                return Err(ImportError::IllegalEdge { edge_id: edge.id });
            }
            document.edges.push(edge);
        }

        Ok(document)
    }
}
