//! The editable graph document: nodes, ports and edges.

pub mod edge;
pub mod node;
pub mod rules;
pub mod snapshot;

pub use edge::*;
pub use node::*;
pub use rules::*;
pub use snapshot::*;

use crate::condition::ConditionData;
use crate::error::DocumentError;
use ahash::AHashMap;
use rand::Rng;

/// Authoritative node and edge collections for one editing session.
///
/// Nodes keep their insertion order; the compiler relies on it to break ties.
#[derive(Debug, Clone, Default)]
pub struct GraphDocument {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index: AHashMap<NodeId, usize>,
    rules: ConnectionRules,
}

impl GraphDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: ConnectionRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub fn rules(&self) -> ConnectionRules {
        self.rules
    }

    // --- Mutations ---

    /// Adds a node with the default port set of its type and an empty config.
    ///
    /// Without a position the node is dropped at a random spot; with one it is
    /// centered on that point.
    pub fn add_node(
        &mut self,
        node_type: &str,
        label: Option<&str>,
        position: Option<Position>,
    ) -> NodeId {
        let position = match position {
            Some(drop) => Position::new(
                drop.x - DEFAULT_NODE_WIDTH / 2.0,
                drop.y - DEFAULT_NODE_HEIGHT / 2.0,
            ),
            None => {
                let mut rng = rand::rng();
                Position::new(
                    100.0 + rng.random_range(0.0..200.0),
                    100.0 + rng.random_range(0.0..200.0),
                )
            }
        };

        let label = match label {
            Some(l) if !l.is_empty() => l.to_string(),
            _ if NodeKind::of(node_type) == NodeKind::Branch => "IF".to_string(),
            _ => node_type.to_string(),
        };

        let id = uuid::Uuid::new_v4().to_string();
        log::debug!("Adding '{}' node {} at ({}, {})", node_type, id, position.x, position.y);
        self.index.insert(id.clone(), self.nodes.len());
        self.nodes
            .push(Node::new(id.clone(), node_type, label, position));
        id
    }

    /// Merges `patch` into the node's config and optionally replaces its label.
    ///
    /// Keys in `patch` overwrite existing values wholesale; nested objects are
    /// not merged.
    pub fn update_node_data(
        &mut self,
        node_id: &str,
        patch: NodeConfig,
        label: Option<&str>,
    ) -> Result<(), DocumentError> {
        let node = self.node_mut(node_id)?;
        for (key, value) in patch {
            node.config.insert(key, value);
        }
        if let Some(label) = label {
            node.label = label.to_string();
        }
        Ok(())
    }

    /// Stores the authored condition of an `if` node.
    pub fn set_condition(
        &mut self,
        node_id: &str,
        condition: &ConditionData,
        label: Option<&str>,
    ) -> Result<(), DocumentError> {
        let mut value = serde_json::json!({
            "propertyId": condition.property_id,
            "operator": condition.operator,
        });
        if let (Some(v), Some(obj)) = (&condition.value, value.as_object_mut()) {
            obj.insert("value".to_string(), v.clone());
        }
        let mut patch = NodeConfig::new();
        patch.insert(CONDITION_KEY.to_string(), value);
        self.update_node_data(node_id, patch, label)
    }

    /// Removes a node together with every edge touching it.
    pub fn remove_node(&mut self, node_id: &str) -> Result<Node, DocumentError> {
        let position = *self
            .index
            .get(node_id)
            .ok_or_else(|| DocumentError::NodeNotFound(node_id.to_string()))?;
        let node = self.nodes.remove(position);
        let before = self.edges.len();
        self.edges.retain(|e| !e.touches(node_id));
        log::debug!(
            "Removed node {} and {} incident edge(s)",
            node_id,
            before - self.edges.len()
        );
        self.reindex();
        Ok(node)
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> Result<Edge, DocumentError> {
        let position = self
            .edges
            .iter()
            .position(|e| e.id == edge_id)
            .ok_or_else(|| DocumentError::EdgeNotFound(edge_id.to_string()))?;
        Ok(self.edges.remove(position))
    }

    /// Materializes `connection` if the connection rules allow it.
    ///
    /// A rejected gesture leaves the document untouched and returns `None`.
    pub fn connect(&mut self, connection: Connection) -> Option<EdgeId> {
        let proposed = self.propose(&connection);
        if let Err(reason) = self.rules.check(&proposed, &self.edges) {
            log::debug!(
                "Rejected connection {}:{} -> {}:{}: {}",
                connection.source.cell,
                connection.source.port,
                connection.target.cell,
                connection.target.port,
                reason
            );
            return None;
        }

        let id = uuid::Uuid::new_v4().to_string();
        self.edges.push(Edge {
            id: id.clone(),
            source: connection.source,
            target: connection.target,
        });
        Some(id)
    }

    /// Resolves the port groups of a connection request.
    pub fn propose(&self, connection: &Connection) -> ProposedEdge {
        ProposedEdge {
            source: self.resolve_port(&connection.source),
            target: self.resolve_port(&connection.target),
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.index.clear();
    }

    // --- Queries ---

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.index.get(node_id).map(|&i| &self.nodes[i])
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, edge_id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == edge_id)
    }

    pub fn outgoing_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source.cell == node_id)
    }

    pub fn incoming_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.target.cell == node_id)
    }

    pub fn port_group(&self, node_id: &str, port_id: &str) -> Option<PortGroup> {
        self.node(node_id)?.port(port_id).map(|p| p.group)
    }

    pub fn condition(&self, node_id: &str) -> Option<ConditionData> {
        self.node(node_id)?.condition()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // --- Internals ---

    fn node_mut(&mut self, node_id: &str) -> Result<&mut Node, DocumentError> {
        let i = *self
            .index
            .get(node_id)
            .ok_or_else(|| DocumentError::NodeNotFound(node_id.to_string()))?;
        Ok(&mut self.nodes[i])
    }

    fn resolve_port(&self, endpoint: &Endpoint) -> Option<PortHandle> {
        self.port_group(&endpoint.cell, &endpoint.port)
            .map(|group| PortHandle {
                endpoint: endpoint.clone(),
                group,
            })
    }

    fn reindex(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
    }
}
