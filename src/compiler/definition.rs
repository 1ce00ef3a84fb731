use crate::graph::NodeConfig;
use serde::{Deserialize, Serialize};

/// One executor-facing step of a compiled workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub config: NodeConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_true: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_false: Option<String>,
}

impl WorkflowNode {
    /// `true` when the step has no successor at all.
    pub fn is_terminal(&self) -> bool {
        self.next.is_none() && self.next_true.is_none() && self.next_false.is_none()
    }
}

/// The compiled, purely logical form of a graph document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    pub start_node_id: Option<String>,
    pub nodes: Vec<WorkflowNode>,
}

impl WorkflowDefinition {
    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn start_node(&self) -> Option<&WorkflowNode> {
        self.start_node_id.as_deref().and_then(|id| self.node(id))
    }
}
