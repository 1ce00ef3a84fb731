//! Hand-off of node editing to an external collaborator.
//!
//! The exchange is two explicit calls: the editor sends an [`EditRequest`]
//! outward through [`NodeEditor::on_edit_node`], and the collaborator later
//! commits through `FlowEditor::update_node_data` with the same node id. If it
//! never commits, the node is left as it was.

use crate::graph::{Node, NodeConfig, NodeId};

/// Everything the collaborator needs to present its own editing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct EditRequest {
    pub node_id: NodeId,
    pub node_type: String,
    pub label: String,
    pub current_config: NodeConfig,
}

impl EditRequest {
    pub fn for_node(node: &Node) -> Self {
        Self {
            node_id: node.id.clone(),
            node_type: node.node_type().to_string(),
            label: node.label.clone(),
            current_config: node.config.clone(),
        }
    }
}

/// Implemented by hosts that edit node configuration themselves.
pub trait NodeEditor {
    fn on_edit_node(&self, request: EditRequest);
}

impl<F> NodeEditor for F
where
    F: Fn(EditRequest),
{
    fn on_edit_node(&self, request: EditRequest) {
        self(request)
    }
}

/// Canvas operations the editor needs from the rendering substrate.
///
/// The default implementations do nothing, so headless hosts can ignore it.
pub trait Viewport {
    /// Re-fits the view after the whole document changed.
    fn fit_content(&mut self) {}

    /// Centers and highlights a node, e.g. after a validation failure.
    fn focus_node(&mut self, _node_id: &str) {}
}
