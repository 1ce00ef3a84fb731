use crate::condition::ConditionData;
use serde::{Deserialize, Serialize};

/// Node type of the branching step. Every other type is an action.
pub const IF_NODE_TYPE: &str = "if";

/// Key under which an `if` node stores its [`ConditionData`].
pub const CONDITION_KEY: &str = "conditionData";

pub const DEFAULT_NODE_WIDTH: f64 = 160.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 70.0;

pub type NodeId = String;
pub type PortId = String;

pub type NodeConfig = serde_json::Map<String, serde_json::Value>;

/// Structural role of a node, derived from its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Action,
    Branch,
}

impl NodeKind {
    pub fn of(node_type: &str) -> Self {
        if node_type == IF_NODE_TYPE {
            NodeKind::Branch
        } else {
            NodeKind::Action
        }
    }

    /// The port groups every node of this kind carries, in declaration order.
    pub fn port_groups(&self) -> &'static [PortGroup] {
        match self {
            NodeKind::Action => &[PortGroup::In, PortGroup::Out],
            NodeKind::Branch => &[PortGroup::In, PortGroup::TrueOut, PortGroup::FalseOut],
        }
    }

    pub fn appearance(&self) -> Appearance {
        match self {
            NodeKind::Action => Appearance::Action,
            NodeKind::Branch => Appearance::Decision,
        }
    }
}

/// Directional role of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortGroup {
    In,
    Out,
    TrueOut,
    FalseOut,
}

impl PortGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortGroup::In => "in",
            PortGroup::Out => "out",
            PortGroup::TrueOut => "trueOut",
            PortGroup::FalseOut => "falseOut",
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, PortGroup::In)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: PortId,
    pub group: PortGroup,
}

impl Port {
    fn of_group(group: PortGroup) -> Self {
        Self {
            id: group.as_str().to_string(),
            group,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: DEFAULT_NODE_WIDTH,
            height: DEFAULT_NODE_HEIGHT,
        }
    }
}

/// Styling reference the canvas uses to draw the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Appearance {
    Action,
    Decision,
}

/// A step of the visual workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    node_type: String,
    pub label: String,
    pub position: Position,
    #[serde(default)]
    pub size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance: Option<Appearance>,
    #[serde(default)]
    pub ports: Vec<Port>,
    #[serde(default)]
    pub config: NodeConfig,
}

impl Node {
    pub(crate) fn new(id: NodeId, node_type: &str, label: String, position: Position) -> Self {
        let kind = NodeKind::of(node_type);
        Self {
            id,
            node_type: node_type.to_string(),
            label,
            position,
            size: Size::default(),
            appearance: Some(kind.appearance()),
            ports: kind.port_groups().iter().map(|g| Port::of_group(*g)).collect(),
            config: NodeConfig::new(),
        }
    }

    /// The node type. It cannot change after creation.
    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::of(&self.node_type)
    }

    pub fn is_branch(&self) -> bool {
        self.kind() == NodeKind::Branch
    }

    pub fn port(&self, port_id: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.id == port_id)
    }

    /// Decodes the authored condition of an `if` node, if any.
    pub fn condition(&self) -> Option<ConditionData> {
        self.config
            .get(CONDITION_KEY)
            .filter(|v| v.is_object())
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Fills in defaults for fields older documents may omit and checks the
    /// port set against the node kind.
    pub(crate) fn normalize_ports(&mut self) -> Result<(), String> {
        let kind = self.kind();
        if self.ports.is_empty() {
            self.ports = kind.port_groups().iter().map(|g| Port::of_group(*g)).collect();
        }
        if self.appearance.is_none() {
            self.appearance = Some(kind.appearance());
        }

        let mut groups: Vec<PortGroup> = self.ports.iter().map(|p| p.group).collect();
        let mut expected = kind.port_groups().to_vec();
        groups.sort_by_key(|g| g.as_str());
        expected.sort_by_key(|g| g.as_str());
        if groups != expected {
            return Err(format!(
                "node '{}' of type '{}' has ports [{}]",
                self.id,
                self.node_type,
                groups.iter().map(|g| g.as_str()).collect::<Vec<_>>().join(", ")
            ));
        }
        Ok(())
    }
}
