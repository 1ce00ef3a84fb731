use thiserror::Error;

/// Errors raised by direct mutations of a `GraphDocument`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Node '{0}' not found in the document")]
    NodeNotFound(String),

    #[error("Edge '{0}' not found in the document")]
    EdgeNotFound(String),
}

/// A single completeness failure reported by the validation engine.
///
/// Validation is fail-fast, so at most one of these is produced per run. The
/// `node_id` is the node the caller should focus.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Node '{node_id}' is incomplete: {message}")]
pub struct ValidationError {
    pub node_id: String,
    pub message: String,
}

/// Errors that can occur while compiling a document into a `WorkflowDefinition`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Expected exactly one entry node, found {}: [{}]", .candidates.len(), .candidates.join(", "))]
    AmbiguousEntry { candidates: Vec<String> },

    #[error("Failed to serialize export data: {0}")]
    Serialization(String),

    #[error("Could not write '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors that can occur when importing a persisted graph.
///
/// An import either succeeds completely or reports one of these and leaves the
/// current document untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    #[error("Failed to parse graph JSON: {0}")]
    Parse(String),

    #[error("Payload does not look like a graph: {0}")]
    Shape(String),

    #[error("Node id '{0}' appears more than once")]
    DuplicateNode(String),

    #[error("Edge id '{0}' appears more than once")]
    DuplicateEdge(String),

    #[error("Edge '{edge_id}' references unknown node '{node_id}'")]
    UnknownNode { edge_id: String, node_id: String },

    #[error("Edge '{edge_id}' references unknown port '{port_id}' on node '{node_id}'")]
    UnknownPort {
        edge_id: String,
        node_id: String,
        port_id: String,
    },

    #[error("Edge '{edge_id}' is not a legal connection")]
    IllegalEdge { edge_id: String },

    #[error("Could not read '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors that can occur when loading an `EditorConfig`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config JSON: {0}")]
    Parse(String),
}
