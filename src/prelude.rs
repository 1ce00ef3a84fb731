//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the flowforge crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowforge::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let config = EditorConfig::from_file("path/to/editor.json")?;
//! let mut editor = FlowEditor::new(config);
//!
//! let graph_json = std::fs::read_to_string("path/to/graph.json")?;
//! if editor.import_data(graph_json) {
//!     if let Some(bundle) = editor.get_export_data() {
//!         println!("{}", bundle.to_json_pretty()?);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Editor facade and collaborators
pub use crate::bridge::{EditRequest, NodeEditor, Viewport};
pub use crate::config::EditorConfig;
pub use crate::editor::{
    Activation, ConditionForm, EditSession, FlowEditor, Notice, NoticeKind, SchemaForm, Selection,
};

// Document model
pub use crate::graph::{
    Connection, ConnectionRules, Edge, Endpoint, GraphDocument, GraphSnapshot, Node, NodeConfig,
    PortGroup, Position, is_connection_allowed,
};

// Compilation
pub use crate::compiler::{
    Compiler, ExportBundle, ImportInput, WorkflowDefinition, WorkflowNode, import_graph,
};
pub use crate::validation::Validator;

// Conditions and schemas
pub use crate::condition::{
    ConditionData, Operator, PropertyOption, PropertyType, normalize_type, operators_for,
};
pub use crate::schema::{FieldType, FlowTool, SchemaCatalog, ToolField, ToolSchema, ToolSection};

// Error types
pub use crate::error::{CompileError, ConfigError, DocumentError, ImportError, ValidationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
