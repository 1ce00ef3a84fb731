//! # Flowforge - Graph-to-Workflow Compilation Engine
//!
//! **Flowforge** is the embeddable core of a visual process editor. Users assemble
//! a business process as a directed graph of typed steps (actions and `if`
//! branches); Flowforge keeps that graph consistent while it is edited and
//! compiles it into a portable [`WorkflowDefinition`](compiler::WorkflowDefinition)
//! for a downstream executor.
//!
//! ## Core Workflow
//!
//! 1.  **Configure**: Describe the palette, the branchable process variables and the
//!     per-type edit forms in an [`EditorConfig`](config::EditorConfig).
//! 2.  **Edit**: Add nodes and connect ports through a [`FlowEditor`](editor::FlowEditor).
//!     Illegal connections are silently refused.
//! 3.  **Export**: `get_export_data` validates the document and returns both the
//!     compiled logic and the visual document, which `import_data` can restore later.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowforge::prelude::*;
//!
//! let mut editor = FlowEditor::builder()
//!     .with_tools(vec![FlowTool::new("send_email", "Send e-mail")])
//!     .with_properties(vec![PropertyOption::new("approved", "Approved?", "bool")])
//!     .build();
//!
//! let check = editor.add_tool("if", None).unwrap();
//! let notify = editor.add_tool("send_email", None).unwrap();
//! editor.connect(Connection::new(&check, "trueOut", &notify, "in"));
//!
//! // The condition of the `if` node has not been authored yet.
//! assert!(editor.get_export_data().is_none());
//!
//! editor.activate_node(&check).unwrap();
//! if let Some(EditSession::Condition(form)) = editor.session_mut() {
//!     let approved = PropertyOption::new("approved", "Approved?", "boolean");
//!     form.select_property(&approved);
//!     form.set_operator("true");
//! }
//! editor.save_configuration().unwrap();
//!
//! let bundle = editor.get_export_data().expect("document is complete");
//! assert_eq!(bundle.logic.start_node_id.as_deref(), Some(check.as_str()));
//! ```

pub mod bridge;
pub mod compiler;
pub mod condition;
pub mod config;
pub mod editor;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod relation;
pub mod schema;
pub mod validation;
