//! Export and import between the graph document and the compiled workflow.

use crate::condition::PropertyOption;
use crate::error::CompileError;
use crate::graph::{CONDITION_KEY, GraphDocument, Node, NodeConfig, PortGroup};
use crate::schema::SchemaCatalog;
use crate::validation::{DEFAULT_START_TYPE, Validator};
use itertools::Itertools;

mod bundle;
mod definition;
mod import;
mod linker;

pub use bundle::*;
pub use definition::*;
pub use import::*;

use linker::Linker;

pub struct Compiler<'a> {
    document: &'a GraphDocument,
    schemas: Option<&'a SchemaCatalog>,
    properties: &'a [PropertyOption],
    start_type: &'a str,
    strict_entry: bool,
}

pub struct CompilerBuilder<'a> {
    document: &'a GraphDocument,
    schemas: Option<&'a SchemaCatalog>,
    properties: &'a [PropertyOption],
    start_type: &'a str,
    strict_entry: bool,
}

impl<'a> CompilerBuilder<'a> {
    pub fn new(document: &'a GraphDocument) -> Self {
        Self {
            document,
            schemas: None,
            properties: &[],
            start_type: DEFAULT_START_TYPE,
            strict_entry: false,
        }
    }

    /// Schemas whose required fields gate the export.
    pub fn with_schemas(mut self, schemas: &'a SchemaCatalog) -> Self {
        self.schemas = Some(schemas);
        self
    }

    /// Properties used to decide whether a condition needs a value.
    pub fn with_properties(mut self, properties: &'a [PropertyOption]) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_start_type(mut self, start_type: &'a str) -> Self {
        self.start_type = start_type;
        self
    }

    /// Rejects documents that do not have exactly one node without incoming
    /// edges instead of picking the first one.
    pub fn strict_entry(mut self, strict: bool) -> Self {
        self.strict_entry = strict;
        self
    }

    pub fn build(self) -> Compiler<'a> {
        Compiler {
            document: self.document,
            schemas: self.schemas,
            properties: self.properties,
            start_type: self.start_type,
            strict_entry: self.strict_entry,
        }
    }
}

impl<'a> Compiler<'a> {
    pub fn builder(document: &'a GraphDocument) -> CompilerBuilder<'a> {
        CompilerBuilder::new(document)
    }

    /// Validates the document and compiles it into a `WorkflowDefinition`.
    pub fn compile(&self) -> Result<WorkflowDefinition, CompileError> {
        // 1. Completeness gate
        let empty = SchemaCatalog::default();
        Validator::new(self.schemas.unwrap_or(&empty), self.properties)
            .with_start_type(self.start_type)
            .validate(self.document)?;

        // 2. Steps and successor links
        let linker = Linker::new(self.document);
        let nodes = self
            .document
            .nodes()
            .iter()
            .map(|node| self.compile_node(node, &linker))
            .collect();

        // 3. Entry point
        let start_node_id = self.resolve_entry(&linker)?;

        Ok(WorkflowDefinition {
            start_node_id,
            nodes,
        })
    }

    /// Compiles the logic and pairs it with the full visual document.
    pub fn export(&self) -> Result<ExportBundle, CompileError> {
        let logic = self.compile()?;
        log::info!(
            "Exported workflow with {} step(s), starting at {:?}",
            logic.nodes.len(),
            logic.start_node_id
        );
        Ok(ExportBundle {
            logic,
            graph: self.document.serialize(),
        })
    }

    fn compile_node(&self, node: &Node, linker: &Linker<'_>) -> WorkflowNode {
        let mut compiled = WorkflowNode {
            id: node.id.clone(),
            node_type: node.node_type().to_string(),
            label: Some(node.label.clone()).filter(|l| !l.is_empty()),
            config: NodeConfig::new(),
            next: None,
            next_true: None,
            next_false: None,
        };

        if node.is_branch() {
            compiled.config = node
                .config
                .get(CONDITION_KEY)
                .and_then(|v| v.as_object())
                .cloned()
                .unwrap_or_default();
            compiled.next_true = linker.successor(&node.id, PortGroup::TrueOut);
            compiled.next_false = linker.successor(&node.id, PortGroup::FalseOut);
        } else {
            compiled.config = node.config.clone();
            compiled.next = linker.successor(&node.id, PortGroup::Out);
        }
        compiled
    }

    fn resolve_entry(&self, linker: &Linker<'_>) -> Result<Option<String>, CompileError> {
        let candidates = linker.entry_candidates();
        if candidates.len() != 1 {
            if self.strict_entry {
                return Err(CompileError::AmbiguousEntry {
                    candidates: candidates.iter().map(|c| c.to_string()).collect(),
                });
            }
            if !self.document.is_empty() {
                log::warn!(
                    "Expected one entry node, found {} [{}]; using the first",
                    candidates.len(),
                    candidates.iter().join(", ")
                );
            }
        }
        Ok(candidates.first().map(|id| id.to_string()))
    }
}
