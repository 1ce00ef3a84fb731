//! The embeddable editor core.
//!
//! `FlowEditor` ties the document, the schema catalog, the condition model and
//! the external collaborators together and exposes the host contract:
//! `update_node_data`, `get_export_data`, `import_data` and `clear_canvas`.

mod form;
mod notice;

pub use form::*;
pub use notice::*;

use crate::bridge::{EditRequest, NodeEditor, Viewport};
use crate::compiler::{Compiler, ExportBundle, ImportInput, import_graph, write_timestamped};
use crate::condition::PropertyOption;
use crate::config::EditorConfig;
use crate::error::{CompileError, DocumentError};
use crate::graph::{
    Connection, ConnectionRules, EdgeId, GraphDocument, IF_NODE_TYPE, NodeConfig, NodeId, Position,
};
use crate::relation::RelationSearch;
use crate::schema::{FlowTool, SchemaCatalog, ToolSchema};
use std::path::{Path, PathBuf};

/// What is currently selected on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Node(NodeId),
    Edge(EdgeId),
}

/// Outcome of activating (double-clicking) a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// An intrinsic form is open, see [`FlowEditor::session`].
    Form,
    /// The request went to the external editor.
    Delegated,
    /// Editing is delegated but no external editor is registered.
    Unavailable,
}

pub struct FlowEditor {
    document: GraphDocument,
    config: EditorConfig,
    schemas: SchemaCatalog,
    node_editor: Option<Box<dyn NodeEditor>>,
    viewport: Option<Box<dyn Viewport>>,
    selection: Option<Selection>,
    session: Option<EditSession>,
    notices: Vec<Notice>,
}

pub struct FlowEditorBuilder {
    config: EditorConfig,
    node_editor: Option<Box<dyn NodeEditor>>,
    viewport: Option<Box<dyn Viewport>>,
}

impl FlowEditorBuilder {
    pub fn new() -> Self {
        Self {
            config: EditorConfig::default(),
            node_editor: None,
            viewport: None,
        }
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_tools(mut self, tools: Vec<FlowTool>) -> Self {
        self.config.tools = tools;
        self
    }

    pub fn with_properties(mut self, properties: Vec<PropertyOption>) -> Self {
        self.config.properties = properties;
        self
    }

    pub fn with_schemas(mut self, schemas: Vec<ToolSchema>) -> Self {
        self.config.schemas = schemas;
        self
    }

    pub fn with_node_editor(mut self, editor: impl NodeEditor + 'static) -> Self {
        self.node_editor = Some(Box::new(editor));
        self
    }

    pub fn with_viewport(mut self, viewport: impl Viewport + 'static) -> Self {
        self.viewport = Some(Box::new(viewport));
        self
    }

    pub fn delegate_editing(mut self, delegate: bool) -> Self {
        self.config.delegate_editing = delegate;
        self
    }

    pub fn allow_self_loops(mut self, allow: bool) -> Self {
        self.config.allow_self_loops = allow;
        self
    }

    pub fn build(self) -> FlowEditor {
        let mut config = self.config;
        config.properties = config.properties.iter().map(|p| p.normalized()).collect();
        let schemas = SchemaCatalog::new(config.schemas.clone());
        let rules = ConnectionRules {
            allow_self_loops: config.allow_self_loops,
        };

        FlowEditor {
            document: GraphDocument::with_rules(rules),
            config,
            schemas,
            node_editor: self.node_editor,
            viewport: self.viewport,
            selection: None,
            session: None,
            notices: Vec::new(),
        }
    }
}

impl Default for FlowEditorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowEditor {
    pub fn builder() -> FlowEditorBuilder {
        FlowEditorBuilder::new()
    }

    pub fn new(config: EditorConfig) -> Self {
        FlowEditorBuilder::new().with_config(config).build()
    }

    // --- Accessors ---

    pub fn document(&self) -> &GraphDocument {
        &self.document
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tools(&self) -> &[FlowTool] {
        &self.config.tools
    }

    /// Condition properties, normalized to the internal type names.
    pub fn properties(&self) -> &[PropertyOption] {
        &self.config.properties
    }

    pub fn property(&self, property_id: &str) -> Option<&PropertyOption> {
        self.config.properties.iter().find(|p| p.id == property_id)
    }

    pub fn schemas(&self) -> &SchemaCatalog {
        &self.schemas
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut EditSession> {
        self.session.as_mut()
    }

    /// Drains the notices queued since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // --- Canvas gestures ---

    pub fn add_node(
        &mut self,
        node_type: &str,
        label: Option<&str>,
        position: Option<Position>,
    ) -> NodeId {
        self.document.add_node(node_type, label, position)
    }

    /// Drops a palette tool (or the built-in `if`) onto the canvas.
    pub fn add_tool(&mut self, tool_id: &str, position: Option<Position>) -> Option<NodeId> {
        if tool_id == IF_NODE_TYPE {
            return Some(self.document.add_node(IF_NODE_TYPE, None, position));
        }
        let label = self
            .config
            .tools
            .iter()
            .find(|t| t.id == tool_id)
            .map(|t| t.label.clone());
        match label {
            Some(label) => Some(self.document.add_node(tool_id, Some(&label), position)),
            None => {
                log::debug!("Ignoring drop of unknown tool '{}'", tool_id);
                None
            }
        }
    }

    pub fn connect(&mut self, connection: Connection) -> Option<EdgeId> {
        self.document.connect(connection)
    }

    pub fn remove_node(&mut self, node_id: &str) -> Result<(), DocumentError> {
        self.document.remove_node(node_id)?;
        if self.selection == Some(Selection::Node(node_id.to_string())) {
            self.selection = None;
        }
        Ok(())
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> Result<(), DocumentError> {
        self.document.remove_edge(edge_id)?;
        if self.selection == Some(Selection::Edge(edge_id.to_string())) {
            self.selection = None;
        }
        Ok(())
    }

    pub fn select(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Deletes the selected node or edge. Ignored while a form is open.
    pub fn delete_selection(&mut self) -> bool {
        if self.session.is_some() {
            return false;
        }
        match self.selection.take() {
            Some(Selection::Node(id)) => self.document.remove_node(&id).is_ok(),
            Some(Selection::Edge(id)) => self.document.remove_edge(&id).is_ok(),
            None => false,
        }
    }

    // --- Editing ---

    /// Opens the edit surface for a node.
    ///
    /// `if` nodes always get the condition form. Other nodes go to the
    /// external editor when editing is delegated, or get a schema form.
    pub fn activate_node(&mut self, node_id: &str) -> Result<Activation, DocumentError> {
        let node = self
            .document
            .node(node_id)
            .ok_or_else(|| DocumentError::NodeNotFound(node_id.to_string()))?;

        if node.is_branch() {
            let form = ConditionForm::open(node.id.clone(), node.condition(), &self.config.properties);
            self.session = Some(EditSession::Condition(form));
            return Ok(Activation::Form);
        }

        if self.config.delegate_editing {
            let request = EditRequest::for_node(node);
            return Ok(match &self.node_editor {
                Some(editor) => {
                    log::debug!("Delegating edit of node {} ({})", request.node_id, request.node_type);
                    editor.on_edit_node(request);
                    Activation::Delegated
                }
                None => {
                    log::warn!("No external editor registered; node {} left unedited", node_id);
                    self.notices.push(
                        Notice::new(
                            NoticeKind::Info,
                            "Editor unavailable",
                            "No external editor is connected for this step.",
                        )
                        .about(node_id),
                    );
                    Activation::Unavailable
                }
            });
        }

        let sections = self.schemas.resolve(node.node_type());
        let relations = RelationSearch::new(&sections, self.config.relation_debounce());
        self.session = Some(EditSession::Schema(SchemaForm {
            node_id: node.id.clone(),
            label: node.label.clone(),
            sections,
            values: node.config.clone(),
            relations,
        }));
        Ok(Activation::Form)
    }

    /// Commits the open form to the document and closes it.
    pub fn save_configuration(&mut self) -> Result<(), DocumentError> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        match session {
            EditSession::Condition(form) => {
                if let Some(condition) = form.condition() {
                    let label = form.display_text();
                    self.document
                        .set_condition(&form.node_id, &condition, label.as_deref())?;
                }
            }
            EditSession::Schema(form) => {
                self.document
                    .update_node_data(&form.node_id, form.values, Some(&form.label))?;
            }
        }
        Ok(())
    }

    /// Closes the open form without saving.
    pub fn close_configuration(&mut self) {
        self.session = None;
    }

    // --- Host contract ---

    /// Commit path of the external editor.
    pub fn update_node_data(
        &mut self,
        node_id: &str,
        config: NodeConfig,
        label: Option<&str>,
    ) -> Result<(), DocumentError> {
        self.document
            .update_node_data(node_id, config, label)
            .inspect_err(|e| log::warn!("External edit not applied: {}", e))
    }

    /// Validates and exports the document.
    ///
    /// On failure the offending node is selected and focused, a warning notice
    /// is queued and `None` is returned.
    pub fn get_export_data(&mut self) -> Option<ExportBundle> {
        let result = Compiler::builder(&self.document)
            .with_schemas(&self.schemas)
            .with_properties(&self.config.properties)
            .with_start_type(&self.config.start_type)
            .build()
            .export();

        match result {
            Ok(bundle) => Some(bundle),
            Err(CompileError::Validation(e)) => {
                self.selection = Some(Selection::Node(e.node_id.clone()));
                if let Some(viewport) = self.viewport.as_mut() {
                    viewport.focus_node(&e.node_id);
                }
                self.notices
                    .push(Notice::new(NoticeKind::Warning, "Attention", e.message).about(&e.node_id));
                None
            }
            Err(e) => {
                log::warn!("Export failed: {}", e);
                self.notices
                    .push(Notice::new(NoticeKind::Warning, "Error", e.to_string()));
                None
            }
        }
    }

    /// Replaces the document with an imported graph. Nothing changes on failure.
    pub fn import_data(&mut self, input: impl Into<ImportInput>) -> bool {
        match import_graph(input, self.document.rules()) {
            Ok(document) => {
                self.document = document;
                self.selection = None;
                self.session = None;
                if let Some(viewport) = self.viewport.as_mut() {
                    viewport.fit_content();
                }
                self.notices
                    .push(Notice::new(NoticeKind::Success, "Success", "Project imported!"));
                true
            }
            Err(e) => {
                log::warn!("Import rejected: {}", e);
                self.notices
                    .push(Notice::new(NoticeKind::Warning, "Error", "Invalid file."));
                false
            }
        }
    }

    /// Reads a project file and imports it. Read errors leave the document as is.
    pub fn import_file(&mut self, path: &Path) -> bool {
        match ExportBundle::read_file(path) {
            Ok(value) => self.import_data(value),
            Err(e) => {
                log::warn!("{}", e);
                self.notices
                    .push(Notice::new(NoticeKind::Warning, "Error", "Error reading file."));
                false
            }
        }
    }

    /// Writes the visual document (no validation) to a timestamped file in `dir`.
    pub fn save_project(&self, dir: &Path) -> Result<PathBuf, CompileError> {
        let path = write_timestamped(dir, &self.config.export_prefix, &self.document.serialize())?;
        log::info!("Saved project to {}", path.display());
        Ok(path)
    }

    /// Removes every node and edge. Confirmation is the host's concern.
    pub fn clear_canvas(&mut self) {
        log::info!(
            "Clearing canvas ({} node(s), {} edge(s))",
            self.document.len(),
            self.document.edge_count()
        );
        self.document.clear();
        self.selection = None;
        self.session = None;
    }
}
