use crate::compiler::DEFAULT_EXPORT_PREFIX;
use crate::condition::PropertyOption;
use crate::error::ConfigError;
use crate::relation::DEFAULT_DEBOUNCE;
use crate::schema::{FlowTool, ToolSchema};
use crate::validation::DEFAULT_START_TYPE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

/// Host-supplied editor configuration, loadable from JSON.
///
/// Every member is optional in the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Palette entries, in display order.
    pub tools: Vec<FlowTool>,
    /// Process variables available to branch conditions.
    pub properties: Vec<PropertyOption>,
    pub schemas: Vec<ToolSchema>,
    pub start_type: String,
    /// Route non-`if` nodes to the external editor instead of the schema form.
    pub delegate_editing: bool,
    pub allow_self_loops: bool,
    pub relation_debounce_ms: u64,
    pub export_prefix: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tools: Vec::new(),
            properties: Vec::new(),
            schemas: Vec::new(),
            start_type: DEFAULT_START_TYPE.to_string(),
            delegate_editing: true,
            allow_self_loops: true,
            relation_debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn relation_debounce(&self) -> Duration {
        Duration::from_millis(self.relation_debounce_ms)
    }
}
