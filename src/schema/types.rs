use serde::{Deserialize, Serialize};

/// A draggable palette entry defining a node type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowTool {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl FlowTool {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            color: None,
        }
    }
}

/// Primitive input kinds a schema field can render as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Select,
    Boolean,
    Textarea,
    Date,
    /// Server-backed lookup, see [`crate::relation`].
    Relation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: serde_json::Value,
    pub label: String,
}

/// One editable configuration entry of a node type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolField {
    /// Stable key under which the value is stored in the node config.
    pub property: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Static choices for `select` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    /// Entity searched by `relation` fields.
    #[serde(rename = "class", default, skip_serializing_if = "Option::is_none")]
    pub relation_class: Option<String>,
    /// Extra filter forwarded with every relation search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ToolField {
    pub fn new(property: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            property: property.into(),
            label: label.into(),
            field_type,
            required: false,
            placeholder: None,
            options: None,
            relation_class: None,
            filter: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_relation(mut self, class: impl Into<String>) -> Self {
        self.relation_class = Some(class.into());
        self
    }
}

/// A titled, independently expandable group of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSection {
    pub title: String,
    #[serde(default)]
    pub fields: Vec<ToolField>,
    #[serde(default)]
    pub expanded: bool,
}

/// The editable form of one node type: either flat `fields` or grouped `sections`.
/// When both are present `sections` wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<ToolField>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<ToolSection>>,
}

impl ToolSchema {
    pub fn with_fields(node_type: impl Into<String>, fields: Vec<ToolField>) -> Self {
        Self {
            node_type: node_type.into(),
            fields: Some(fields),
            sections: None,
        }
    }

    pub fn with_sections(node_type: impl Into<String>, sections: Vec<ToolSection>) -> Self {
        Self {
            node_type: node_type.into(),
            fields: None,
            sections: Some(sections),
        }
    }

    /// Iterates every field of the schema in display order.
    pub fn all_fields(&self) -> Box<dyn Iterator<Item = &ToolField> + '_> {
        match (&self.sections, &self.fields) {
            (Some(sections), _) => Box::new(sections.iter().flat_map(|s| s.fields.iter())),
            (None, Some(fields)) => Box::new(fields.iter()),
            (None, None) => Box::new(std::iter::empty()),
        }
    }
}
