use super::{ToolField, ToolSchema, ToolSection};
use ahash::AHashMap;

/// Title of the implicit section synthesized for flat schemas.
pub const DEFAULT_SECTION_TITLE: &str = "General";

/// Resolves the sections that drive a node type's edit form.
///
/// Declared sections are returned verbatim, a flat field list is wrapped in one
/// expanded "General" section, and an unknown type yields no sections.
pub fn resolve(node_type: &str, schemas: &[ToolSchema]) -> Vec<ToolSection> {
    schemas
        .iter()
        .find(|s| s.node_type == node_type)
        .map(sections_of)
        .unwrap_or_default()
}

fn sections_of(schema: &ToolSchema) -> Vec<ToolSection> {
    match (&schema.sections, &schema.fields) {
        (Some(sections), _) => sections.clone(),
        (None, Some(fields)) => vec![ToolSection {
            title: DEFAULT_SECTION_TITLE.to_string(),
            fields: fields.clone(),
            expanded: true,
        }],
        (None, None) => Vec::new(),
    }
}

/// Schemas indexed by node type.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    schemas: Vec<ToolSchema>,
    index: AHashMap<String, usize>,
}

impl SchemaCatalog {
    pub fn new(schemas: Vec<ToolSchema>) -> Self {
        let mut catalog = Self::default();
        for schema in schemas {
            catalog.insert(schema);
        }
        catalog
    }

    /// Adds or replaces the schema for `schema.node_type`.
    pub fn insert(&mut self, schema: ToolSchema) {
        match self.index.get(&schema.node_type) {
            Some(&slot) => self.schemas[slot] = schema,
            None => {
                self.index
                    .insert(schema.node_type.clone(), self.schemas.len());
                self.schemas.push(schema);
            }
        }
    }

    pub fn get(&self, node_type: &str) -> Option<&ToolSchema> {
        self.index.get(node_type).map(|&i| &self.schemas[i])
    }

    pub fn resolve(&self, node_type: &str) -> Vec<ToolSection> {
        self.get(node_type).map(sections_of).unwrap_or_default()
    }

    /// Fields marked `required`, in display order.
    pub fn required_fields(&self, node_type: &str) -> Vec<&ToolField> {
        self.get(node_type)
            .map(|s| s.all_fields().filter(|f| f.required).collect())
            .unwrap_or_default()
    }

    pub fn field(&self, node_type: &str, property: &str) -> Option<&ToolField> {
        self.get(node_type)?
            .all_fields()
            .find(|f| f.property == property)
    }

    pub fn schemas(&self) -> &[ToolSchema] {
        &self.schemas
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
