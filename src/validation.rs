//! Pre-export completeness checks.
//!
//! Walks the document in node order and stops at the first incomplete node.

use crate::condition::{PropertyOption, PropertyType, is_boolean_operator};
use crate::error::ValidationError;
use crate::graph::{GraphDocument, Node};
use crate::schema::SchemaCatalog;
use serde_json::Value;

/// Node type of the start sentinel. Sentinels are always valid.
pub const DEFAULT_START_TYPE: &str = "start";

/// `true` for values a required field must not hold: missing, `null`, `""`
/// or an empty list.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

pub struct Validator<'a> {
    schemas: &'a SchemaCatalog,
    properties: &'a [PropertyOption],
    start_type: &'a str,
}

impl<'a> Validator<'a> {
    pub fn new(schemas: &'a SchemaCatalog, properties: &'a [PropertyOption]) -> Self {
        Self {
            schemas,
            properties,
            start_type: DEFAULT_START_TYPE,
        }
    }

    pub fn with_start_type(mut self, start_type: &'a str) -> Self {
        self.start_type = start_type;
        self
    }

    pub fn validate(&self, document: &GraphDocument) -> Result<(), ValidationError> {
        for node in document.nodes() {
            if let Err(e) = self.validate_node(node) {
                log::warn!("Validation failed on node {}: {}", e.node_id, e.message);
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn validate_node(&self, node: &Node) -> Result<(), ValidationError> {
        if node.node_type() == self.start_type {
            return Ok(());
        }
        if node.is_branch() {
            self.validate_condition(node)
        } else {
            self.validate_required_fields(node)
        }
    }

    fn validate_condition(&self, node: &Node) -> Result<(), ValidationError> {
        let condition = match node.condition() {
            Some(c) if !c.property_id.is_empty() && !c.operator.is_empty() => c,
            _ => return Err(fail(node, "Configure the IF rule.")),
        };

        let boolean_property = self
            .properties
            .iter()
            .find(|p| p.id == condition.property_id)
            .is_some_and(|p| p.property_type() == PropertyType::Boolean);

        if !condition.has_value() && !boolean_property && !is_boolean_operator(&condition.operator)
        {
            return Err(fail(node, "Condition value is required."));
        }
        Ok(())
    }

    fn validate_required_fields(&self, node: &Node) -> Result<(), ValidationError> {
        for field in self.schemas.required_fields(node.node_type()) {
            if is_blank(node.config.get(&field.property)) {
                return Err(fail(node, &format!("Field \"{}\" is required.", field.label)));
            }
        }
        Ok(())
    }
}

fn fail(node: &Node, message: &str) -> ValidationError {
    ValidationError {
        node_id: node.id.clone(),
        message: message.to_string(),
    }
}
