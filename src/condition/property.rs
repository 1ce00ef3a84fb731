use serde::{Deserialize, Serialize};
use std::fmt;

/// The internal type system used to pick comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    #[default]
    String,
    Number,
    Date,
    Boolean,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Number => "number",
            PropertyType::Date => "date",
            PropertyType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const NUMERIC_MARKERS: [&str; 6] = ["int", "decimal", "double", "float", "byte", "long"];

/// Classifies a foreign type name (e.g. a database or CLR column type) into a
/// [`PropertyType`].
///
/// Matching is case-insensitive and substring based. Numeric markers win over
/// date markers, and anything unrecognised falls back to `String`.
pub fn normalize_type(foreign: &str) -> PropertyType {
    let lowered = foreign.to_lowercase();
    if lowered.is_empty() {
        return PropertyType::String;
    }
    if NUMERIC_MARKERS.iter().any(|m| lowered.contains(m)) {
        PropertyType::Number
    } else if lowered.contains("date") || lowered.contains("time") {
        PropertyType::Date
    } else if lowered.contains("bool") {
        PropertyType::Boolean
    } else {
        PropertyType::String
    }
}

/// A process variable that can be tested by a branch condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyOption {
    pub id: String,
    pub label: String,
    /// The foreign type name as supplied by the host. Normalized lazily through
    /// [`PropertyOption::property_type`].
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_type: Option<String>,
}

impl PropertyOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            type_name: type_name.into(),
            original_type: None,
        }
    }

    pub fn property_type(&self) -> PropertyType {
        normalize_type(&self.type_name)
    }

    /// Returns a copy whose `type` is one of the internal type names, keeping the
    /// foreign name in `original_type`.
    pub fn normalized(&self) -> Self {
        let property_type = self.property_type();
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            type_name: property_type.as_str().to_string(),
            original_type: self
                .original_type
                .clone()
                .or_else(|| Some(self.type_name.clone())),
        }
    }
}
