use serde::{Deserialize, Serialize};

/// The authored rule of an `if` node, stored under `conditionData` in its config.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionData {
    #[serde(default)]
    pub property_id: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl ConditionData {
    pub fn new(property_id: impl Into<String>, operator: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
            operator: operator.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: serde_json::Value) -> Self {
        self.value = Some(value);
        self
    }

    /// `true` when a value was authored. `null` and `""` count as missing.
    pub fn has_value(&self) -> bool {
        match &self.value {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }
}
