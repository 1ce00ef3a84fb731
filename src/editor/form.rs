use crate::condition::{
    ConditionData, Operator, PropertyOption, PropertyType, operator_label, operators_for,
};
use crate::graph::{NodeConfig, NodeId};
use crate::relation::{LabelRequest, RelationItem, RelationSearch};
use crate::schema::ToolSection;
use serde_json::Value;

/// The edit surface currently open in the editor.
#[derive(Debug, Clone)]
pub enum EditSession {
    Condition(ConditionForm),
    Schema(SchemaForm),
}

impl EditSession {
    pub fn node_id(&self) -> &str {
        match self {
            EditSession::Condition(form) => &form.node_id,
            EditSession::Schema(form) => &form.node_id,
        }
    }
}

/// Rule editor of an `if` node.
#[derive(Debug, Clone)]
pub struct ConditionForm {
    pub node_id: NodeId,
    property: Option<PropertyOption>,
    operators: &'static [Operator],
    operator: String,
    value: Option<Value>,
}

impl ConditionForm {
    /// Opens the form, restoring a previously authored condition when its
    /// property is still known.
    pub(crate) fn open(
        node_id: NodeId,
        existing: Option<ConditionData>,
        properties: &[PropertyOption],
    ) -> Self {
        let mut form = Self {
            node_id,
            property: None,
            operators: &[],
            operator: String::new(),
            value: None,
        };

        if let Some(condition) = existing {
            if let Some(property) = properties.iter().find(|p| p.id == condition.property_id) {
                form.select_property(property);
                form.operator = condition.operator;
                form.value = condition.value;
            }
        }
        form
    }

    /// Picks the tested property. Resets the operator and value.
    pub fn select_property(&mut self, property: &PropertyOption) {
        self.operators = operators_for(property.property_type());
        self.property = Some(property.clone());
        self.operator.clear();
        self.value = None;
    }

    pub fn property(&self) -> Option<&PropertyOption> {
        self.property.as_ref()
    }

    /// Operators legal for the selected property.
    pub fn operators(&self) -> &'static [Operator] {
        self.operators
    }

    pub fn set_operator(&mut self, operator_id: &str) {
        self.operator = operator_id.to_string();
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn set_value(&mut self, value: Value) {
        self.value = Some(value);
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// The authored condition, once both property and operator are chosen.
    pub fn condition(&self) -> Option<ConditionData> {
        let property = self.property.as_ref()?;
        if self.operator.is_empty() {
            return None;
        }
        Some(ConditionData {
            property_id: property.id.clone(),
            operator: self.operator.clone(),
            value: self.value.clone(),
        })
    }

    /// Canvas label summarizing the rule, e.g. `"Order total\n> 100"`.
    pub fn display_text(&self) -> Option<String> {
        let property = self.property.as_ref()?;
        let property_type = property.property_type();
        let op_label = operator_label(property_type, &self.operator)?;

        let mut text = format!("{}\n{}", property.label, op_label);
        if property_type != PropertyType::Boolean {
            if let Some(value) = &self.value {
                text.push(' ');
                match value {
                    Value::String(s) => text.push_str(s),
                    other => text.push_str(&other.to_string()),
                }
            }
        }
        Some(text)
    }
}

/// Schema-driven form of an action node.
#[derive(Debug, Clone)]
pub struct SchemaForm {
    pub node_id: NodeId,
    pub label: String,
    pub sections: Vec<ToolSection>,
    pub values: NodeConfig,
    pub relations: RelationSearch,
}

impl SchemaForm {
    pub fn set_value(&mut self, property: &str, value: Value) {
        self.values.insert(property.to_string(), value);
    }

    pub fn value(&self, property: &str) -> Option<&Value> {
        self.values.get(property)
    }

    pub fn toggle_section(&mut self, index: usize) {
        if let Some(section) = self.sections.get_mut(index) {
            section.expanded = !section.expanded;
        }
    }

    /// Label lookups for relation fields that already hold an id. Each field
    /// is reported once and shows a loading label until answered.
    pub fn label_requests(&mut self) -> Vec<LabelRequest> {
        self.relations.pending_labels(&self.values)
    }

    /// Stores a relation option as the field value.
    pub fn select_relation(&mut self, property: &str, item: &RelationItem) {
        let id = self.relations.select(property, item);
        self.values.insert(property.to_string(), id);
    }
}
