use super::PropertyType;
use serde::Serialize;

/// A comparison operator offered for a property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Operator {
    pub id: &'static str,
    pub label: &'static str,
}

const fn op(id: &'static str, label: &'static str) -> Operator {
    Operator { id, label }
}

const STRING_OPERATORS: &[Operator] = &[
    op("eq", "Equals"),
    op("contains", "Contains"),
    op("ne", "Not equal to"),
];

const NUMBER_OPERATORS: &[Operator] = &[
    op("eq", "="),
    op("gt", ">"),
    op("lt", "<"),
    op("gte", ">="),
];

const DATE_OPERATORS: &[Operator] = &[op("eq", "On"), op("before", "Before"), op("after", "After")];

const BOOLEAN_OPERATORS: &[Operator] = &[op("true", "Is true"), op("false", "Is false")];

/// Returns the ordered operators legal for a property type.
pub fn operators_for(property_type: PropertyType) -> &'static [Operator] {
    match property_type {
        PropertyType::String => STRING_OPERATORS,
        PropertyType::Number => NUMBER_OPERATORS,
        PropertyType::Date => DATE_OPERATORS,
        PropertyType::Boolean => BOOLEAN_OPERATORS,
    }
}

/// Same as [`operators_for`] but keyed by the internal type name.
///
/// Unknown names yield an empty slice; callers treat that as "no operators
/// available".
pub fn operators_for_name(type_name: &str) -> &'static [Operator] {
    match type_name {
        "string" => STRING_OPERATORS,
        "number" => NUMBER_OPERATORS,
        "date" => DATE_OPERATORS,
        "boolean" => BOOLEAN_OPERATORS,
        _ => &[],
    }
}

pub fn operator_label(property_type: PropertyType, operator_id: &str) -> Option<&'static str> {
    operators_for(property_type)
        .iter()
        .find(|o| o.id == operator_id)
        .map(|o| o.label)
}

/// Boolean operators carry the whole comparison, so no value is needed.
pub fn is_boolean_operator(operator_id: &str) -> bool {
    BOOLEAN_OPERATORS.iter().any(|o| o.id == operator_id)
}
