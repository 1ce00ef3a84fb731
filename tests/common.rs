//! Common test utilities for building documents, schemas and editor configs.
use flowforge::prelude::*;
use serde_json::json;

/// Builds a config map from a `json!` object literal.
#[allow(dead_code)]
pub fn config(value: serde_json::Value) -> NodeConfig {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected an object literal, got {}", other),
    }
}

/// `A --out→in-- B`
#[allow(dead_code)]
pub fn create_linear_document() -> (GraphDocument, String, String) {
    let mut doc = GraphDocument::new();
    let a = doc.add_node("send_email", Some("Send e-mail"), Some(Position::new(200.0, 100.0)));
    let b = doc.add_node("create_task", Some("Create task"), Some(Position::new(500.0, 100.0)));
    doc.connect(Connection::new(&a, "out", &b, "in"))
        .expect("out -> in must connect");
    (doc, a, b)
}

/// `IF --trueOut→in-- B`, `IF --falseOut→in-- C`, with an authored boolean rule.
#[allow(dead_code)]
pub fn create_branch_document() -> (GraphDocument, String, String, String) {
    let mut doc = GraphDocument::new();
    let gate = doc.add_node("if", None, Some(Position::new(100.0, 100.0)));
    let approved = doc.add_node("send_email", None, Some(Position::new(400.0, 40.0)));
    let rejected = doc.add_node("create_task", None, Some(Position::new(400.0, 240.0)));
    doc.set_condition(&gate, &ConditionData::new("approved_hr", "true"), None)
        .expect("gate exists");
    doc.connect(Connection::new(&gate, "trueOut", &approved, "in"))
        .expect("trueOut -> in must connect");
    doc.connect(Connection::new(&gate, "falseOut", &rejected, "in"))
        .expect("falseOut -> in must connect");
    (doc, gate, approved, rejected)
}

/// A `notify` node type whose `channel` field is required.
#[allow(dead_code)]
pub fn create_notify_schema() -> ToolSchema {
    ToolSchema::with_fields(
        "notify",
        vec![
            ToolField::new("channel", "Channel", FieldType::Text).required(),
            ToolField::new("message", "Message", FieldType::Textarea),
        ],
    )
}

/// An `approval` node type with grouped sections and a relation field.
#[allow(dead_code)]
pub fn create_approval_schema() -> ToolSchema {
    ToolSchema::with_sections(
        "approval",
        vec![
            ToolSection {
                title: "Approver".to_string(),
                fields: vec![
                    ToolField::new("manager", "Manager", FieldType::Relation)
                        .with_relation("User")
                        .required(),
                ],
                expanded: true,
            },
            ToolSection {
                title: "Deadline".to_string(),
                fields: vec![
                    ToolField::new("due_in_days", "Due in (days)", FieldType::Number),
                    ToolField::new("reminders", "Reminders", FieldType::Select).required(),
                ],
                expanded: false,
            },
        ],
    )
}

#[allow(dead_code)]
pub fn create_sample_tools() -> Vec<FlowTool> {
    vec![
        FlowTool::new("send_email", "Send e-mail"),
        FlowTool::new("create_task", "Create task"),
        FlowTool::new("notify", "Notify"),
        FlowTool::new("approval", "Manager approval"),
    ]
}

/// Properties typed the way a host database would report them.
#[allow(dead_code)]
pub fn create_sample_properties() -> Vec<PropertyOption> {
    vec![
        PropertyOption::new("total_value", "Order total", "decimal(18,2)"),
        PropertyOption::new("requester_role", "Requester role", "nvarchar"),
        PropertyOption::new("created_at", "Created at", "DateTime"),
        PropertyOption::new("approved_hr", "Approved by HR?", "Boolean"),
    ]
}

#[allow(dead_code)]
pub fn sample_condition_json() -> serde_json::Value {
    json!({ "propertyId": "total_value", "operator": "gt", "value": 100 })
}
