//! Tests for the editor facade: forms, delegation, notices and the host contract.
mod common;
use common::*;
use flowforge::prelude::*;
use flowforge::relation::LOADING_LABEL;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default, Clone)]
struct RecordingViewport {
    events: Rc<RefCell<Vec<String>>>,
}

impl Viewport for RecordingViewport {
    fn fit_content(&mut self) {
        self.events.borrow_mut().push("fit".to_string());
    }

    fn focus_node(&mut self, node_id: &str) {
        self.events.borrow_mut().push(format!("focus:{}", node_id));
    }
}

fn editor_with_forms() -> FlowEditor {
    FlowEditor::builder()
        .with_tools(create_sample_tools())
        .with_properties(create_sample_properties())
        .with_schemas(vec![create_notify_schema(), create_approval_schema()])
        .delegate_editing(false)
        .build()
}

#[test]
fn test_builder_normalizes_properties() {
    let editor = editor_with_forms();
    let types: Vec<_> = editor
        .properties()
        .iter()
        .map(|p| p.type_name.as_str())
        .collect();
    assert_eq!(types, vec!["number", "string", "date", "boolean"]);
    assert_eq!(
        editor.property("total_value").unwrap().original_type.as_deref(),
        Some("decimal(18,2)")
    );
}

#[test]
fn test_add_tool_uses_palette_label() {
    let mut editor = editor_with_forms();
    let id = editor.add_tool("approval", None).unwrap();
    assert_eq!(editor.document().node(&id).unwrap().label, "Manager approval");

    let gate = editor.add_tool("if", None).unwrap();
    assert_eq!(editor.document().node(&gate).unwrap().label, "IF");

    assert!(editor.add_tool("teleport", None).is_none());
    assert_eq!(editor.document().len(), 2);
}

#[test]
fn test_activation_delegates_to_node_editor() {
    let requests: Rc<RefCell<Vec<EditRequest>>> = Rc::default();
    let sink = requests.clone();
    let mut editor = FlowEditor::builder()
        .with_tools(create_sample_tools())
        .with_node_editor(move |request: EditRequest| sink.borrow_mut().push(request))
        .build();

    let id = editor.add_tool("notify", None).unwrap();
    editor
        .update_node_data(&id, config(json!({ "channel": "sms" })), None)
        .unwrap();

    assert_eq!(editor.activate_node(&id), Ok(Activation::Delegated));
    assert!(editor.session().is_none());

    let received = requests.borrow();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].node_id, id);
    assert_eq!(received[0].node_type, "notify");
    assert_eq!(received[0].label, "Notify");
    assert_eq!(received[0].current_config["channel"], json!("sms"));
}

#[test]
fn test_external_commit_updates_node() {
    let mut editor = FlowEditor::builder()
        .with_node_editor(|_request: EditRequest| {})
        .build();
    let id = editor.add_node("notify", None, None);

    editor
        .update_node_data(&id, config(json!({ "channel": "email" })), Some("Notify HR"))
        .unwrap();

    let node = editor.document().node(&id).unwrap();
    assert_eq!(node.label, "Notify HR");
    assert_eq!(node.config["channel"], json!("email"));
    assert!(editor.update_node_data("ghost", NodeConfig::new(), None).is_err());
}

#[test]
fn test_activation_without_node_editor_is_unavailable() {
    let mut editor = FlowEditor::builder().build();
    let id = editor.add_node("notify", None, None);

    assert_eq!(editor.activate_node(&id), Ok(Activation::Unavailable));
    let notices = editor.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Info);
    assert_eq!(notices[0].node_id.as_deref(), Some(id.as_str()));
    assert!(editor.take_notices().is_empty());
}

#[test]
fn test_activate_unknown_node_fails() {
    let mut editor = editor_with_forms();
    assert_eq!(
        editor.activate_node("ghost"),
        Err(DocumentError::NodeNotFound("ghost".to_string()))
    );
}

#[test]
fn test_condition_form_save_sets_label() {
    let mut editor = FlowEditor::builder()
        .with_properties(create_sample_properties())
        .build();
    let gate = editor.add_tool("if", None).unwrap();

    assert_eq!(editor.activate_node(&gate), Ok(Activation::Form));
    let total = editor.property("total_value").unwrap().clone();
    match editor.session_mut() {
        Some(EditSession::Condition(form)) => {
            form.select_property(&total);
            let ids: Vec<_> = form.operators().iter().map(|o| o.id).collect();
            assert_eq!(ids, vec!["eq", "gt", "lt", "gte"]);
            form.set_operator("gt");
            form.set_value(json!(100));
            assert_eq!(form.display_text().as_deref(), Some("Order total\n> 100"));
        }
        other => panic!("expected a condition form, got {:?}", other),
    }
    editor.save_configuration().unwrap();

    assert!(editor.session().is_none());
    let node = editor.document().node(&gate).unwrap();
    assert_eq!(node.label, "Order total\n> 100");
    assert_eq!(
        node.condition(),
        Some(ConditionData::new("total_value", "gt").with_value(json!(100)))
    );
}

#[test]
fn test_condition_form_restores_and_resets() {
    let mut editor = FlowEditor::builder()
        .with_properties(create_sample_properties())
        .build();
    let gate = editor.add_tool("if", None).unwrap();
    editor
        .update_node_data(&gate, config(json!({ "conditionData": sample_condition_json() })), None)
        .unwrap();

    editor.activate_node(&gate).unwrap();
    let role = editor.property("requester_role").unwrap().clone();
    let Some(EditSession::Condition(form)) = editor.session_mut() else {
        panic!("expected a condition form");
    };
    assert_eq!(form.property().map(|p| p.id.as_str()), Some("total_value"));
    assert_eq!(form.operator(), "gt");
    assert_eq!(form.value(), Some(&json!(100)));

    form.select_property(&role);
    assert_eq!(form.operator(), "");
    assert!(form.value().is_none());
    assert!(form.condition().is_none());
}

#[test]
fn test_boolean_condition_label_has_no_value() {
    let mut editor = FlowEditor::builder()
        .with_properties(create_sample_properties())
        .build();
    let gate = editor.add_tool("if", None).unwrap();
    editor.activate_node(&gate).unwrap();

    let approved = editor.property("approved_hr").unwrap().clone();
    if let Some(EditSession::Condition(form)) = editor.session_mut() {
        form.select_property(&approved);
        form.set_operator("true");
        form.set_value(json!("ignored"));
    }
    editor.save_configuration().unwrap();
    assert_eq!(
        editor.document().node(&gate).unwrap().label,
        "Approved by HR?\nIs true"
    );
}

#[test]
fn test_closing_form_discards_changes() {
    let mut editor = FlowEditor::builder()
        .with_properties(create_sample_properties())
        .build();
    let gate = editor.add_tool("if", None).unwrap();
    editor.activate_node(&gate).unwrap();

    let approved = editor.property("approved_hr").unwrap().clone();
    if let Some(EditSession::Condition(form)) = editor.session_mut() {
        form.select_property(&approved);
        form.set_operator("false");
    }
    editor.close_configuration();

    assert!(editor.document().condition(&gate).is_none());
    assert_eq!(editor.document().node(&gate).unwrap().label, "IF");
}

#[test]
fn test_schema_form_save() {
    let mut editor = editor_with_forms();
    let id = editor.add_tool("notify", None).unwrap();

    editor.activate_node(&id).unwrap();
    let Some(EditSession::Schema(form)) = editor.session_mut() else {
        panic!("expected a schema form");
    };
    assert_eq!(form.sections.len(), 1);
    assert_eq!(form.sections[0].title, "General");
    form.set_value("channel", json!("email"));
    form.label = "Notify finance".to_string();
    editor.save_configuration().unwrap();

    let node = editor.document().node(&id).unwrap();
    assert_eq!(node.label, "Notify finance");
    assert_eq!(node.config["channel"], json!("email"));
}

#[test]
fn test_schema_form_relation_labels() {
    let mut editor = editor_with_forms();
    let id = editor.add_tool("approval", None).unwrap();
    editor
        .update_node_data(&id, config(json!({ "manager": 7 })), None)
        .unwrap();

    editor.activate_node(&id).unwrap();
    let Some(EditSession::Schema(form)) = editor.session_mut() else {
        panic!("expected a schema form");
    };
    assert_eq!(form.sections.len(), 2);
    assert!(!form.sections[1].expanded);
    form.toggle_section(1);
    assert!(form.sections[1].expanded);

    let requests = form.label_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].class, "User");
    assert_eq!(requests[0].id, json!(7));
    assert_eq!(
        form.relations.state("manager").unwrap().selected_label.as_deref(),
        Some(LOADING_LABEL)
    );
    // Already requested.
    assert!(form.label_requests().is_empty());
}

#[test]
fn test_delete_selection_is_blocked_by_open_form() {
    let mut editor = editor_with_forms();
    let id = editor.add_tool("send_email", None).unwrap();
    editor.select(Selection::Node(id.clone()));

    editor.activate_node(&id).unwrap();
    assert!(!editor.delete_selection());
    assert_eq!(editor.document().len(), 1);

    editor.close_configuration();
    assert!(editor.delete_selection());
    assert!(editor.document().is_empty());
    assert!(editor.selection().is_none());
}

#[test]
fn test_delete_selected_edge() {
    let mut editor = editor_with_forms();
    let a = editor.add_tool("send_email", None).unwrap();
    let b = editor.add_tool("create_task", None).unwrap();
    let edge = editor.connect(Connection::new(&a, "out", &b, "in")).unwrap();

    editor.select(Selection::Edge(edge));
    assert!(editor.delete_selection());
    assert_eq!(editor.document().edge_count(), 0);
    assert_eq!(editor.document().len(), 2);
}

#[test]
fn test_get_export_data_focuses_invalid_node() {
    let viewport = RecordingViewport::default();
    let events = viewport.events.clone();
    let mut editor = FlowEditor::builder()
        .with_schemas(vec![create_notify_schema()])
        .with_viewport(viewport)
        .build();
    let notify = editor.add_node("notify", None, None);

    assert!(editor.get_export_data().is_none());
    assert_eq!(editor.selection(), Some(&Selection::Node(notify.clone())));
    assert_eq!(*events.borrow(), vec![format!("focus:{}", notify)]);

    let notices = editor.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Warning);
    assert_eq!(notices[0].title, "Attention");
    assert_eq!(notices[0].message, "Field \"Channel\" is required.");

    editor
        .update_node_data(&notify, config(json!({ "channel": "sms" })), None)
        .unwrap();
    let bundle = editor.get_export_data().unwrap();
    assert_eq!(bundle.logic.start_node_id.as_deref(), Some(notify.as_str()));
}

#[test]
fn test_import_data_is_atomic() {
    let viewport = RecordingViewport::default();
    let events = viewport.events.clone();
    let mut editor = FlowEditor::builder().with_viewport(viewport).build();
    let a = editor.add_node("send_email", None, None);
    let b = editor.add_node("create_task", None, None);
    editor.connect(Connection::new(&a, "out", &b, "in")).unwrap();

    assert!(!editor.import_data("not json"));
    assert!(!editor.import_data("{}"));
    assert_eq!(editor.document().len(), 2);
    assert_eq!(editor.document().edge_count(), 1);
    assert!(events.borrow().is_empty());

    let notices = editor.take_notices();
    assert_eq!(notices.len(), 2);
    assert!(notices.iter().all(|n| n.message == "Invalid file."));
}

#[test]
fn test_import_data_replaces_document() {
    let viewport = RecordingViewport::default();
    let events = viewport.events.clone();
    let mut editor = FlowEditor::builder().with_viewport(viewport).build();
    editor.add_node("send_email", None, None);

    let (doc, gate, _, _) = create_branch_document();
    let bundle = Compiler::builder(&doc).build().export().unwrap();
    let text = bundle.to_json_pretty().unwrap();

    assert!(editor.import_data(text));
    assert_eq!(editor.document().len(), 3);
    assert_eq!(editor.document().edge_count(), 2);
    assert!(editor.document().node(&gate).is_some());
    assert_eq!(*events.borrow(), vec!["fit".to_string()]);

    let notices = editor.take_notices();
    assert_eq!(notices[0].kind, NoticeKind::Success);
    assert_eq!(notices[0].message, "Project imported!");
}

#[test]
fn test_import_file_and_save_project() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = FlowEditor::builder().build();
    let a = editor.add_node("send_email", None, None);
    let b = editor.add_node("create_task", None, None);
    editor.connect(Connection::new(&a, "out", &b, "in")).unwrap();

    let path = editor.save_project(dir.path()).unwrap();
    assert!(path.file_name().unwrap().to_string_lossy().starts_with("flow-"));

    let mut other = FlowEditor::builder().build();
    assert!(other.import_file(&path));
    assert_eq!(other.document().serialize(), editor.document().serialize());

    assert!(!other.import_file(&dir.path().join("missing.json")));
    let notices = other.take_notices();
    assert_eq!(notices.last().unwrap().message, "Error reading file.");
    assert_eq!(other.document().len(), 2);
}

#[test]
fn test_clear_canvas() {
    let mut editor = editor_with_forms();
    let a = editor.add_tool("send_email", None).unwrap();
    editor.select(Selection::Node(a));
    editor.clear_canvas();

    assert!(editor.document().is_empty());
    assert!(editor.selection().is_none());
    assert!(editor.get_export_data().is_some());
}

#[test]
fn test_editor_config_drives_rules() {
    let config = EditorConfig::from_json(r#"{ "allowSelfLoops": false, "delegateEditing": false }"#)
        .unwrap();
    let mut editor = FlowEditor::new(config);
    let a = editor.add_node("send_email", None, None);

    assert!(editor.connect(Connection::new(&a, "out", &a, "in")).is_none());
    assert_eq!(editor.activate_node(&a), Ok(Activation::Form));
    match editor.session() {
        Some(EditSession::Schema(form)) => assert!(form.sections.is_empty()),
        other => panic!("expected an empty schema form, got {:?}", other),
    }
}

#[test]
fn test_save_project_reports_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = FlowEditor::builder().build();
    editor.add_node("send_email", None, None);

    let err = editor.save_project(&dir.path().join("nowhere")).unwrap_err();
    assert!(matches!(err, CompileError::Io { .. }));
}
