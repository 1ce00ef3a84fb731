//! Tests for connection legality and edge creation.
mod common;
use common::*;
use flowforge::graph::{PortHandle, ProposedEdge, Rejection};
use flowforge::prelude::*;

fn handle(node: &str, port: &str, group: PortGroup) -> Option<PortHandle> {
    Some(PortHandle {
        endpoint: Endpoint::new(node, port),
        group,
    })
}

#[test]
fn test_rejects_input_sources_and_non_input_targets() {
    let groups = [
        PortGroup::In,
        PortGroup::Out,
        PortGroup::TrueOut,
        PortGroup::FalseOut,
    ];

    for source in groups {
        for target in groups {
            let proposed = ProposedEdge {
                source: handle("a", source.as_str(), source),
                target: handle("b", target.as_str(), target),
            };
            let expected = source != PortGroup::In && target == PortGroup::In;
            assert_eq!(
                is_connection_allowed(&proposed, &[]),
                expected,
                "{:?} -> {:?}",
                source,
                target
            );
        }
    }
}

#[test]
fn test_rejects_unresolved_ports() {
    let proposed = ProposedEdge {
        source: handle("a", "out", PortGroup::Out),
        target: None,
    };
    assert_eq!(
        ConnectionRules::default().check(&proposed, &[]),
        Err(Rejection::UnresolvedPort)
    );
}

#[test]
fn test_duplicate_edge_is_created_once() {
    let (mut doc, a, b) = create_linear_document();
    assert_eq!(doc.edge_count(), 1);

    let again = doc.connect(Connection::new(&a, "out", &b, "in"));
    assert!(again.is_none());
    assert_eq!(doc.edge_count(), 1);
}

#[test]
fn test_fan_out_from_one_port_is_allowed() {
    let (mut doc, a, _b) = create_linear_document();
    let c = doc.add_node("create_task", None, None);

    assert!(doc.connect(Connection::new(&a, "out", &c, "in")).is_some());
    assert_eq!(doc.outgoing_edges(&a).count(), 2);
}

#[test]
fn test_rejected_gesture_leaves_document_untouched() {
    let (mut doc, a, b) = create_linear_document();
    let before = doc.serialize();

    // Reversed direction, unknown port and unknown node.
    assert!(doc.connect(Connection::new(&b, "in", &a, "out")).is_none());
    assert!(doc.connect(Connection::new(&a, "sideways", &b, "in")).is_none());
    assert!(doc.connect(Connection::new(&a, "out", "ghost", "in")).is_none());

    assert_eq!(doc.serialize(), before);
}

#[test]
fn test_self_loops_follow_rules() {
    let mut permissive = GraphDocument::new();
    let a = permissive.add_node("send_email", None, None);
    assert!(permissive.connect(Connection::new(&a, "out", &a, "in")).is_some());

    let mut strict = GraphDocument::with_rules(ConnectionRules {
        allow_self_loops: false,
    });
    let b = strict.add_node("send_email", None, None);
    assert!(strict.connect(Connection::new(&b, "out", &b, "in")).is_none());
    assert_eq!(strict.edge_count(), 0);
}

#[test]
fn test_branch_ports_connect_to_inputs() {
    let (doc, gate, approved, rejected) = create_branch_document();

    let groups: Vec<_> = doc
        .outgoing_edges(&gate)
        .map(|e| (doc.port_group(&e.source.cell, &e.source.port), e.target.cell.clone()))
        .collect();
    assert_eq!(
        groups,
        vec![
            (Some(PortGroup::TrueOut), approved),
            (Some(PortGroup::FalseOut), rejected)
        ]
    );
}
