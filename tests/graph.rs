//! Tests for graph analysis over diagrams.
mod common;
use callflow::prelude::*;
use common::*;
use serde_json::json;

#[test]
fn test_start_node_is_first_without_incoming_edges() {
    let diagram = create_gather_menu_diagram();
    let graph = diagram.graph();
    assert_eq!(graph.start_node().map(|n| n.id.as_str()), Some("answer"));
}

#[test]
fn test_start_node_for_every_non_empty_diagram() {
    for diagram in [
        create_answer_only_diagram(),
        create_gather_menu_diagram(),
        create_forward_diagram(),
        create_explicit_menu_diagram(),
    ] {
        assert!(diagram.graph().start_node().is_some());
    }
    assert!(Diagram::default().graph().start_node().is_none());
}

#[test]
fn test_outgoing_edges_keep_input_order() {
    let diagram = create_forward_diagram();
    let graph = diagram.graph();
    let targets: Vec<&str> = graph
        .outgoing_edges("forward")
        .iter()
        .map(|e| e.target.as_str())
        .collect();
    assert_eq!(targets, vec!["done", "busy"]);
    assert!(graph.outgoing_edges("done").is_empty());
    assert!(graph.outgoing_edges("unknown").is_empty());
}

#[test]
fn test_resolve_transition_by_label() {
    let diagram = create_forward_diagram();
    let graph = diagram.graph();
    assert_eq!(graph.resolve_transition("forward", "Busy"), Some("busy"));
    assert_eq!(graph.resolve_transition("forward", "Error"), None);
    assert_eq!(graph.default_transition("forward"), Some("done"));
}

#[test]
fn test_find_path_from_start_to_menu() {
    let diagram = create_gather_menu_diagram();
    let graph = diagram.graph();
    assert_eq!(
        graph.find_path("answer", "menu"),
        vec!["answer", "greeting", "menu"]
    );
    assert!(graph.find_path("sales", "answer").is_empty());
    assert!(graph.find_path("ghost", "menu").is_empty());
}

#[test]
fn test_find_path_terminates_on_self_loops() {
    let diagram = Diagram::new(
        vec![
            node("a", "gather-input", json!({})),
            node("b", "hang-up", json!({})),
        ],
        vec![labeled("a", "a", "timeout"), edge("a", "b")],
    );
    assert_eq!(diagram.graph().find_path("a", "b"), vec!["a", "b"]);
}
