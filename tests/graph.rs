//! Tests for the validation gate, the normalizer, the fallback synthesizer
//! and the complexity classification.
mod common;

use common::{branch_graph, raw_graph};
use flowlens::graph::fallback::IMAGE_PLACEHOLDER;
use flowlens::prelude::*;
use serde_json::{Value, json};

// --- Validation gate ---

#[test]
fn accepts_conforming_graph() {
    assert!(validate_graph(&raw_graph()).is_ok());
    assert!(validate_graph(&branch_graph()).is_ok());
}

#[test]
fn rejects_non_object_candidates() {
    for candidate in [json!(null), json!([]), json!("nodes"), json!(42)] {
        assert!(matches!(
            validate_graph(&candidate),
            Err(GraphValidationError::NotAnObject)
        ));
    }
}

#[test]
fn rejects_missing_or_non_array_sections() {
    assert!(matches!(
        validate_graph(&json!({"edges": []})),
        Err(GraphValidationError::MissingSection { section: "nodes" })
    ));
    assert!(matches!(
        validate_graph(&json!({"nodes": []})),
        Err(GraphValidationError::MissingSection { section: "edges" })
    ));
    assert!(matches!(
        validate_graph(&json!({"nodes": {}, "edges": []})),
        Err(GraphValidationError::MissingSection { section: "nodes" })
    ));
}

#[test]
fn rejects_empty_node_list() {
    assert!(matches!(
        validate_graph(&json!({"nodes": [], "edges": []})),
        Err(GraphValidationError::EmptyGraph)
    ));
}

#[test]
fn rejects_nodes_without_label() {
    let graph = json!({
        "nodes": [{"id": "1", "data": {}}],
        "edges": []
    });
    assert!(matches!(
        validate_graph(&graph),
        Err(GraphValidationError::MalformedNode { .. })
    ));

    let blank_label = json!({
        "nodes": [{"id": "1", "data": {"label": "   "}}],
        "edges": []
    });
    assert!(validate_graph(&blank_label).is_err());
}

#[test]
fn rejects_duplicate_node_ids() {
    let graph = json!({
        "nodes": [
            {"id": "1", "data": {"label": "A"}},
            {"id": "1", "data": {"label": "B"}}
        ],
        "edges": []
    });
    assert!(matches!(
        validate_graph(&graph),
        Err(GraphValidationError::DuplicateNodeId { .. })
    ));
}

#[test]
fn rejects_dangling_edge_references() {
    let mut graph = raw_graph();
    graph["edges"]
        .as_array_mut()
        .unwrap()
        .push(json!({"source": "3", "target": "ghost"}));

    match validate_graph(&graph) {
        Err(GraphValidationError::DanglingReference { node_id, .. }) => {
            assert_eq!(node_id, "ghost");
        }
        other => panic!("expected dangling reference, got {other:?}"),
    }
}

#[test]
fn rejects_unrecognized_logic_labels() {
    let mut graph = branch_graph();
    graph["edges"][0]["data"]["logic"] = json!("XOR");
    assert!(matches!(
        validate_graph(&graph),
        Err(GraphValidationError::UnknownLogic { .. })
    ));

    // Non-string logic is just as invalid.
    graph["edges"][0]["data"]["logic"] = json!(1);
    assert!(validate_graph(&graph).is_err());
}

#[test]
fn accepts_both_recognized_logic_labels() {
    let mut graph = branch_graph();
    graph["edges"][1]["data"]["logic"] = json!("Hoặc");
    assert!(validate_graph(&graph).is_ok());
}

// --- Normalizer ---

#[test]
fn fills_positions_types_and_edge_ids() {
    let normalized = normalize_graph(raw_graph());

    let nodes = normalized["nodes"].as_array().unwrap();
    assert_eq!(nodes[0]["type"], "input");
    assert_eq!(nodes[1]["type"], "default");
    assert_eq!(nodes[2]["type"], "output");
    assert_eq!(nodes[0]["position"], json!({"x": 100.0, "y": 100.0}));
    assert_eq!(nodes[1]["position"], json!({"x": 350.0, "y": 100.0}));
    assert_eq!(nodes[2]["position"], json!({"x": 600.0, "y": 100.0}));

    let edges = normalized["edges"].as_array().unwrap();
    assert_eq!(edges[0]["id"], "e1-2");
    assert_eq!(edges[1]["id"], "e2-3");
}

#[test]
fn preserves_existing_fields() {
    let mut graph = raw_graph();
    graph["nodes"][1]["type"] = json!("output");
    graph["nodes"][1]["position"] = json!({"x": 7.0, "y": 7.0});
    graph["edges"][0]["id"] = json!("custom-edge");

    let normalized = normalize_graph(graph);
    assert_eq!(normalized["nodes"][1]["type"], "output");
    assert_eq!(normalized["nodes"][1]["position"], json!({"x": 7.0, "y": 7.0}));
    assert_eq!(normalized["edges"][0]["id"], "custom-edge");
}

#[test]
fn normalization_is_idempotent() {
    let once = normalize_graph(raw_graph());
    let twice = normalize_graph(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn normalized_graph_deserializes_into_typed_model() {
    let normalized = normalize_graph(branch_graph());
    let graph: FlowGraph = serde_json::from_value(normalized).unwrap();
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.conditional_edge_count(), 2);
    assert_eq!(graph.nodes[0].node_type, Some(NodeType::Input));
}

// --- Fallback synthesizer ---

#[test]
fn fallback_passes_the_validator() {
    let long = "x".repeat(500);
    for text in ["", "Quy trình xử lý đơn hàng", long.as_str()] {
        let graph = fallback_graph(text);
        let value: Value = serde_json::to_value(&graph).unwrap();
        assert!(validate_graph(&value).is_ok());
    }
}

#[test]
fn fallback_truncates_long_labels_on_char_boundaries() {
    let text = "Quy trình xử lý đơn hàng thương mại điện tử xuyên biên giới";
    let graph = fallback_graph(text);

    let label = &graph.nodes[0].data.label;
    assert!(label.ends_with("..."));
    assert_eq!(label.chars().count(), 33); // 30 chars + ellipsis
    assert_eq!(graph.nodes[1].data.label, "Result");
    assert_eq!(graph.edges[0].id.as_deref(), Some("e1-2"));
}

#[test]
fn fallback_keeps_short_labels_verbatim() {
    let graph = fallback_graph("Ngắn gọn");
    assert_eq!(graph.nodes[0].data.label, "Ngắn gọn");
    assert_eq!(graph.nodes[0].node_type, Some(NodeType::Input));
    assert_eq!(graph.nodes[1].node_type, Some(NodeType::Output));
}

#[test]
fn fallback_uses_placeholder_for_image_only_requests() {
    let graph = fallback_graph("   ");
    assert_eq!(graph.nodes[0].data.label, IMAGE_PLACEHOLDER);
}

// --- Complexity classification ---

#[test]
fn complexity_matches_reference_points() {
    assert_eq!(Complexity::classify(2, 1), Complexity::Simple);
    assert_eq!(Complexity::classify(5, 4), Complexity::Medium);
    assert_eq!(Complexity::classify(8, 10), Complexity::Complex);
    assert_eq!(Complexity::classify(12, 11), Complexity::VeryComplex);
}

#[test]
fn complexity_boundaries() {
    assert_eq!(Complexity::classify(3, 9), Complexity::Simple);
    // 6 nodes, 9 edges: ratio 1.5 fails the medium gate but passes complex.
    assert_eq!(Complexity::classify(6, 9), Complexity::Complex);
    // Ratio 2.0 at 10 nodes falls through to very complex.
    assert_eq!(Complexity::classify(10, 20), Complexity::VeryComplex);
    assert_eq!(Complexity::classify(0, 0), Complexity::Simple);
}

#[test]
fn complexity_of_untrusted_values() {
    assert_eq!(Complexity::of_value(&raw_graph()), Complexity::Simple);
    assert_eq!(Complexity::of_value(&json!({})), Complexity::Simple);
    assert_eq!(Complexity::of_value(&json!(null)), Complexity::Undetermined);
    assert_eq!(
        Complexity::of_value(&json!({"nodes": "oops"})),
        Complexity::Undetermined
    );
}

#[test]
fn complexity_labels() {
    assert_eq!(Complexity::Simple.to_string(), "simple");
    assert_eq!(Complexity::Medium.to_string(), "medium");
    assert_eq!(Complexity::Complex.to_string(), "complex");
    assert_eq!(Complexity::VeryComplex.to_string(), "very complex");
    assert_eq!(Complexity::Undetermined.to_string(), "undetermined");
}
