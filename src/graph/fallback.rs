use super::{FlowEdge, FlowGraph, FlowNode, NodeData, NodeType, Position};
use crate::text::ellipsize;

/// Longest label carried over from the source text.
const LABEL_LIMIT: usize = 30;

/// Label used when the request carried only an image and no text.
pub const IMAGE_PLACEHOLDER: &str = "Sơ đồ từ ảnh";

/// Synthesizes a minimal two-node graph from the original free-text input.
///
/// Used whenever extraction finds nothing or validation rejects the
/// candidate, so the generation path always returns a usable diagram. The
/// result is guaranteed to pass [`super::validate::validate_graph`] and is
/// already in normalized form.
pub fn fallback_graph(source_text: &str) -> FlowGraph {
    let trimmed = source_text.trim();
    let label = if trimmed.is_empty() {
        IMAGE_PLACEHOLDER.to_string()
    } else {
        ellipsize(trimmed, LABEL_LIMIT)
    };

    FlowGraph {
        nodes: vec![
            FlowNode {
                id: "1".to_string(),
                node_type: Some(NodeType::Input),
                data: NodeData { label },
                position: Some(Position { x: 100.0, y: 100.0 }),
            },
            FlowNode {
                id: "2".to_string(),
                node_type: Some(NodeType::Output),
                data: NodeData {
                    label: "Result".to_string(),
                },
                position: Some(Position { x: 350.0, y: 100.0 }),
            },
        ],
        edges: vec![FlowEdge {
            id: Some("e1-2".to_string()),
            source: "1".to_string(),
            target: "2".to_string(),
            data: None,
        }],
    }
}
