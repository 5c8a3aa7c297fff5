use super::condition;
use crate::error::GraphValidationError;
use ahash::AHashSet;
use serde_json::Value;

/// Structurally checks an extracted candidate against the graph schema.
///
/// This is purely a gate: no repair is attempted here, and no anomaly
/// escapes as anything other than an `Err`. Checks run in order and
/// short-circuit on the first failure:
///
/// 1. the candidate is a JSON object;
/// 2. `nodes` and `edges` are present and are arrays;
/// 3. there is at least one node;
/// 4. every node is an object with an `id` string and a non-empty
///    `data.label`, and node ids are unique;
/// 5. every edge is an object whose `source` and `target` reference
///    existing node ids;
/// 6. any `data.logic` on an edge is one of the recognized labels.
pub fn validate_graph(candidate: &Value) -> Result<(), GraphValidationError> {
    let graph = candidate
        .as_object()
        .ok_or(GraphValidationError::NotAnObject)?;

    let nodes = graph
        .get("nodes")
        .and_then(Value::as_array)
        .ok_or(GraphValidationError::MissingSection { section: "nodes" })?;
    let edges = graph
        .get("edges")
        .and_then(Value::as_array)
        .ok_or(GraphValidationError::MissingSection { section: "edges" })?;

    if nodes.is_empty() {
        return Err(GraphValidationError::EmptyGraph);
    }

    let mut node_ids: AHashSet<&str> = AHashSet::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        let node = node
            .as_object()
            .ok_or_else(|| GraphValidationError::MalformedNode {
                index,
                detail: "not an object".to_string(),
            })?;

        let id = node.get("id").and_then(Value::as_str).ok_or_else(|| {
            GraphValidationError::MalformedNode {
                index,
                detail: "missing string 'id'".to_string(),
            }
        })?;

        let label = node
            .get("data")
            .and_then(|data| data.get("label"))
            .and_then(Value::as_str);
        if !label.is_some_and(|l| !l.trim().is_empty()) {
            return Err(GraphValidationError::MalformedNode {
                index,
                detail: format!("node '{id}' is missing a non-empty 'data.label'"),
            });
        }

        if !node_ids.insert(id) {
            return Err(GraphValidationError::DuplicateNodeId {
                node_id: id.to_string(),
            });
        }
    }

    for (index, edge) in edges.iter().enumerate() {
        let edge = edge
            .as_object()
            .ok_or_else(|| GraphValidationError::MalformedEdge {
                index,
                detail: "not an object".to_string(),
            })?;

        let source = edge.get("source").and_then(Value::as_str).ok_or_else(|| {
            GraphValidationError::MalformedEdge {
                index,
                detail: "missing string 'source'".to_string(),
            }
        })?;
        let target = edge.get("target").and_then(Value::as_str).ok_or_else(|| {
            GraphValidationError::MalformedEdge {
                index,
                detail: "missing string 'target'".to_string(),
            }
        })?;

        for endpoint in [source, target] {
            if !node_ids.contains(endpoint) {
                return Err(GraphValidationError::DanglingReference {
                    source: source.to_string(),
                    target: target.to_string(),
                    node_id: endpoint.to_string(),
                });
            }
        }

        if let Some(logic) = edge.get("data").and_then(|data| data.get("logic")) {
            let recognized = logic
                .as_str()
                .is_some_and(condition::is_recognized_logic);
            if !recognized {
                return Err(GraphValidationError::UnknownLogic {
                    source: source.to_string(),
                    target: target.to_string(),
                    found: logic.to_string(),
                });
            }
        }
    }

    Ok(())
}
