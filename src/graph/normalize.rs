use serde_json::{Value, json};

/// Horizontal origin and stride for default node placement.
const NODE_X_ORIGIN: f64 = 100.0;
const NODE_X_STRIDE: f64 = 250.0;
/// Constant vertical offset for the default single-row layout.
const NODE_Y: f64 = 100.0;

/// Fills in derivable-but-missing fields of a graph that already passed the
/// validation gate:
///
/// - a node without `position` gets `{x: 100 + 250*index, y: 100}`;
/// - a node without `type` becomes `input` (first), `output` (last) or
///   `default`;
/// - an edge without `id` gets `e<source>-<target>`.
///
/// Normalization is best-effort polish, not a correctness gate: it never
/// drops data, and if the graph's shape turns out to be unexpected the
/// original valid graph is returned unchanged. Normalizing an
/// already-normalized graph changes nothing.
pub fn normalize_graph(graph: Value) -> Value {
    match try_normalize(graph.clone()) {
        Some(normalized) => normalized,
        None => {
            log::warn!("graph normalization hit an unexpected shape; returning graph as validated");
            graph
        }
    }
}

fn try_normalize(mut graph: Value) -> Option<Value> {
    {
        let nodes = graph.get_mut("nodes")?.as_array_mut()?;
        let node_count = nodes.len();
        for (index, node) in nodes.iter_mut().enumerate() {
            let node = node.as_object_mut()?;
            if !node.contains_key("position") {
                node.insert(
                    "position".to_string(),
                    json!({
                        "x": NODE_X_ORIGIN + NODE_X_STRIDE * index as f64,
                        "y": NODE_Y,
                    }),
                );
            }
            if !node.contains_key("type") {
                let node_type = if index == 0 {
                    "input"
                } else if index + 1 == node_count {
                    "output"
                } else {
                    "default"
                };
                node.insert("type".to_string(), Value::String(node_type.to_string()));
            }
        }
    }

    let edges = graph.get_mut("edges")?.as_array_mut()?;
    for edge in edges.iter_mut() {
        let edge = edge.as_object_mut()?;
        if !edge.contains_key("id") {
            let id = format!(
                "e{}-{}",
                edge.get("source")?.as_str()?,
                edge.get("target")?.as_str()?
            );
            edge.insert("id".to_string(), Value::String(id));
        }
    }

    Some(graph)
}
