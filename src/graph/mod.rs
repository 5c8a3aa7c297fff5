//! The canonical flow-diagram model and the repair pipeline around it.
//!
//! Untrusted candidates recovered from model output stay as raw
//! `serde_json::Value` until they pass the [`validate`] gate; [`normalize`]
//! then fills in derivable fields, after which the candidate deserializes
//! into the typed structures here. [`fallback`] synthesizes a minimal valid
//! graph when nothing usable could be recovered.

use serde::{Deserialize, Serialize};

pub mod complexity;
pub mod condition;
pub mod fallback;
pub mod normalize;
pub mod validate;

/// A complete flow diagram. Node order is the visual left-to-right sequence
/// and drives default positioning during normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    /// Number of edges that carry at least one condition rule.
    pub fn conditional_edge_count(&self) -> usize {
        self.edges
            .iter()
            .filter(|edge| edge.data.as_ref().is_some_and(|d| !d.rules.is_empty()))
            .count()
    }
}

/// A single step in the diagram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    /// Filled during normalization when absent: first node `input`, last
    /// node `output`, everything else `default`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<NodeType>,
    pub data: NodeData,
    /// Filled during normalization when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Node payload. The label is mandatory for validity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
}

/// Visual role of a node. Model output occasionally invents other role
/// strings; those collapse to `Default` instead of discarding the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Input,
    Default,
    Output,
}

impl<'de> Deserialize<'de> for NodeType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "input" => NodeType::Input,
            "output" => NodeType::Output,
            _ => NodeType::Default,
        })
    }
}

/// Canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A directed connection between two nodes. Edges without `data` are
/// unconditional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Synthesized as `e<source>-<target>` during normalization when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<EdgeCondition>,
}

/// Conditional payload of a decision-bearing edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeCondition {
    /// One of the two recognized labels in [`condition`]; governs how the
    /// rules combine.
    pub logic: String,
    #[serde(default)]
    pub rules: Vec<ConditionRule>,
}

/// A single comparison applied on an edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionRule {
    pub field: String,
    pub operator: String,
    pub value: String,
}
