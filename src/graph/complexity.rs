use serde_json::Value;
use std::fmt;

/// Classification of a diagram by node count and edge/node ratio.
///
/// A pure, total function of the counts; `Undetermined` only appears when
/// the diagram value itself is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
    VeryComplex,
    Undetermined,
}

impl Complexity {
    /// Classifies by node and edge counts.
    pub fn classify(nodes: usize, edges: usize) -> Self {
        let branching = edges as f64 / nodes.max(1) as f64;
        if nodes <= 3 {
            Complexity::Simple
        } else if nodes <= 6 && branching < 1.5 {
            Complexity::Medium
        } else if nodes <= 10 && branching < 2.0 {
            Complexity::Complex
        } else {
            Complexity::VeryComplex
        }
    }

    /// Classification for an untrusted diagram value. Missing sections count
    /// as empty; a diagram that is not an object, or whose sections are not
    /// arrays, is `Undetermined`.
    pub fn of_value(diagram: &Value) -> Self {
        let Some(graph) = diagram.as_object() else {
            return Complexity::Undetermined;
        };
        let mut counts = [0usize; 2];
        for (slot, section) in counts.iter_mut().zip(["nodes", "edges"]) {
            match graph.get(section) {
                None => {}
                Some(value) => match value.as_array() {
                    Some(items) => *slot = items.len(),
                    None => return Complexity::Undetermined,
                },
            }
        }
        Self::classify(counts[0], counts[1])
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Medium => "medium",
            Complexity::Complex => "complex",
            Complexity::VeryComplex => "very complex",
            Complexity::Undetermined => "undetermined",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
