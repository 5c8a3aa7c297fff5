//! Layered recovery of JSON objects from untrusted model output.
//!
//! Generated text is not guaranteed to be well-formed JSON-only: surrounding
//! prose, markdown fences and truncation are all expected. The extractor
//! runs an ordered list of strategies, each returning an optional match, and
//! short-circuits on the first success — structurally confirmed candidates
//! (both `nodes` and `edges` present) are preferred before weaker matches.

mod strategies;

pub use strategies::{BraceBalanceStrategy, LineScanStrategy, PermissiveRegexStrategy};

use serde_json::Value;

/// The contract for a single extraction attempt over a raw text blob.
///
/// A strategy must never panic on malformed input; "nothing found" is
/// expressed as `None`.
pub trait ExtractStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, text: &str) -> Option<Value>;
}

/// Runs extraction strategies in priority order.
pub struct JsonExtractor {
    strategies: Vec<Box<dyn ExtractStrategy>>,
}

impl Default for JsonExtractor {
    /// The standard three-tier stack: line scan, brace balance, permissive
    /// regex.
    fn default() -> Self {
        Self::new(vec![
            Box::new(LineScanStrategy),
            Box::new(BraceBalanceStrategy),
            Box::new(PermissiveRegexStrategy),
        ])
    }
}

impl JsonExtractor {
    pub fn new(strategies: Vec<Box<dyn ExtractStrategy>>) -> Self {
        Self { strategies }
    }

    /// Recovers a graph candidate from arbitrary surrounding text.
    ///
    /// Ordered attempts, first success wins; `None` means no strategy found
    /// anything usable.
    pub fn extract_graph(&self, text: &str) -> Option<Value> {
        for strategy in &self.strategies {
            if let Some(found) = strategy.extract(text) {
                log::debug!("extraction strategy '{}' produced a candidate", strategy.name());
                return Some(found);
            }
        }
        log::debug!("no graph object found in {} chars of model output", text.len());
        None
    }

    /// Simplified recovery used on the analysis path: the largest
    /// brace-balanced candidate that parses as any JSON object, with no key
    /// requirement.
    pub fn extract_any_object(&self, text: &str) -> Option<Value> {
        strategies::balanced_candidates(text)
            .into_iter()
            .find_map(|candidate| {
                serde_json::from_str::<Value>(candidate)
                    .ok()
                    .filter(Value::is_object)
            })
    }
}
