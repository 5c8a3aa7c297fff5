use super::ExtractStrategy;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Objects nested at most one level deep. Last-resort pattern only; deeper
/// nesting is the brace-balance strategy's job.
static SHALLOW_OBJECT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{[^{}]*(?:\{[^{}]*\}[^{}]*)*\}").expect("hard-coded pattern compiles")
});

fn has_keys(value: &Value, keys: &[&str]) -> bool {
    value
        .as_object()
        .is_some_and(|obj| keys.iter().all(|key| obj.contains_key(*key)))
}

/// Collects brace-balanced top-level object substrings, longest first.
///
/// Nesting depth is tracked with a counter; a candidate is emitted whenever
/// the depth returns to zero. The counter is deliberately naive about braces
/// inside string literals — an unbalanced candidate simply fails to parse
/// and is skipped.
pub(crate) fn balanced_candidates(text: &str) -> Vec<&str> {
    let mut candidates = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (pos, ch) in text.char_indices() {
        match ch {
            '{' => {
                if depth == 0 {
                    start = Some(pos);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some(open) = start.take() {
                        candidates.push(&text[open..=pos]);
                    }
                }
            }
            _ => {}
        }
    }

    candidates.sort_by_key(|candidate| std::cmp::Reverse(candidate.len()));
    candidates
}

/// Tier 1: a single line that is exactly one JSON object carrying both
/// `nodes` and `edges`.
pub struct LineScanStrategy;

impl ExtractStrategy for LineScanStrategy {
    fn name(&self) -> &'static str {
        "line-scan"
    }

    fn extract(&self, text: &str) -> Option<Value> {
        text.lines()
            .map(str::trim)
            .filter(|line| line.starts_with('{') && line.ends_with('}'))
            .find_map(|line| {
                serde_json::from_str::<Value>(line)
                    .ok()
                    .filter(|value| has_keys(value, &["nodes", "edges"]))
            })
    }
}

/// Tier 2: brace-balanced top-level candidates anywhere in the text, tried
/// longest first so the outermost object wins over embedded fragments.
pub struct BraceBalanceStrategy;

impl ExtractStrategy for BraceBalanceStrategy {
    fn name(&self) -> &'static str {
        "brace-balance"
    }

    fn extract(&self, text: &str) -> Option<Value> {
        balanced_candidates(text).into_iter().find_map(|candidate| {
            serde_json::from_str::<Value>(candidate)
                .ok()
                .filter(|value| has_keys(value, &["nodes", "edges"]))
        })
    }
}

/// Tier 3: permissive regex over shallowly nested objects. Accepts the
/// first parseable match that at least carries a `nodes` key.
pub struct PermissiveRegexStrategy;

impl ExtractStrategy for PermissiveRegexStrategy {
    fn name(&self) -> &'static str {
        "permissive-regex"
    }

    fn extract(&self, text: &str) -> Option<Value> {
        SHALLOW_OBJECT_RE.find_iter(text).find_map(|found| {
            serde_json::from_str::<Value>(found.as_str())
                .ok()
                .filter(|value| has_keys(value, &["nodes"]))
        })
    }
}
