//! Small text helpers shared across the request paths.
//!
//! Input text is frequently Vietnamese, so every truncation here counts
//! characters rather than bytes.

/// Truncate to at most `max_chars` characters.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Truncate to `max_chars` characters and suffix with an ellipsis when the
/// input was longer.
pub(crate) fn ellipsize(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        format!("{}...", truncate_chars(text, max_chars))
    }
}
