//! String utilities for the domain layer.

/// Shorten text to at most `max_len` bytes for embedding in a prompt.
///
/// Cuts on a UTF-8 character boundary and marks the cut with
/// `"\n[... truncated]"` so the reader knows content was dropped.
pub fn clip_for_prompt(s: &str, max_len: usize) -> String {
    const MARKER: &str = "\n[... truncated]";
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(MARKER.len()).min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{}", &s[..end], MARKER)
}
