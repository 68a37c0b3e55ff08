//! Text canonicalisation shared by every matcher.
//!
//! All patterns run against normalised text, so matching is insensitive to
//! case, line breaks, and runs of spaces or tabs in the source document.

/// Lower-case `text` and collapse every whitespace run to a single space.
///
/// Leading and trailing whitespace is dropped. Empty input yields an empty
/// string.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().flat_map(char::to_lowercase));
    }
    out
}

/// The first `max_chars` characters of `text`, never splitting a code point.
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
