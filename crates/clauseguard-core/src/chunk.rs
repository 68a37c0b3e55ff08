//! Word-window chunking for documents that arrive without clause sections.

/// Split `text` into windows of `size` words, each starting `size - overlap`
/// words after the previous one.
///
/// Returns an empty vector for blank text. `size == 0` or `overlap >= size`
/// cannot advance and also returns an empty vector.
pub fn chunk_words(text: &str, size: usize, overlap: usize) -> Vec<String> {
    if size == 0 || overlap >= size {
        tracing::warn!(size, overlap, "invalid chunk window, no chunks produced");
        return Vec::new();
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let step = size - overlap;
    let mut chunks = Vec::with_capacity(words.len().div_ceil(step));

    let mut start = 0;
    while start < words.len() {
        let end = (start + size).min(words.len());
        chunks.push(words[start..end].join(" "));
        start += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> String {
        (1..=n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn single_window_when_text_is_short() {
        let chunks = chunk_words("one two three", 400, 50);
        assert_eq!(chunks, vec!["one two three"]);
    }

    #[test]
    fn windows_overlap() {
        let chunks = chunk_words(&numbered(10), 4, 1);
        assert_eq!(
            chunks,
            vec![
                "w1 w2 w3 w4",
                "w4 w5 w6 w7",
                "w7 w8 w9 w10",
                "w10",
            ]
        );
    }

    #[test]
    fn blank_text_has_no_chunks() {
        assert!(chunk_words("   \n ", 400, 50).is_empty());
    }

    #[test]
    fn degenerate_window_rejected() {
        assert!(chunk_words("a b c", 0, 0).is_empty());
        assert!(chunk_words("a b c", 3, 3).is_empty());
    }
}
