//! Small text helpers shared by the generator passes.

/// Splits on `.`, `!`, `?` and newlines. Returned sentences are trimmed slices of
/// `text` (so each one is still a literal substring of it); empty ones are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Byte range `[start - radius, end + radius]` clamped to `text` and widened to the
/// nearest char boundaries.
pub fn context_window(text: &str, start: usize, end: usize, radius: usize) -> (usize, usize) {
    let mut lo = start.saturating_sub(radius);
    while !text.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = (end + radius).min(text.len());
    while !text.is_char_boundary(hi) {
        hi += 1;
    }
    (lo, hi)
}

/// Returns `word` with its first letter upper-cased when `like` starts with an
/// upper-case letter.
pub fn match_capitalization(like: &str, word: &str) -> String {
    let starts_upper = like.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return word.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
