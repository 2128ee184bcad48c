/// ANSI style wrapped around each query match (black on yellow)
pub const HIGHLIGHT_START: &str = "\x1b[43;30m";
pub const HIGHLIGHT_END: &str = "\x1b[0m";

/// Wrap every case-insensitive occurrence of `query` in `text` with the
/// highlight style, keeping the original casing. Matches are leftmost-first
/// and non-overlapping. An empty query or no match returns `text` unchanged.
///
/// # Examples
///
/// ```
/// use session_explorer::display::highlight::highlight;
///
/// assert_eq!(highlight("Hello World", "world"), "Hello \x1b[43;30mWorld\x1b[0m");
/// assert_eq!(highlight("Hello World", ""), "Hello World");
/// ```
pub fn highlight(text: &str, query: &str) -> String {
    let matches = find_matches(text, query);
    if matches.is_empty() {
        return text.to_string();
    }

    let mut result = String::with_capacity(
        text.len() + matches.len() * (HIGHLIGHT_START.len() + HIGHLIGHT_END.len()),
    );
    let mut last_end = 0;
    for (start, end) in matches {
        result.push_str(&text[last_end..start]);
        result.push_str(HIGHLIGHT_START);
        result.push_str(&text[start..end]);
        result.push_str(HIGHLIGHT_END);
        last_end = end;
    }
    result.push_str(&text[last_end..]);
    result
}

/// Byte ranges in `text` of case-insensitive, non-overlapping matches of `query`
pub fn find_matches(text: &str, query: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    // Lowercased text, each folded char tagged with the byte offset of its source char
    let folded: Vec<(usize, char)> = text
        .char_indices()
        .flat_map(|(idx, ch)| ch.to_lowercase().map(move |lower| (idx, lower)))
        .collect();
    let source_start = |i: usize| folded.get(i).map_or(text.len(), |&(idx, _)| idx);
    // A folded position is a boundary when it begins a new source char
    let is_boundary = |i: usize| i == 0 || i == folded.len() || folded[i - 1].0 != folded[i].0;

    let mut matches = Vec::new();
    let mut i = 0;
    while i + needle.len() <= folded.len() {
        let end = i + needle.len();
        let is_match = is_boundary(i)
            && is_boundary(end)
            && folded[i..end].iter().zip(&needle).all(|(&(_, ch), &n)| ch == n);

        if is_match {
            matches.push((source_start(i), source_start(end)));
            i = end;
        } else {
            i += 1;
        }
    }
    matches
}
