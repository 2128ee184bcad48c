use std::sync::Arc;

use crate::models::{Conversation, SearchEntry};

/// Build one search entry per conversation, preserving input order.
///
/// Ordering (e.g. most recent first) is the caller's job; see
/// [`crate::indexer::scan::sort_by_recency`]. Conversations without user
/// messages, or without any messages at all, still produce an entry.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use session_explorer::indexer::build_search_entries;
/// use session_explorer::models::{Conversation, Message, Role};
///
/// let conv = Conversation {
///     session_id: "abc".into(),
///     cwd: "/home/me/project".into(),
///     first_timestamp: String::new(),
///     last_timestamp: String::new(),
///     messages: vec![Message {
///         role: Role::User,
///         text: "fix the parser".into(),
///         timestamp: String::new(),
///     }],
/// };
/// let entries = build_search_entries(&[Arc::new(conv)]);
/// assert!(entries[0].search_text.contains("fix the parser"));
/// ```
pub fn build_search_entries(conversations: &[Arc<Conversation>]) -> Vec<SearchEntry> {
    conversations
        .iter()
        .map(|conv| SearchEntry {
            conversation: Arc::clone(conv),
            search_text: build_search_text(conv),
        })
        .collect()
}

/// Session id, full working directory and every user message, each verbatim
/// and space-separated. Whitespace is left alone so any substring of a message
/// is also a substring of the search text.
pub fn build_search_text(conv: &Conversation) -> String {
    let text_parts: Vec<&str> = [conv.session_id.as_str(), conv.cwd.as_str()]
        .into_iter()
        .chain(conv.user_messages().map(|m| m.text.as_str()))
        .filter(|part| !part.is_empty())
        .collect();

    // Pre-allocate capacity: sum of all part lengths + separators between them
    let total_len: usize = text_parts.iter().map(|s| s.len()).sum();
    let mut joined = String::with_capacity(total_len + text_parts.len().saturating_sub(1));
    for (i, part) in text_parts.iter().enumerate() {
        if i > 0 {
            joined.push(' ');
        }
        joined.push_str(part);
    }
    joined
}
