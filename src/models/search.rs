use std::sync::Arc;

use super::conversation::Conversation;

/// Searchable projection of one conversation, fed to the fuzzy filter.
///
/// `search_text` always carries the complete user message text; display
/// columns are derived separately and may be truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    pub conversation: Arc<Conversation>,
    pub search_text: String,
}

impl SearchEntry {
    pub fn session_id(&self) -> &str {
        &self.conversation.session_id
    }

    pub fn message_count(&self) -> usize {
        self.conversation.messages.len()
    }
}

impl AsRef<str> for SearchEntry {
    fn as_ref(&self) -> &str {
        &self.search_text
    }
}
