use super::code_block::format_code_block;
use super::highlight::highlight;
use super::text::{format_date_time, pad_or_truncate, truncate};
use crate::models::{Conversation, SearchEntry};
use crate::utils::terminal::strip_ansi_codes;

const COLUMN_SEPARATOR: &str = "  ";
const EMPTY_MESSAGE_PLACEHOLDER: &str = "(no text)";
const NO_PROJECT: &str = "-";

/// Column widths of a result row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    pub date_width: usize,
    pub project_width: usize,
    pub count_width: usize,
    pub topic_width: usize,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self { date_width: 16, project_width: 20, count_width: 4, topic_width: 80 }
    }
}

/// `date  project  count  topic` for one entry. All columns but the last are fixed width.
pub fn format_row(entry: &SearchEntry, layout: &RowLayout) -> String {
    let conv = &entry.conversation;
    let project = match conv.project_name() {
        "" => NO_PROJECT.to_string(),
        name => strip_ansi_codes(name),
    };

    let date = pad_or_truncate(&format_date_time(&conv.last_timestamp), layout.date_width);
    let project = pad_or_truncate(&project, layout.project_width);
    let count = format!("{:>width$}", entry.message_count(), width = layout.count_width);
    let topic = truncate(&strip_ansi_codes(conv.topic()), layout.topic_width);

    [date, project, count, topic].join(COLUMN_SEPARATOR)
}

/// [`format_row`] with query matches highlighted
pub fn format_row_highlighted(entry: &SearchEntry, layout: &RowLayout, query: &str) -> String {
    highlight(&format_row(entry, layout), query)
}

/// Full preview of a conversation: a summary header, then every message
/// under a `role · time` rule with code blocks framed and `query` highlighted
pub fn render_conversation(conv: &Conversation, query: &str) -> String {
    let mut sections = Vec::with_capacity(conv.messages.len() + 1);
    sections.push(format!(
        "{} · {} · {} messages",
        conv.session_id,
        strip_ansi_codes(&conv.cwd),
        conv.messages.len()
    ));

    for message in &conv.messages {
        let header = format!(
            "── {} · {} ──",
            message.role.as_str(),
            format_date_time(&message.timestamp)
        );
        let body = if message.text.trim().is_empty() {
            EMPTY_MESSAGE_PLACEHOLDER.to_string()
        } else {
            format_code_block(&strip_ansi_codes(&message.text), query, "")
        };
        sections.push(format!("{header}\n{body}"));
    }

    sections.join("\n\n")
}
