use crate::models::MessageContent;

const CONTENT_TYPE_TEXT: &str = "text";

/// Flatten message content into display text.
///
/// Plain strings pass through unchanged. Block lists contribute the `text` of
/// every `"text"` block, space-joined in order; other block kinds are ignored.
pub fn extract_text(content: &MessageContent) -> String {
    match content {
        MessageContent::Empty => String::new(),
        MessageContent::PlainText(text) => text.clone(),
        MessageContent::Blocks(blocks) => {
            let text_parts: Vec<&str> = blocks
                .iter()
                .filter(|block| block.kind == CONTENT_TYPE_TEXT)
                .filter_map(|block| block.text.as_deref())
                .collect();
            text_parts.join(" ")
        }
    }
}
