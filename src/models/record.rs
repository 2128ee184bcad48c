use serde::Deserialize;

/// Record discriminator of one session file line. Only the two turn kinds
/// become messages; everything else (summaries, snapshots, system events) is
/// `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordKind {
    UserTurn,
    AssistantTurn,
    #[default]
    Other,
}

/// A single block of structured message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub kind: String,
    pub text: Option<String>,
}

/// Message body as it appears on disk: either a bare string or a list of
/// typed blocks. Resolved once when the record is decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MessageContent {
    #[default]
    Empty,
    PlainText(String),
    Blocks(Vec<ContentBlock>),
}

/// Nested message object of a turn record. Its `role` is ignored: the record
/// type already says whose turn it is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordMessage {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_content")]
    pub content: MessageContent,
}

/// One decoded line of a session file. Every field is optional and decoded
/// leniently so that partial or oddly-shaped records still yield metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionRecord {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_record_kind"
    )]
    pub kind: RecordKind,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_optional_string"
    )]
    pub cwd: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_message")]
    pub message: Option<RecordMessage>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_timestamp")]
    pub timestamp: Option<String>,
}
