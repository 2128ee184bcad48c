//! Data models for session transcripts.
//!
//! - [`SessionRecord`] - One raw JSONL line as decoded from a session file
//! - [`Conversation`] / [`Message`] - Normalized transcript, also the cache format
//! - [`SearchEntry`] - Searchable projection of a conversation
//!
//! Raw records use lenient custom deserializers from the `parsers::deserializers`
//! module so that a malformed field never rejects a whole line.

pub mod conversation;
pub mod record;
pub mod search;

pub use conversation::{Conversation, Message, Role};
pub use record::{ContentBlock, MessageContent, RecordKind, RecordMessage, SessionRecord};
pub use search::SearchEntry;
