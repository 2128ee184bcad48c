//! Persistent conversation cache
//!
//! Caches parsed conversations to disk so unchanged session files are not re-parsed.
//! The whole map is one JSON document, read once at startup and replaced after a
//! successful scan. Each conversation is stored with the [`FileStamp`] of its
//! source file; freshness is decided by the scanner, not by the store.
//!
//! Default location: platform-specific cache directories
//! - macOS: `~/Library/Caches/session-explorer/conversations.json`
//! - Linux: `~/.cache/session-explorer/conversations.json`
//! - Windows: `%LOCALAPPDATA%\session-explorer\conversations.json`

pub mod metadata;
pub mod persistence;

pub use metadata::FileStamp;
pub use persistence::{CACHE_VERSION, CacheStore, CachedConversation, ConversationMap};
