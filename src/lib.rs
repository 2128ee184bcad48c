//! Session Explorer - Search and resume past Claude Code sessions
//!
//! This library indexes the session transcripts Claude Code stores under
//! `~/.claude/projects/`. It supports:
//!
//! - Parsing heterogeneous JSONL session records into a normalized [`Conversation`]
//! - Caching parsed conversations so unchanged files are not re-parsed
//! - Building one searchable [`SearchEntry`] per conversation
//! - Width-aware shaping, query highlighting and code-block framing for terminal output
//!
//! # Example
//!
//! ```no_run
//! use session_explorer::index_storage::CacheStore;
//! use session_explorer::indexer::{SessionScanner, build_search_entries};
//!
//! let report = SessionScanner::new("/Users/alice/.claude")
//!     .with_cache(CacheStore::default_location()?)
//!     .scan()?;
//! let entries = build_search_entries(&report.conversations);
//! println!("Indexed {} sessions", entries.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod display;
pub mod index_storage;
pub mod indexer;
pub mod models;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use index_storage::CacheStore;
pub use indexer::{SessionScanner, build_search_entries};
pub use models::{Conversation, Message, Role, SearchEntry};
pub use parsers::{extract_text, parse_conversation_file};
