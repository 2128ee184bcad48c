//! JSONL parsers for session transcript files
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach:
//!
//! - **Individual line failures**: Lines that are not valid JSON objects are logged at
//!   debug level and skipped. A bad line never fails its file.
//!
//! - **Individual field failures**: Record fields are decoded leniently (see
//!   [`deserializers`]); a wrongly-typed field reads as absent instead of rejecting the line.
//!
//! - **File-level errors**: Only failing to open or read a file produces an `Err`. Files that
//!   hold no user/assistant turns, and sub-agent transcripts, produce `Ok(None)`.

pub mod content;
pub mod conversation;
pub mod deserializers;

pub use content::extract_text;
pub use conversation::{EXCLUDED_FILE_PREFIX, parse_conversation_file};
