//! Scanning and indexing of session transcripts
//!
//! # Error Handling Strategy
//!
//! The indexer degrades gracefully and only fails on a missing session root:
//!
//! - **File-level failures**: A session file that cannot be read is logged and left out.
//!   The rest of the scan continues, giving fewer results instead of none.
//!
//! - **Cache failures**: An unreadable cache is treated as a cold start; a failed save is
//!   logged. Neither affects the returned conversations.
//!
//! - **Fatal conditions**: An unreadable `projects` directory aborts the scan with
//!   [`ScanError::SessionRoot`]. Cancellation aborts with [`ScanError::Cancelled`] before
//!   the cache is touched.
//!
//! - **Parser integration**: Line-level error handling is delegated to the parser modules.

pub mod builder;
pub mod scan;
pub mod session_discovery;

pub use builder::{build_search_entries, build_search_text};
pub use scan::{ScanError, ScanReport, SessionScanner, sort_by_recency};
pub use session_discovery::{SessionFile, discover_session_files};
