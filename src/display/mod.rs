//! Display shaping for terminal output
//!
//! Pure functions turning model data into fixed-width, terminal-safe text:
//!
//! - [`text`] - whitespace collapsing, width-aware truncation and padding, timestamps
//! - [`highlight`] - case-insensitive query highlighting with ANSI styles
//! - [`code_block`] - framing of fenced code regions
//! - [`rows`] - result rows and conversation previews built from the above

pub mod code_block;
pub mod highlight;
pub mod rows;
pub mod text;

pub use code_block::format_code_block;
pub use highlight::highlight;
pub use rows::{RowLayout, format_row, format_row_highlighted, render_conversation};
pub use text::{collapse_whitespace, format_timestamp, pad_or_truncate, truncate};
