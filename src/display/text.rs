//! Width-aware string shaping for fixed-width terminal columns.
//!
//! Lengths are terminal column widths (via `unicode-width`), so ASCII text
//! measures one column per character and CJK text two. Truncation never
//! splits a multi-byte character.

use chrono::DateTime;
use unicode_width::UnicodeWidthStr;

/// Marker appended by [`truncate`]
pub const ELLIPSIS: &str = "...";
/// Single-column marker appended by [`pad_or_truncate`]
pub const ELLIPSIS_GLYPH: char = '…';

/// Replace every run of whitespace (newlines included) with a single space
/// and trim both ends
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Longest prefix of `s` that fits in `max_width` columns, with its width.
///
/// The prefix is measured as a whole string, the same way [`display_width`]
/// measures the result, so emoji presentation sequences are counted once.
fn take_width(s: &str, max_width: usize) -> (&str, usize) {
    let mut width = 0;
    let mut end = 0;
    for (idx, ch) in s.char_indices() {
        let next_end = idx + ch.len_utf8();
        let next_width = UnicodeWidthStr::width(&s[..next_end]);
        if next_width > max_width {
            break;
        }
        width = next_width;
        end = next_end;
    }
    (&s[..end], width)
}

/// Collapse whitespace, then cut to `max_len` columns ending in `"..."`.
///
/// Text that already fits is returned collapsed but otherwise unchanged. When
/// a wide character straddles the cut the result is one column short rather
/// than splitting it.
///
/// # Examples
///
/// ```
/// use session_explorer::display::text::truncate;
///
/// assert_eq!(truncate("hello world", 8), "hello...");
/// assert_eq!(truncate("hello\nworld", 20), "hello world");
/// ```
pub fn truncate(s: &str, max_len: usize) -> String {
    let collapsed = collapse_whitespace(s);
    if display_width(&collapsed) <= max_len {
        return collapsed;
    }
    if max_len <= ELLIPSIS.len() {
        return ELLIPSIS[..max_len].to_string();
    }

    let (head, _) = take_width(&collapsed, max_len - ELLIPSIS.len());
    format!("{head}{ELLIPSIS}")
}

/// Collapse whitespace, then fit to exactly `length` columns: right-pad with
/// spaces, or cut and end with a single `…`
///
/// # Examples
///
/// ```
/// use session_explorer::display::text::pad_or_truncate;
///
/// assert_eq!(pad_or_truncate("hello", 8), "hello   ");
/// assert_eq!(pad_or_truncate("hello world", 8), "hello w…");
/// ```
pub fn pad_or_truncate(s: &str, length: usize) -> String {
    let collapsed = collapse_whitespace(s);
    let width = display_width(&collapsed);
    if width <= length {
        return format!("{collapsed}{}", " ".repeat(length - width));
    }
    if length == 0 {
        return String::new();
    }

    let (head, head_width) = take_width(&collapsed, length - 1);
    // A wide char cut at the boundary leaves a one-column gap to fill
    format!("{head}{ELLIPSIS_GLYPH}{}", " ".repeat(length - 1 - head_width))
}

/// Calendar date (`YYYY-MM-DD`) of an RFC 3339 timestamp, in the timestamp's
/// own offset. Anything unparseable, including `""`, is returned unchanged.
pub fn format_timestamp(s: &str) -> String {
    DateTime::parse_from_rfc3339(s)
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| s.to_string())
}

/// Like [`format_timestamp`] but keeps hours and minutes (`YYYY-MM-DD HH:MM`)
pub fn format_date_time(s: &str) -> String {
    DateTime::parse_from_rfc3339(s)
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| s.to_string())
}
