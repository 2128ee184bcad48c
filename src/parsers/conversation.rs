use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::{Conversation, Message, RecordKind, Role, SessionRecord};
use crate::parsers::content::extract_text;

/// Base-name prefix of sub-agent transcripts, which are not resumable sessions
pub const EXCLUDED_FILE_PREFIX: &str = "agent-";

pub fn is_excluded_file_name(file_name: &str) -> bool {
    file_name.starts_with(EXCLUDED_FILE_PREFIX)
}

/// Parse one session JSONL file into a [`Conversation`].
///
/// Returns `Ok(None)` for sub-agent transcripts and for files without any
/// user or assistant turn. Lines that are not valid JSON objects are skipped.
/// Only failing to open or read the file is an error.
pub fn parse_conversation_file(path: &Path) -> Result<Option<Conversation>> {
    let file_name = path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
    if is_excluded_file_name(&file_name) {
        debug!(path = %path.display(), "skipping sub-agent transcript");
        return Ok(None);
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open session file: {}", path.display()))?;
    let session_id =
        path.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default();

    parse_conversation(BufReader::new(file), session_id, path)
}

/// Parse session records from any buffered reader; `path` is only used in messages
pub fn parse_conversation<R: BufRead>(
    reader: R,
    session_id: String,
    path: &Path,
) -> Result<Option<Conversation>> {
    let mut cwd = String::new();
    let mut messages = Vec::new();
    let mut skipped_count = 0;

    // Split on raw bytes so an invalid UTF-8 line is a skipped line, not a read error
    for (line_num, line) in reader.split(b'\n').enumerate() {
        let line = line
            .with_context(|| format!("Failed to read line from session file: {}", path.display()))?;

        if line.trim_ascii().is_empty() {
            continue;
        }

        let record = match serde_json::from_slice::<SessionRecord>(&line) {
            Ok(record) => record,
            Err(e) => {
                debug!(
                    path = %path.display(),
                    line = line_num + 1,
                    error = %e,
                    "skipping undecodable line"
                );
                skipped_count += 1;
                continue;
            }
        };

        if cwd.is_empty()
            && let Some(record_cwd) = record.cwd.as_deref()
            && !record_cwd.is_empty()
        {
            cwd = record_cwd.to_string();
        }

        let role = match record.kind {
            RecordKind::UserTurn => Role::User,
            RecordKind::AssistantTurn => Role::Assistant,
            RecordKind::Other => continue,
        };

        // Turns with no text (e.g. pure tool results) are kept so turn counts stay accurate
        let text = record.message.as_ref().map(|m| extract_text(&m.content)).unwrap_or_default();
        messages.push(Message { role, text, timestamp: record.timestamp.unwrap_or_default() });
    }

    if skipped_count > 0 {
        debug!(
            path = %path.display(),
            messages = messages.len(),
            skipped = skipped_count,
            "parsed session file with skipped lines"
        );
    }

    let (Some(first), Some(last)) = (messages.first(), messages.last()) else {
        return Ok(None);
    };
    let first_timestamp = first.timestamp.clone();
    let last_timestamp = last.timestamp.clone();

    Ok(Some(Conversation { session_id, cwd, first_timestamp, last_timestamp, messages }))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    /// Helper to write a session file with the given name into a temp dir
    fn create_session_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).expect("Failed to create session file");
        file.write_all(content).expect("Failed to write session file");
        file.flush().expect("Failed to flush session file");
        path
    }

    #[test]
    fn test_parse_three_line_session() {
        let dir = TempDir::new().unwrap();
        let content = r#"{"type":"user","cwd":"/test/project","message":{"content":"hello"},"timestamp":"2024-01-15T10:00:00Z"}
{"type":"assistant","message":{"content":"hi there"},"timestamp":"2024-01-15T10:01:00Z"}
{"type":"user","message":{"content":"goodbye"},"timestamp":"2024-01-15T10:02:00Z"}
"#;
        let path = create_session_file(&dir, "test-session.jsonl", content.as_bytes());

        let conv = parse_conversation_file(&path).unwrap().expect("conversation expected");

        assert_eq!(conv.session_id, "test-session");
        assert_eq!(conv.cwd, "/test/project");
        assert_eq!(conv.messages.len(), 3);
        assert_eq!(conv.messages[0].role, Role::User);
        assert_eq!(conv.messages[1].role, Role::Assistant);
        assert_eq!(conv.messages[1].text, "hi there");
        assert_eq!(conv.first_timestamp, "2024-01-15T10:00:00Z");
        assert_eq!(conv.last_timestamp, "2024-01-15T10:02:00Z");
    }

    #[test]
    fn test_parse_skips_agent_files() {
        let dir = TempDir::new().unwrap();
        let content = r#"{"type":"user","message":{"content":"hello"},"timestamp":"2024-01-15T10:00:00Z"}"#;
        let path = create_session_file(&dir, "agent-test.jsonl", content.as_bytes());

        let result = parse_conversation_file(&path);
        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_parse_summary_only_file_yields_none() {
        let dir = TempDir::new().unwrap();
        let content = r#"{"type":"summary","message":{"content":"summary only"}}"#;
        let path = create_session_file(&dir, "empty-session.jsonl", content.as_bytes());

        let result = parse_conversation_file(&path);
        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_parse_empty_file_yields_none() {
        let dir = TempDir::new().unwrap();
        let path = create_session_file(&dir, "blank.jsonl", b"");

        assert!(parse_conversation_file(&path).unwrap().is_none());
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let dir = TempDir::new().unwrap();
        let content = r#"{"type":"user","message":{"content":"Valid 1"}}
invalid json line
[1, 2, 3]
{"type":"user","message":{"content":"Valid 2"}}"#;
        let path = create_session_file(&dir, "s.jsonl", content.as_bytes());

        let conv = parse_conversation_file(&path).unwrap().unwrap();
        assert_eq!(conv.messages.len(), 2);
        assert_eq!(conv.messages[1].text, "Valid 2");
    }

    #[test]
    fn test_parse_mostly_garbage_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let mut content = String::new();
        for i in 0..150 {
            content.push_str(&format!("garbage line {}\n", i));
        }
        content.push_str(r#"{"type":"user","message":{"content":"survivor"}}"#);
        let path = create_session_file(&dir, "s.jsonl", content.as_bytes());

        let conv = parse_conversation_file(&path).unwrap().unwrap();
        assert_eq!(conv.messages.len(), 1);
    }

    #[test]
    fn test_parse_skips_invalid_utf8_line() {
        let dir = TempDir::new().unwrap();
        let mut content = Vec::new();
        content.extend_from_slice(b"{\"type\":\"user\",\"message\":{\"content\":\"\xff\xfe\"}}\n");
        content.extend_from_slice(br#"{"type":"assistant","message":{"content":"ok"}}"#);
        let path = create_session_file(&dir, "s.jsonl", &content);

        let conv = parse_conversation_file(&path).unwrap().unwrap();
        assert_eq!(conv.messages.len(), 1);
        assert_eq!(conv.messages[0].text, "ok");
    }

    #[test]
    fn test_parse_cwd_from_first_record_of_any_type() {
        let dir = TempDir::new().unwrap();
        let content = r#"{"type":"summary","cwd":""}
{"type":"system","cwd":"/from/system"}
{"type":"user","cwd":"/from/user","message":{"content":"hi"}}"#;
        let path = create_session_file(&dir, "s.jsonl", content.as_bytes());

        let conv = parse_conversation_file(&path).unwrap().unwrap();
        assert_eq!(conv.cwd, "/from/system");
    }

    #[test]
    fn test_parse_timestamps_ignore_non_message_records() {
        let dir = TempDir::new().unwrap();
        let content = r#"{"type":"system","timestamp":"2024-01-01T00:00:00Z"}
{"type":"user","message":{"content":"a"},"timestamp":"2024-01-15T10:00:00Z"}
{"type":"assistant","message":{"content":"b"},"timestamp":"2024-01-15T11:00:00Z"}
{"type":"summary","timestamp":"2024-12-31T00:00:00Z"}"#;
        let path = create_session_file(&dir, "s.jsonl", content.as_bytes());

        let conv = parse_conversation_file(&path).unwrap().unwrap();
        assert_eq!(conv.first_timestamp, "2024-01-15T10:00:00Z");
        assert_eq!(conv.last_timestamp, "2024-01-15T11:00:00Z");
    }

    #[test]
    fn test_parse_retains_empty_text_turns() {
        let dir = TempDir::new().unwrap();
        let content = r#"{"type":"user","message":{"content":"run it"}}
{"type":"user","message":{"content":[{"type":"tool_result","tool_use_id":"t1","content":"output"}]}}
{"type":"assistant"}"#;
        let path = create_session_file(&dir, "s.jsonl", content.as_bytes());

        let conv = parse_conversation_file(&path).unwrap().unwrap();
        assert_eq!(conv.messages.len(), 3);
        assert_eq!(conv.messages[1].text, "");
        assert_eq!(conv.messages[2].text, "");
        assert_eq!(conv.first_timestamp, "");
    }

    #[test]
    fn test_parse_role_comes_from_record_type() {
        let dir = TempDir::new().unwrap();
        let content = r#"{"type":"user","message":{"role":"assistant","content":"mine"}}
{"type":"assistant","message":{"role":42,"content":"theirs"}}
"#;
        let path = create_session_file(&dir, "roles.jsonl", content.as_bytes());

        let conv = parse_conversation_file(&path).unwrap().unwrap();
        assert_eq!(conv.messages[0].role, Role::User);
        assert_eq!(conv.messages[1].role, Role::Assistant);
        assert_eq!(conv.messages[1].text, "theirs");
    }

    #[test]
    fn test_parse_block_content_and_crlf() {
        let dir = TempDir::new().unwrap();
        let content = "{\"type\":\"assistant\",\"message\":{\"content\":[{\"type\":\"thinking\",\"thinking\":\"hmm\"},{\"type\":\"text\",\"text\":\"Here\"},{\"type\":\"text\",\"text\":\"it is\"}]}}\r\n";
        let path = create_session_file(&dir, "s.jsonl", content.as_bytes());

        let conv = parse_conversation_file(&path).unwrap().unwrap();
        assert_eq!(conv.messages[0].text, "Here it is");
    }

    #[test]
    fn test_parse_nonexistent_file() {
        let result = parse_conversation_file(Path::new("/nonexistent/session.jsonl"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to open"));
    }
}
