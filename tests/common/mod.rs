//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for creating test .claude directory structures
pub struct ClaudeDirBuilder {
    temp_dir: TempDir,
}

impl ClaudeDirBuilder {
    /// Create a new builder with an empty `projects/` directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir(temp_dir.path().join("projects")).expect("Failed to create projects dir");
        Self { temp_dir }
    }

    /// Create a builder whose .claude directory has no `projects/` at all
    pub fn without_projects() -> Self {
        Self { temp_dir: TempDir::new().expect("Failed to create temp dir") }
    }

    /// Get the path to the .claude directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a session file `<session_id>.jsonl` under `projects/<project>/`
    pub fn with_session(self, project: &str, session: SessionFileBuilder) -> Self {
        let project_dir = self.temp_dir.path().join("projects").join(project);
        fs::create_dir_all(&project_dir).expect("Failed to create project dir");
        session.create_in(&project_dir);
        self
    }

    /// Add a file with raw content under `projects/<project>/`
    pub fn with_raw_file(self, project: &str, file_name: &str, content: &[u8]) -> Self {
        let project_dir = self.temp_dir.path().join("projects").join(project);
        fs::create_dir_all(&project_dir).expect("Failed to create project dir");
        fs::write(project_dir.join(file_name), content).expect("Failed to write file");
        self
    }

    /// Path of a session file created with [`Self::with_session`]
    pub fn session_path(&self, project: &str, session_id: &str) -> PathBuf {
        self.temp_dir.path().join("projects").join(project).join(format!("{}.jsonl", session_id))
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ClaudeDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a single session JSONL file
pub struct SessionFileBuilder {
    session_id: String,
    lines: Vec<String>,
}

impl SessionFileBuilder {
    pub fn new(session_id: &str) -> Self {
        Self { session_id: session_id.to_string(), lines: Vec::new() }
    }

    /// Append a record
    pub fn record(mut self, record: RecordBuilder) -> Self {
        self.lines.push(record.to_json());
        self
    }

    /// Append a raw line verbatim (may be malformed)
    pub fn raw_line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// File name this session is written as
    pub fn file_name(&self) -> String {
        format!("{}.jsonl", self.session_id)
    }

    pub fn content(&self) -> String {
        let mut content = self.lines.join("\n");
        content.push('\n');
        content
    }

    fn create_in(&self, dir: &Path) {
        fs::write(dir.join(self.file_name()), self.content())
            .expect("Failed to write session file");
    }
}

/// Builder for a single JSONL session record
pub struct RecordBuilder {
    value: Value,
}

impl RecordBuilder {
    /// A user turn with plain string content
    pub fn user(text: &str) -> Self {
        Self { value: json!({"type": "user", "message": {"role": "user", "content": text}}) }
    }

    /// An assistant turn with a single text block
    pub fn assistant(text: &str) -> Self {
        Self {
            value: json!({
                "type": "assistant",
                "message": {"role": "assistant", "content": [{"type": "text", "text": text}]}
            }),
        }
    }

    /// A user turn with arbitrary content blocks
    pub fn user_blocks(blocks: Value) -> Self {
        Self { value: json!({"type": "user", "message": {"role": "user", "content": blocks}}) }
    }

    /// A non-turn record such as a summary
    pub fn summary(text: &str) -> Self {
        Self { value: json!({"type": "summary", "summary": text}) }
    }

    pub fn cwd(mut self, cwd: &str) -> Self {
        self.value["cwd"] = json!(cwd);
        self
    }

    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.value["timestamp"] = json!(timestamp);
        self
    }

    /// Numeric millisecond timestamp, as written by some Claude versions
    pub fn timestamp_millis(mut self, millis: i64) -> Self {
        self.value["timestamp"] = json!(millis);
        self
    }

    pub fn to_json(&self) -> String {
        self.value.to_string()
    }
}

/// A small directory with two projects and three sessions
pub fn sample_claude_dir() -> ClaudeDirBuilder {
    ClaudeDirBuilder::new()
        .with_session(
            "-Users-test-webapp",
            SessionFileBuilder::new("11111111-aaaa-4000-8000-000000000001")
                .record(
                    RecordBuilder::user("Fix the login redirect bug")
                        .cwd("/Users/test/webapp")
                        .timestamp("2025-01-10T09:00:00Z"),
                )
                .record(
                    RecordBuilder::assistant("Looking at auth.rs now")
                        .timestamp("2025-01-10T09:00:05Z"),
                ),
        )
        .with_session(
            "-Users-test-webapp",
            SessionFileBuilder::new("22222222-bbbb-4000-8000-000000000002")
                .record(
                    RecordBuilder::user("Add pagination to the orders endpoint")
                        .cwd("/Users/test/webapp")
                        .timestamp("2025-02-01T12:00:00Z"),
                )
                .record(RecordBuilder::assistant("Done").timestamp("2025-02-01T12:30:00Z")),
        )
        .with_session(
            "-Users-test-cli-tool",
            SessionFileBuilder::new("33333333-cccc-4000-8000-000000000003")
                .record(
                    RecordBuilder::user("Write a parser for the config format")
                        .cwd("/Users/test/cli-tool")
                        .timestamp("2024-12-24T08:15:00Z"),
                ),
        )
}
