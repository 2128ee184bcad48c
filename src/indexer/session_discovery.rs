use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::index_storage::FileStamp;
use crate::parsers::conversation::is_excluded_file_name;

const PROJECTS_DIR_NAME: &str = "projects";
const SESSION_FILE_EXTENSION: &str = "jsonl";

/// Session files live one level below the projects directory
/// (`projects/<encoded-cwd>/<id>.jsonl`)
const MAX_DISCOVERY_DEPTH: usize = 2;

/// A candidate session file and its stamp at discovery time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFile {
    pub path: PathBuf,
    pub stamp: Option<FileStamp>,
}

impl SessionFile {
    /// Session id derived from the file stem
    pub fn session_id(&self) -> String {
        self.path.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default()
    }
}

pub fn projects_dir(claude_dir: &Path) -> PathBuf {
    claude_dir.join(PROJECTS_DIR_NAME)
}

/// Find every `*.jsonl` session file under `<claude_dir>/projects`.
///
/// Sub-agent transcripts are left out. Unreadable entries below the projects
/// directory are logged and skipped; only an unreadable (or missing) projects
/// directory itself is an error.
pub fn discover_session_files(claude_dir: &Path) -> io::Result<Vec<SessionFile>> {
    let root = projects_dir(claude_dir);
    // Check the root first so that its failure is reported, not swallowed by the walk
    fs::read_dir(&root)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).min_depth(1).max_depth(MAX_DISCOVERY_DEPTH) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry in session directory");
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some(SESSION_FILE_EXTENSION)
        {
            continue;
        }

        if is_excluded_file_name(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let stamp = entry.metadata().ok().and_then(|m| FileStamp::from_metadata(&m));
        files.push(SessionFile { path: path.to_path_buf(), stamp });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(root = %root.display(), files = files.len(), "discovered session files");
    Ok(files)
}
