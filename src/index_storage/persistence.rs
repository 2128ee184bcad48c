//! Cache persistence: load/save with atomic writes

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::metadata::FileStamp;
use crate::models::Conversation;

/// Cache schema version for invalidation on format changes
pub const CACHE_VERSION: u32 = 2;

const CACHE_DIR_NAME: &str = "session-explorer";
const CACHE_FILENAME: &str = "conversations.json";

/// A parsed conversation and the stamp of the file it was parsed from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedConversation {
    pub conversation: Conversation,
    pub source: FileStamp,
}

/// Map of session id to its cached conversation
pub type ConversationMap = HashMap<String, CachedConversation>;

#[derive(Serialize)]
struct CacheDocumentRef<'a> {
    version: u32,
    conversations: &'a ConversationMap,
}

#[derive(Deserialize)]
struct CacheDocument {
    version: u32,
    conversations: ConversationMap,
}

/// Whole-document store for parsed conversations at a configured path
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform cache directory
    /// (`~/.cache/session-explorer/conversations.json` on Linux)
    pub fn default_location() -> Result<Self> {
        let cache_base = dirs::cache_dir().context("Failed to get platform cache directory")?;
        Ok(Self::new(cache_base.join(CACHE_DIR_NAME).join(CACHE_FILENAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached conversations.
    ///
    /// A missing, unreadable, corrupt or outdated document is not an error: it
    /// yields an empty map and the caller re-parses everything.
    pub fn load(&self) -> Result<ConversationMap> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no conversation cache yet");
                return Ok(ConversationMap::new());
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read conversation cache");
                return Ok(ConversationMap::new());
            }
        };

        let document: CacheDocument = match serde_json::from_slice(&bytes) {
            Ok(document) => document,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "ignoring corrupt conversation cache"
                );
                return Ok(ConversationMap::new());
            }
        };

        if document.version != CACHE_VERSION {
            warn!(
                expected = CACHE_VERSION,
                found = document.version,
                "cache version mismatch, rebuilding conversation cache"
            );
            return Ok(ConversationMap::new());
        }

        debug!(
            path = %self.path.display(),
            conversations = document.conversations.len(),
            "loaded conversation cache"
        );
        Ok(document.conversations)
    }

    /// Replace the whole cache document atomically (temp file + rename)
    pub fn save(&self, conversations: &ConversationMap) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create cache directory: {}", parent.display())
            })?;
        }

        let document = CacheDocumentRef { version: CACHE_VERSION, conversations };
        let json =
            serde_json::to_vec(&document).context("Failed to serialize conversation cache")?;

        let mut temp_name = self.path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);
        fs::write(&temp_path, json)
            .with_context(|| format!("Failed to write cache temp file: {}", temp_path.display()))?;
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to replace cache file: {}", self.path.display()))?;

        debug!(
            path = %self.path.display(),
            conversations = conversations.len(),
            "saved conversation cache"
        );
        Ok(())
    }
}
