use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

use crate::index_storage::{CacheStore, CachedConversation, ConversationMap, FileStamp};
use crate::indexer::session_discovery::{SessionFile, discover_session_files, projects_dir};
use crate::models::Conversation;
use crate::parsers::parse_conversation_file;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan cancelled")]
    Cancelled,
    #[error("cannot read session directory {}: {source}", path.display())]
    SessionRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of a completed scan, conversations sorted most recent first
#[derive(Debug, Default)]
pub struct ScanReport {
    pub conversations: Vec<Arc<Conversation>>,
    /// Files parsed in this scan
    pub parsed: usize,
    /// Files served from the cache
    pub reused: usize,
    /// Files that could not be read
    pub failed: usize,
    /// Files without a usable conversation
    pub empty: usize,
}

enum FileOutcome {
    Reused(CachedConversation),
    Parsed(Conversation, Option<FileStamp>),
    NoConversation,
    Failed,
    Cancelled,
}

/// Parses every session file under a Claude directory, in parallel, reading
/// through and writing back an optional [`CacheStore`].
#[derive(Debug, Clone)]
pub struct SessionScanner {
    claude_dir: PathBuf,
    cache: Option<CacheStore>,
    cancel: Arc<AtomicBool>,
}

impl SessionScanner {
    pub fn new(claude_dir: impl Into<PathBuf>) -> Self {
        Self {
            claude_dir: claude_dir.into(),
            cache: None,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_cache(mut self, cache: CacheStore) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Share an externally owned cancel flag (e.g. set from a signal handler)
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn claude_dir(&self) -> &Path {
        &self.claude_dir
    }

    /// Run a full scan.
    ///
    /// Files are the unit of work: once the cancel flag is set no further file
    /// is started, in-flight results are discarded and the cache is left as it was.
    pub fn scan(&self) -> Result<ScanReport, ScanError> {
        let files = discover_session_files(&self.claude_dir).map_err(|source| {
            ScanError::SessionRoot { path: projects_dir(&self.claude_dir), source }
        })?;

        let cached = match &self.cache {
            Some(cache) => cache.load().unwrap_or_else(|e| {
                warn!(error = %format!("{e:#}"), "failed to load conversation cache");
                ConversationMap::new()
            }),
            None => ConversationMap::new(),
        };

        let outcomes: Vec<FileOutcome> =
            files.par_iter().map(|file| self.scan_file(file, &cached)).collect();

        if self.cancel.load(Ordering::Relaxed)
            || outcomes.iter().any(|outcome| matches!(outcome, FileOutcome::Cancelled))
        {
            info!("scan cancelled, discarding partial results");
            return Err(ScanError::Cancelled);
        }

        let mut report = ScanReport::default();
        let mut entries = ConversationMap::with_capacity(outcomes.len());
        // Parsed without a usable stamp: returned, but never cached
        let mut unstamped = Vec::new();
        for outcome in outcomes {
            match outcome {
                FileOutcome::Reused(entry) => {
                    report.reused += 1;
                    entries.insert(entry.conversation.session_id.clone(), entry);
                }
                FileOutcome::Parsed(conversation, Some(source)) => {
                    report.parsed += 1;
                    let session_id = conversation.session_id.clone();
                    entries.insert(session_id, CachedConversation { conversation, source });
                }
                FileOutcome::Parsed(conversation, None) => {
                    report.parsed += 1;
                    unstamped.push(conversation);
                }
                FileOutcome::NoConversation => report.empty += 1,
                FileOutcome::Failed => report.failed += 1,
                FileOutcome::Cancelled => {}
            }
        }

        if let Some(cache) = &self.cache
            && (report.parsed > 0 || entries.len() != cached.len())
            && let Err(e) = cache.save(&entries)
        {
            warn!(error = %format!("{e:#}"), "failed to save conversation cache");
        }

        info!(
            conversations = entries.len() + unstamped.len(),
            parsed = report.parsed,
            reused = report.reused,
            failed = report.failed,
            empty = report.empty,
            "scanned session files"
        );

        report.conversations = entries
            .into_values()
            .map(|entry| entry.conversation)
            .chain(unstamped)
            .map(Arc::new)
            .collect();
        sort_by_recency(&mut report.conversations);
        Ok(report)
    }

    fn scan_file(&self, file: &SessionFile, cached: &ConversationMap) -> FileOutcome {
        if self.cancel.load(Ordering::Relaxed) {
            return FileOutcome::Cancelled;
        }

        if let Some(entry) = fresh_cached(cached, file) {
            return FileOutcome::Reused(entry.clone());
        }

        match parse_conversation_file(&file.path) {
            Ok(Some(conv)) => FileOutcome::Parsed(conv, file.stamp),
            Ok(None) => FileOutcome::NoConversation,
            Err(e) => {
                warn!(
                    path = %file.path.display(),
                    error = %format!("{e:#}"),
                    "failed to parse session file"
                );
                FileOutcome::Failed
            }
        }
    }
}

/// Cached conversation for `file`, if the file's stamp is exactly the one it
/// was cached under. The stamp is taken at discovery, before parsing, so a
/// write that lands mid-scan makes the next scan re-parse the file.
fn fresh_cached<'a>(
    cached: &'a ConversationMap,
    file: &SessionFile,
) -> Option<&'a CachedConversation> {
    let stamp = file.stamp.as_ref()?;
    cached.get(&file.session_id()).filter(|entry| !entry.source.is_stale(stamp))
}

/// Sort most recently active first; conversations without a parseable last
/// timestamp go last, ties broken by session id
pub fn sort_by_recency(conversations: &mut [Arc<Conversation>]) {
    conversations.sort_by_cached_key(|conv| {
        (std::cmp::Reverse(recency_key(conv)), conv.session_id.clone())
    });
}

fn recency_key(conv: &Conversation) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&conv.last_timestamp).ok().map(|ts| ts.with_timezone(&Utc))
}
