//! Source-file stamps used to decide whether a cached conversation is current

use std::fs::Metadata;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Modification time and size of a session file, captured before it is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileStamp {
    pub mtime_secs: i64,
    pub mtime_nanos: u32,
    pub size: u64,
}

impl FileStamp {
    /// Stamp from file metadata; `None` when the platform reports no usable mtime
    pub fn from_metadata(metadata: &Metadata) -> Option<Self> {
        let mtime = metadata.modified().ok()?;
        Some(Self::new(mtime, metadata.len()))
    }

    pub fn new(mtime: SystemTime, size: u64) -> Self {
        let (mtime_secs, mtime_nanos) = match mtime.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(since) => (since.as_secs() as i64, since.subsec_nanos()),
            Err(e) => {
                // Pre-epoch mtimes: keep them distinct rather than clamping to zero
                let before = e.duration();
                (-(before.as_secs() as i64), before.subsec_nanos())
            }
        };
        Self { mtime_secs, mtime_nanos, size }
    }

    /// A file is stale when its mtime or size differs from this stamp in either direction
    pub fn is_stale(&self, current: &FileStamp) -> bool {
        self != current
    }
}
