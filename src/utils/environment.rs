use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Result, bail};

/// Overrides the session root, same variable the Claude CLI honors
pub const CLAUDE_CONFIG_DIR_ENV: &str = "CLAUDE_CONFIG_DIR";

/// Get the Claude directory path: `$CLAUDE_CONFIG_DIR`, else `~/.claude`
pub fn get_claude_dir() -> Result<PathBuf> {
    resolve_claude_dir(env::var_os(CLAUDE_CONFIG_DIR_ENV), env::var_os("HOME"))
}

pub(crate) fn resolve_claude_dir(
    config_dir: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf> {
    if let Some(dir) = config_dir.filter(|dir| !dir.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    match home.filter(|home| !home.is_empty()) {
        Some(home) => Ok(PathBuf::from(home).join(".claude")),
        None => bail!("HOME environment variable not set (set {} instead)", CLAUDE_CONFIG_DIR_ENV),
    }
}
