use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use nucleo::pattern::{CaseMatching, Normalization, Pattern};
use nucleo::{Config, Matcher};
use tracing::warn;

use crate::display::{
    RowLayout, format_row, format_row_highlighted, format_timestamp, render_conversation,
};
use crate::index_storage::CacheStore;
use crate::indexer::{ScanReport, SessionScanner, build_search_entries};
use crate::models::Conversation;
use crate::utils::{format_path_with_tilde, get_claude_dir};

#[derive(Parser)]
#[command(name = "session-explorer")]
#[command(version)]
#[command(about = "Search and resume past Claude Code sessions", long_about = None)]
pub struct Cli {
    /// Claude directory holding `projects/` (default: $CLAUDE_CONFIG_DIR or ~/.claude)
    #[arg(long, global = true, value_name = "PATH")]
    pub claude_dir: Option<PathBuf>,

    /// Conversation cache file (default: platform cache directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub cache_file: Option<PathBuf>,

    /// Neither read nor write the conversation cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List sessions, most recent first
    List {
        /// Maximum number of sessions to print
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Fuzzy-search sessions by id, directory and user messages
    Search {
        query: String,
        /// Maximum number of results to print
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Print a session's conversation
    Show {
        /// Session id, or a unique prefix of one
        session_id: String,
        /// Highlight this text in the conversation
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Show statistics about the indexed sessions
    Stats,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cancel = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&cancel);
    if let Err(e) = ctrlc::set_handler(move || handler_flag.store(true, Ordering::Relaxed)) {
        warn!(error = %e, "failed to install interrupt handler");
    }

    let report = scan_sessions(&cli, cancel)?;

    match &cli.command {
        None => list_sessions(&report, None),
        Some(Commands::List { limit }) => list_sessions(&report, *limit),
        Some(Commands::Search { query, limit }) => search_sessions(&report, query, *limit),
        Some(Commands::Show { session_id, query }) => show_session(&report, session_id, query)?,
        Some(Commands::Stats) => show_stats(&report, &cli),
    }

    Ok(())
}

/// Initialize tracing on stderr; `RUST_LOG` overrides the default filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "session_explorer=debug" } else { "warn" };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());

    // Ignore a second init, e.g. when run() is called more than once in-process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn claude_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.claude_dir {
        Some(dir) => Ok(dir.clone()),
        None => get_claude_dir(),
    }
}

fn scan_sessions(cli: &Cli, cancel: Arc<AtomicBool>) -> Result<ScanReport> {
    let mut scanner = SessionScanner::new(claude_dir(cli)?).with_cancel_flag(cancel);

    if !cli.no_cache {
        let cache = match &cli.cache_file {
            Some(path) => Some(CacheStore::new(path)),
            None => CacheStore::default_location()
                .inspect_err(|e| warn!(error = %e, "running without conversation cache"))
                .ok(),
        };
        if let Some(cache) = cache {
            scanner = scanner.with_cache(cache);
        }
    }

    Ok(scanner.scan()?)
}

fn list_sessions(report: &ScanReport, limit: Option<usize>) {
    if report.conversations.is_empty() {
        eprintln!("No sessions found");
        return;
    }

    let layout = RowLayout::default();
    let entries = build_search_entries(&report.conversations);
    for entry in entries.iter().take(limit.unwrap_or(usize::MAX)) {
        println!("{}\t{}", entry.session_id(), format_row(entry, &layout));
    }
}

fn search_sessions(report: &ScanReport, query: &str, limit: Option<usize>) {
    let entries = build_search_entries(&report.conversations);
    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);
    let ranked = pattern.match_list(entries.iter(), &mut matcher);

    if ranked.is_empty() {
        eprintln!("No sessions match '{}'", query);
        return;
    }

    let layout = RowLayout::default();
    for (entry, _score) in ranked.into_iter().take(limit.unwrap_or(usize::MAX)) {
        println!("{}\t{}", entry.session_id(), format_row_highlighted(entry, &layout, query));
    }
}

fn find_session<'a>(report: &'a ScanReport, session_id: &str) -> Result<&'a Conversation> {
    let mut candidates: Vec<&Conversation> = Vec::new();
    for conv in report.conversations.iter().map(Arc::as_ref) {
        if conv.session_id == session_id {
            return Ok(conv);
        }
        if conv.session_id.starts_with(session_id) {
            candidates.push(conv);
        }
    }

    match candidates.as_slice() {
        [conv] => Ok(*conv),
        [] => bail!("No session found matching '{}'", session_id),
        _ => bail!("Session id '{}' is ambiguous ({} matches)", session_id, candidates.len()),
    }
}

fn show_session(report: &ScanReport, session_id: &str, query: &str) -> Result<()> {
    let conv = find_session(report, session_id)?;

    println!("{}", render_conversation(conv, query));
    println!();
    let cwd = format_path_with_tilde(&conv.cwd);
    println!("Resume with: {}", resume_command(&conv.session_id, &cwd));
    Ok(())
}

/// Shell command that resumes a session, safe to paste for any directory name
fn resume_command(session_id: &str, display_cwd: &str) -> String {
    let resume = format!("claude --resume {}", shell_words::quote(session_id));
    if display_cwd.is_empty() {
        return resume;
    }
    format!("cd {} && {}", quote_path(display_cwd), resume)
}

/// Quote a path for the shell, leaving a leading `~/` unquoted so it still expands
fn quote_path(path: &str) -> String {
    match path.strip_prefix("~/") {
        Some(rest) => format!("~/{}", shell_words::quote(rest)),
        None if path == "~" => path.to_string(),
        None => shell_words::quote(path).into_owned(),
    }
}

fn show_stats(report: &ScanReport, cli: &Cli) {
    let total_messages: usize = report.conversations.iter().map(|c| c.messages.len()).sum();
    let user_messages: usize = report
        .conversations
        .iter()
        .map(|c| c.user_messages().count())
        .sum();

    println!("Session Statistics");
    println!("==================");
    println!("Sessions: {}", report.conversations.len());
    println!("  Messages: {}", total_messages);
    println!("  User messages: {}", user_messages);
    println!("Files parsed: {}", report.parsed);
    println!("Files from cache: {}", report.reused);
    println!("Files without a conversation: {}", report.empty);
    println!("Files failed: {}", report.failed);
    println!();
    if let Ok(dir) = claude_dir(cli) {
        println!("Claude directory: {}", format_path_with_tilde(&dir.to_string_lossy()));
    }

    if let Some(newest) = report.conversations.first() {
        println!("Newest session: {}", format_timestamp(&newest.last_timestamp));
    }
    if let Some(oldest) = report.conversations.last() {
        println!("Oldest session: {}", format_timestamp(&oldest.last_timestamp));
    }
}
