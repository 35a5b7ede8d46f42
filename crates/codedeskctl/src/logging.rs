//! Logging for codedeskctl
//!
//! Diagnostics go to stderr through `tracing`. Answered queries can also be
//! appended to an XDG-compliant JSONL audit log.

use codedesk_common::LookupOutcome;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Env var holding a tracing filter directive
pub const LOG_FILTER_ENV: &str = "CODEDESK_LOG";

/// Env var overriding the query log location
pub const LOG_FILE_ENV: &str = "CODEDESK_LOG_FILE";

/// Initialize stderr logging.
///
/// `CODEDESK_LOG` wins when set; otherwise verbosity picks the level.
pub fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log entry for each answered query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryLogEntry {
    /// ISO 8601 timestamp
    pub ts: String,

    /// Request ID (UUID)
    pub req_id: String,

    pub query: String,

    /// no_match, single_match, ambiguous, show_all or extraction_failed
    pub outcome: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_score: Option<u8>,

    /// Codes presented to the user
    #[serde(default)]
    pub codes: Vec<String>,

    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl QueryLogEntry {
    pub fn new(query: &str, outcome: &LookupOutcome, elapsed: Duration) -> Self {
        Self {
            ts: chrono::Utc::now().to_rfc3339(),
            req_id: uuid::Uuid::new_v4().to_string(),
            query: query.to_string(),
            outcome: outcome.kind().to_string(),
            best_score: outcome.score(),
            codes: outcome.codes(),
            duration_ms: elapsed.as_millis() as u64,
        }
    }
}

/// Append-only JSONL query log
#[derive(Debug, Clone)]
pub struct QueryLog {
    path: PathBuf,
}

impl QueryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Log at the discovered location, if one can be found
    pub fn discover() -> Option<Self> {
        discover_log_path(|key| std::env::var(key).ok(), dirs::home_dir()).map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an entry. A failing log never interrupts the session.
    pub fn record(&self, entry: &QueryLogEntry) {
        match self.append(entry) {
            Ok(()) => debug!("Logged query {} to {}", entry.req_id, self.path.display()),
            Err(e) => warn!("Could not write query log {}: {}", self.path.display(), e),
        }
    }

    fn append(&self, entry: &QueryLogEntry) -> Result<(), std::io::Error> {
        let json = serde_json::to_string(entry)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        writeln!(file, "{}", json)?;
        Ok(())
    }
}

/// Discover log file path with fallback chain
///
/// Priority:
/// 1. $CODEDESK_LOG_FILE environment variable (explicit override)
/// 2. $XDG_STATE_HOME/codedesk/queries.jsonl (XDG standard)
/// 3. ~/.local/state/codedesk/queries.jsonl (XDG fallback)
fn discover_log_path(
    lookup: impl Fn(&str) -> Option<String>,
    home: Option<PathBuf>,
) -> Option<PathBuf> {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(path) = non_empty(LOG_FILE_ENV) {
        return Some(PathBuf::from(path));
    }

    if let Some(xdg_state) = non_empty("XDG_STATE_HOME") {
        return Some(PathBuf::from(xdg_state).join("codedesk").join("queries.jsonl"));
    }

    home.map(|home| {
        home.join(".local")
            .join("state")
            .join("codedesk")
            .join("queries.jsonl")
    })
}
