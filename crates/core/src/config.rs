//! Editor configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::types::HISTORY_CAP;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Maximum number of undo snapshots (at least 1)
    pub history_cap: usize,
    /// Seed for cosmetic tags and random next pieces
    pub seed: u32,
    /// Where the engine query is written
    pub query_path: PathBuf,
    /// Where an engine placement suggestion is read from
    pub suggestion_path: PathBuf,
    /// Tracing log file; logging is discarded when unset
    pub log_path: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_cap: HISTORY_CAP,
            seed: 1,
            query_path: PathBuf::from("board_query.json"),
            suggestion_path: PathBuf::from("suggestion.json"),
            log_path: None,
        }
    }
}

impl EditorConfig {
    /// Read `TETRIS_EDITOR_*` variables; unset or unparsable ones keep their
    /// defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let history_cap = lookup("TETRIS_EDITOR_HISTORY_CAP")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .map(|cap| cap.max(1))
            .unwrap_or(defaults.history_cap);

        let seed = lookup("TETRIS_EDITOR_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let query_path = non_empty(lookup("TETRIS_EDITOR_QUERY_PATH"))
            .map(PathBuf::from)
            .unwrap_or(defaults.query_path);

        let suggestion_path = non_empty(lookup("TETRIS_EDITOR_SUGGESTION_PATH"))
            .map(PathBuf::from)
            .unwrap_or(defaults.suggestion_path);

        let log_path = non_empty(lookup("TETRIS_EDITOR_LOG_PATH")).map(PathBuf::from);

        Self {
            history_cap,
            seed,
            query_path,
            suggestion_path,
            log_path,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
