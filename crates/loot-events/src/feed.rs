//! Feed Reader
//!
//! Reads host events from JSONL, one event per line.

use std::fs;
use std::path::Path;

use crate::event::FeedEvent;

/// Errors that can occur while reading a feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// IO error reading the feed file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A line was not a valid feed event
    #[error("line {line}: {source}")]
    Parse {
        /// 1-based line number in the feed
        line: usize,
        source: serde_json::Error,
    },
}

/// Parses feed events from JSONL text. Blank lines are skipped.
pub fn parse_feed(content: &str) -> Result<Vec<FeedEvent>, FeedError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|source| FeedError::Parse { line: i + 1, source })
        })
        .collect()
}

/// Reads and parses a JSONL feed file.
pub fn read_feed(path: impl AsRef<Path>) -> Result<Vec<FeedEvent>, FeedError> {
    let content = fs::read_to_string(path)?;
    parse_feed(&content)
}
