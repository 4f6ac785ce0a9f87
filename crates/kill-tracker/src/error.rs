//! Error types for the kill tracker.

use drop_odds::OddsError;
use loot_events::FeedError;

use crate::config::ConfigError;

/// Errors that can occur while setting up or driving a tracker.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Error loading configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Error reading an event feed
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),
    /// A subject was configured with unusable drop odds
    #[error("subject {subject:?}: {source}")]
    InvalidSubject {
        subject: String,
        #[source]
        source: OddsError,
    },
    /// The subject table is empty
    #[error("no subjects configured")]
    NoSubjects,
    /// A subject name was empty or whitespace only
    #[error("subject name is empty")]
    EmptySubjectKey,
    /// Two configured names normalize to the same subject
    #[error("subject {0:?} is configured more than once")]
    DuplicateSubject(String),
}
