//! Shared event types for loot tracking.
//!
//! This crate contains pure data structures with no tracking logic.
//! It is a dependency for the tracker and anything that produces a feed.

pub mod event;
pub mod feed;
pub mod subject;

// Re-export event types
pub use event::{Actor, ActorDeath, ActorKind, FeedEvent, GameState, GameStateChanged};

// Re-export feed reading
pub use feed::{parse_feed, read_feed, FeedError};

pub use subject::SubjectKey;
