//! Event Types
//!
//! Host events the tracker reacts to, in the shape they are written to a feed.

use serde::{Deserialize, Serialize};

/// A single event from the host feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedEvent {
    ActorDeath(ActorDeath),
    GameStateChanged(GameStateChanged),
}

impl FeedEvent {
    /// Returns the game tick the event happened on.
    pub fn tick(&self) -> u64 {
        match self {
            FeedEvent::ActorDeath(e) => e.tick,
            FeedEvent::GameStateChanged(e) => e.tick,
        }
    }
}

/// Something in the world died.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorDeath {
    pub tick: u64,
    pub actor: Actor,
}

impl ActorDeath {
    pub fn new(tick: u64, actor: Actor) -> Self {
        Self { tick, actor }
    }
}

/// The actor involved in an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub kind: ActorKind,
    /// Hosts do not always know an actor's name (e.g. while it is still loading).
    #[serde(default)]
    pub name: Option<String>,
}

impl Actor {
    /// Creates a named NPC.
    pub fn npc(name: impl Into<String>) -> Self {
        Self {
            kind: ActorKind::Npc,
            name: Some(name.into()),
        }
    }

    /// Creates a named player.
    pub fn player(name: impl Into<String>) -> Self {
        Self {
            kind: ActorKind::Player,
            name: Some(name.into()),
        }
    }

    /// Creates an actor whose name is unknown.
    pub fn unnamed(kind: ActorKind) -> Self {
        Self { kind, name: None }
    }

    /// Returns the name of a named NPC, `None` for players and unnamed actors.
    pub fn npc_name(&self) -> Option<&str> {
        match self.kind {
            ActorKind::Npc => self.name.as_deref(),
            ActorKind::Player => None,
        }
    }
}

/// Actor categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Npc,
    Player,
}

/// The client's connection state changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStateChanged {
    pub tick: u64,
    pub state: GameState,
}

impl GameStateChanged {
    pub fn new(tick: u64, state: GameState) -> Self {
        Self { tick, state }
    }
}

/// Client connection states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    LoginScreen,
    LoggingIn,
    LoggedIn,
    Hopping,
    ConnectionLost,
}
