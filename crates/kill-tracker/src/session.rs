//! Tracker session: feed filtering and lifecycle.
//!
//! A session owns a [`KillTracker`] and a sink for as long as the caller keeps
//! it. It turns host feed events into tracker calls: named NPC deaths become
//! kills, and logging in triggers the greeting.

use serde::Serialize;
use std::collections::BTreeMap;

use loot_events::{ActorDeath, FeedEvent, GameState, GameStateChanged};

use crate::config::{SessionConfig, TrackerConfig};
use crate::error::TrackerError;
use crate::report::Report;
use crate::sink::ReportSink;
use crate::KillTracker;

/// What a session did, returned when it finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Feed events observed
    pub events_seen: u64,
    /// Kill reports delivered
    pub reports_delivered: u64,
    /// Final kill count per subject key
    pub kill_counts: BTreeMap<String, u64>,
}

/// A running tracker session.
#[derive(Debug)]
pub struct TrackerSession<S: ReportSink> {
    tracker: KillTracker,
    settings: SessionConfig,
    sink: S,
    events_seen: u64,
    reports_delivered: u64,
}

impl<S: ReportSink> TrackerSession<S> {
    /// Starts a session around an existing tracker.
    pub fn start(tracker: KillTracker, settings: SessionConfig, sink: S) -> Self {
        tracing::info!(
            "Loot Probability session started, tracking {} subject(s)",
            tracker.tracked_subjects().len()
        );

        Self {
            tracker,
            settings,
            sink,
            events_seen: 0,
            reports_delivered: 0,
        }
    }

    /// Builds the tracker from `config` and starts a session.
    pub fn from_config(config: &TrackerConfig, sink: S) -> Result<Self, TrackerError> {
        let tracker = KillTracker::new(config)?;
        Ok(Self::start(tracker, config.session.clone(), sink))
    }

    /// Handles one feed event, returning the report if it was a tracked kill.
    pub fn observe(&mut self, event: &FeedEvent) -> Option<Report> {
        self.events_seen += 1;
        tracing::trace!("Tick {}: event #{}", event.tick(), self.events_seen);

        match event {
            FeedEvent::ActorDeath(death) => self.on_actor_death(death),
            FeedEvent::GameStateChanged(change) => {
                self.on_game_state_changed(change);
                None
            }
        }
    }

    /// Handles every event in order and returns how many produced a report.
    pub fn replay<'a>(&mut self, events: impl IntoIterator<Item = &'a FeedEvent>) -> usize {
        events
            .into_iter()
            .filter_map(|event| self.observe(event))
            .count()
    }

    fn on_actor_death(&mut self, death: &ActorDeath) -> Option<Report> {
        let Some(name) = death.actor.npc_name() else {
            tracing::trace!("Tick {}: ignoring death of {:?}", death.tick, death.actor);
            return None;
        };

        let report = self.tracker.notify_trial(name, &mut self.sink)?;
        self.reports_delivered += 1;
        Some(report)
    }

    fn on_game_state_changed(&mut self, change: &GameStateChanged) {
        if change.state == GameState::LoggedIn && self.settings.announce_login {
            tracing::info!("Tick {}: logged in", change.tick);
            self.sink.deliver(&self.settings.login_message);
        }
    }

    /// Returns the underlying tracker.
    pub fn tracker(&self) -> &KillTracker {
        &self.tracker
    }

    /// Returns the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the number of events observed so far.
    pub fn events_seen(&self) -> u64 {
        self.events_seen
    }

    /// Ends the session, returning its summary and the sink.
    pub fn finish(self) -> (SessionSummary, S) {
        let kill_counts = self
            .tracker
            .kill_counts()
            .into_iter()
            .map(|(key, count)| (key.to_string(), count))
            .collect();

        let summary = SessionSummary {
            events_seen: self.events_seen,
            reports_delivered: self.reports_delivered,
            kill_counts,
        };

        tracing::info!(
            "Loot Probability session stopped after {} event(s), {} report(s)",
            summary.events_seen,
            summary.reports_delivered
        );

        (summary, self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SubjectConfig;
    use crate::sink::ChatLog;
    use loot_events::{Actor, ActorKind};

    fn death(tick: u64, actor: Actor) -> FeedEvent {
        FeedEvent::ActorDeath(ActorDeath::new(tick, actor))
    }

    fn login(tick: u64) -> FeedEvent {
        FeedEvent::GameStateChanged(GameStateChanged::new(tick, GameState::LoggedIn))
    }

    fn default_session() -> TrackerSession<ChatLog> {
        TrackerSession::from_config(&TrackerConfig::default(), ChatLog::new()).unwrap()
    }

    #[test]
    fn test_npc_death_is_counted() {
        let mut session = default_session();

        let report = session.observe(&death(10, Actor::npc("Moss giant"))).unwrap();

        assert_eq!(report.trial_count, 1);
        assert_eq!(session.sink().len(), 1);
        assert!(session.sink().lines()[0].starts_with("Moss Giant #1 |"));
    }

    #[test]
    fn test_player_death_is_ignored() {
        let mut session = default_session();

        // A player who happens to share the name is not an NPC kill
        assert!(session.observe(&death(10, Actor::player("Moss giant"))).is_none());
        assert_eq!(session.tracker().kill_count("Moss giant"), 0);
        assert!(session.sink().is_empty());
    }

    #[test]
    fn test_unnamed_npc_is_ignored() {
        let mut session = default_session();

        assert!(session.observe(&death(10, Actor::unnamed(ActorKind::Npc))).is_none());
        assert!(session.sink().is_empty());
    }

    #[test]
    fn test_untracked_npc_is_ignored() {
        let mut session = default_session();

        assert!(session.observe(&death(10, Actor::npc("Cow"))).is_none());
        assert!(session.sink().is_empty());
        assert_eq!(session.events_seen(), 1);
    }

    #[test]
    fn test_login_greeting() {
        let mut session = default_session();

        session.observe(&login(0));

        assert_eq!(session.sink().lines(), ["Loot Probability plugin loaded!"]);
    }

    #[test]
    fn test_other_game_states_are_silent() {
        let mut session = default_session();

        session.observe(&FeedEvent::GameStateChanged(GameStateChanged::new(
            0,
            GameState::LoginScreen,
        )));
        session.observe(&FeedEvent::GameStateChanged(GameStateChanged::new(
            1,
            GameState::Hopping,
        )));

        assert!(session.sink().is_empty());
    }

    #[test]
    fn test_login_greeting_can_be_disabled() {
        let mut config = TrackerConfig::default();
        config.session.announce_login = false;
        let mut session = TrackerSession::from_config(&config, ChatLog::new()).unwrap();

        session.observe(&login(0));

        assert!(session.sink().is_empty());
    }

    #[test]
    fn test_replay_and_finish() {
        let config = TrackerConfig::default().with_subject("Goblin", SubjectConfig::new(32.0));
        let mut session = TrackerSession::from_config(&config, ChatLog::new()).unwrap();

        let events = vec![
            login(0),
            death(1, Actor::npc("Moss giant")),
            death(2, Actor::npc("Goblin")),
            death(3, Actor::player("Zezima")),
            death(4, Actor::npc("Moss giant")),
            death(5, Actor::npc("Cow")),
        ];

        let reported = session.replay(&events);
        assert_eq!(reported, 3);

        let (summary, log) = session.finish();
        assert_eq!(summary.events_seen, 6);
        assert_eq!(summary.reports_delivered, 3);
        assert_eq!(summary.kill_counts.get("moss giant"), Some(&2));
        assert_eq!(summary.kill_counts.get("goblin"), Some(&1));
        assert_eq!(summary.kill_counts.len(), 2);
        // Greeting plus three reports
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_summary_json() {
        let mut session = default_session();
        session.observe(&death(1, Actor::npc("Moss giant")));

        let (summary, _) = session.finish();
        let json = serde_json::to_string(&summary).unwrap();

        assert_eq!(
            json,
            r#"{"events_seen":1,"reports_delivered":1,"kill_counts":{"moss giant":1}}"#
        );
    }

    #[test]
    fn test_invalid_config_fails_before_any_event() {
        let config = TrackerConfig::default().with_subject("Goblin", SubjectConfig::new(-1.0));

        assert!(TrackerSession::from_config(&config, ChatLog::new()).is_err());
    }
}
