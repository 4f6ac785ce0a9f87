//! Kill Tracker: per-subject kill counts and drop-odds reports.
//!
//! The tracker sits between the host's event feed and its chat box. It counts
//! kills of configured subjects and, after each one, reports how likely the
//! rare drop should have been by now and how many players would still be dry.
//!
//! ```text
//! ┌─────────────┐   feed events    ┌──────────────┐   chat lines   ┌──────┐
//! │    host     │ ───────────────▶ │ kill-tracker │ ─────────────▶ │ sink │
//! └─────────────┘                  └──────────────┘                └──────┘
//! ```
//!
//! # Modules
//!
//! - [`config`]: Subject table and session settings (TOML)
//! - [`report`]: The per-kill `Report` and its chat rendering
//! - [`session`]: Feed filtering and session lifecycle
//! - [`sink`]: Outbound destinations for rendered reports

pub mod config;
pub mod error;
pub mod report;
pub mod session;
pub mod sink;

// Re-export config types
pub use config::{
    default_config_toml, ConfigError, SessionConfig, SubjectConfig, TrackerConfig,
    DEFAULT_DROP_RATE, DEFAULT_SUBJECT,
};

pub use error::TrackerError;
pub use report::{format_report, Report};
pub use session::{SessionSummary, TrackerSession};
pub use sink::{ChatLog, OutputFormat, ReportSink, WriterSink};

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use drop_odds::{cumulative_probability, dry_percentile, DropRate};
use loot_events::SubjectKey;

/// Odds and display name for one tracked subject.
#[derive(Debug, Clone)]
struct TrackedSubject {
    label: String,
    rate: DropRate,
}

/// Counts kills per subject and turns each qualifying kill into a [`Report`].
///
/// The subject table is fixed at construction. Counters live behind one lock,
/// so a tracker can be shared between threads and every qualifying call
/// increments its subject exactly once.
#[derive(Debug)]
pub struct KillTracker {
    /// Configured subjects
    subjects: HashMap<SubjectKey, TrackedSubject>,
    /// Kill counts, created on first kill
    counts: Mutex<HashMap<SubjectKey, u64>>,
}

impl KillTracker {
    /// Creates a tracker, validating every configured subject up front.
    pub fn new(config: &TrackerConfig) -> Result<Self, TrackerError> {
        if config.subjects.is_empty() {
            return Err(TrackerError::NoSubjects);
        }

        let mut subjects = HashMap::with_capacity(config.subjects.len());

        for (name, subject) in &config.subjects {
            let key = SubjectKey::new(name);
            if key.is_empty() {
                return Err(TrackerError::EmptySubjectKey);
            }

            let rate = DropRate::new(subject.drop_rate).map_err(|source| {
                TrackerError::InvalidSubject {
                    subject: name.clone(),
                    source,
                }
            })?;

            let label = subject.label.clone().unwrap_or_else(|| name.trim().to_string());
            if subjects.insert(key, TrackedSubject { label, rate }).is_some() {
                return Err(TrackerError::DuplicateSubject(name.clone()));
            }
        }

        Ok(Self {
            subjects,
            counts: Mutex::new(HashMap::new()),
        })
    }

    /// Creates a tracker from a configuration file.
    pub fn from_config_file(path: &Path) -> Result<Self, TrackerError> {
        let config = TrackerConfig::from_file(path)?;
        Self::new(&config)
    }

    /// Creates a tracker following the default subject.
    pub fn with_defaults() -> Self {
        Self::new(&TrackerConfig::default()).expect("Default config should always work")
    }

    /// Records one kill of `subject` and reports the odds after it.
    ///
    /// Returns `None` without touching any counter when the subject is not
    /// tracked.
    pub fn on_trial_event(&self, subject: &str) -> Option<Report> {
        let key = SubjectKey::new(subject);
        let Some(tracked) = self.subjects.get(&key) else {
            tracing::trace!("Ignoring kill of untracked subject {:?}", subject);
            return None;
        };

        // Hold the lock through the read-increment-report sequence
        let mut counts = self.lock_counts();
        let count = counts.entry(key.clone()).or_insert(0);
        *count += 1;

        let report = Report {
            subject_key: key,
            label: tracked.label.clone(),
            trial_count: *count,
            cumulative_probability: cumulative_probability(tracked.rate, *count),
            dry_percentile: dry_percentile(tracked.rate, *count),
        };
        drop(counts);

        tracing::debug!(
            "{} kill #{} at {}: {:.4} cumulative, {:.2}% dry",
            report.label,
            report.trial_count,
            tracked.rate,
            report.cumulative_probability,
            report.dry_percentile
        );

        Some(report)
    }

    /// Records one kill and delivers the rendered report to `sink`.
    pub fn notify_trial(&self, subject: &str, sink: &mut dyn ReportSink) -> Option<Report> {
        let report = self.on_trial_event(subject)?;
        sink.deliver_report(&report);

        tracing::info!(
            "{} killed! KC: {} | Probability: {:.2}%",
            report.label,
            report.trial_count,
            report.cumulative_probability * 100.0
        );

        Some(report)
    }

    /// Returns the kill count for `subject`, 0 if never killed or untracked.
    pub fn kill_count(&self, subject: &str) -> u64 {
        let key = SubjectKey::new(subject);
        self.lock_counts().get(&key).copied().unwrap_or(0)
    }

    /// Returns a snapshot of every non-zero kill count.
    pub fn kill_counts(&self) -> BTreeMap<SubjectKey, u64> {
        self.lock_counts()
            .iter()
            .map(|(key, count)| (key.clone(), *count))
            .collect()
    }

    /// Returns the tracked subject keys in sorted order.
    pub fn tracked_subjects(&self) -> Vec<&SubjectKey> {
        let mut keys: Vec<_> = self.subjects.keys().collect();
        keys.sort();
        keys
    }

    /// Returns true if kills of `subject` are counted.
    pub fn is_tracked(&self, subject: &str) -> bool {
        self.subjects.contains_key(&SubjectKey::new(subject))
    }

    /// Returns the configured odds for `subject`.
    pub fn drop_rate(&self, subject: &str) -> Option<DropRate> {
        self.subjects.get(&SubjectKey::new(subject)).map(|s| s.rate)
    }

    fn lock_counts(&self) -> MutexGuard<'_, HashMap<SubjectKey, u64>> {
        // Plain integers cannot be left half-updated, so a poisoned lock is still usable
        self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for KillTracker {
    fn default() -> Self {
        Self::with_defaults()
    }
}
