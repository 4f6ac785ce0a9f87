//! Integration tests for the kill tracker.
//!
//! These tests replay fixture feeds and configs through the full pipeline
//! and hammer a shared tracker from several threads.

use kill_tracker::{
    ChatLog, KillTracker, OutputFormat, Report, SubjectConfig, TrackerConfig, TrackerError,
    TrackerSession, WriterSink,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn sample_session() -> TrackerSession<ChatLog> {
    let config = TrackerConfig::from_file(&fixture("sample_tracker.toml")).expect("Failed to load config");
    TrackerSession::from_config(&config, ChatLog::new()).expect("Failed to start session")
}

/// Test that fixtures load correctly.
#[test]
fn test_fixtures_load() {
    let events = loot_events::read_feed(fixture("sample_feed.jsonl")).unwrap();
    let config = TrackerConfig::from_file(&fixture("sample_tracker.toml")).unwrap();

    assert_eq!(events.len(), 12);
    assert_eq!(config.subjects.len(), 2);
    assert_eq!(config.session.login_message, "Loot tracker ready");
}

/// Test the full replay pipeline with sample data.
#[test]
fn test_full_replay_pipeline() {
    let events = loot_events::read_feed(fixture("sample_feed.jsonl")).unwrap();
    let mut session = sample_session();

    let reported = session.replay(&events);
    assert_eq!(reported, 5);

    let (summary, log) = session.finish();
    assert_eq!(summary.events_seen, 12);
    assert_eq!(summary.kill_counts.get("moss giant"), Some(&3));
    assert_eq!(summary.kill_counts.get("hill giant"), Some(&2));
    assert_eq!(summary.kill_counts.get("cow"), None);

    let lines = log.lines();
    assert_eq!(
        lines,
        [
            "Loot tracker ready",
            "Moss Giant #1 | Chance for rare drop: 0.78% | Drier than 99.2% of players",
            "Hill Giant #1 | Chance for rare drop: 0.02% | Drier than 100.0% of players",
            "Moss Giant #2 | Chance for rare drop: 1.56% | Drier than 98.4% of players",
            "Loot tracker ready",
            "Moss Giant #3 | Chance for rare drop: 2.33% | Drier than 97.7% of players",
            "Hill Giant #2 | Chance for rare drop: 0.04% | Drier than 100.0% of players",
        ]
    );
}

/// Three sequential kills report counts 1, 2, 3.
#[test]
fn test_three_moss_giant_kills() {
    let tracker = KillTracker::with_defaults();

    let counts: Vec<u64> = (0..3)
        .filter_map(|_| tracker.on_trial_event("Moss giant"))
        .map(|report| report.trial_count)
        .collect();

    assert_eq!(counts, vec![1, 2, 3]);
}

/// The odds after 128 kills of a 1/128 drop.
#[test]
fn test_expected_kill_count_report() {
    let tracker = KillTracker::with_defaults();
    let report = (0..128)
        .filter_map(|_| tracker.on_trial_event("Moss giant"))
        .last()
        .unwrap();

    assert_eq!(report.trial_count, 128);
    assert!((report.cumulative_probability - 0.6338).abs() < 1e-3);
    assert!((report.dry_percentile - 36.62).abs() < 0.1);
    assert!(
        (report.cumulative_probability + report.dry_percentile / 100.0 - 1.0).abs() < 1e-12
    );
    assert_eq!(
        kill_tracker::format_report(&report),
        "Moss Giant #128 | Chance for rare drop: 63.36% | Drier than 36.6% of players"
    );
}

/// Exact ties in the chat line round half up.
#[test]
fn test_report_rounds_ties_half_up() {
    let config = TrackerConfig::empty().with_subject("Imp", SubjectConfig::new(4.0));
    let tracker = KillTracker::new(&config).unwrap();
    let mut log = ChatLog::new();

    tracker.notify_trial("Imp", &mut log);
    let report = tracker.notify_trial("Imp", &mut log).unwrap();

    assert_eq!(report.dry_percentile, 56.25);
    assert_eq!(
        log.last(),
        Some("Imp #2 | Chance for rare drop: 43.75% | Drier than 56.3% of players")
    );
}

/// An explicit but empty subject table is rejected at setup.
#[test]
fn test_empty_subject_table_is_fatal() {
    let config = TrackerConfig::from_str("[subjects]\n").unwrap();
    assert!(config.subjects.is_empty());

    assert!(matches!(
        KillTracker::new(&config),
        Err(TrackerError::NoSubjects)
    ));
}

/// Concurrent kills from many threads are each counted exactly once.
#[test]
fn test_concurrent_kills_are_not_lost() {
    let config = TrackerConfig::default().with_subject("Goblin", SubjectConfig::new(32.0));
    let tracker = Arc::new(KillTracker::new(&config).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let tracker = Arc::clone(&tracker);
            thread::spawn(move || {
                let subject = if i % 2 == 0 { "Moss giant" } else { "Goblin" };
                (0..500)
                    .filter_map(|_| tracker.on_trial_event(subject))
                    .map(|report| report.trial_count)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut moss_counts = Vec::new();
    let mut goblin_counts = Vec::new();
    for (i, handle) in handles.into_iter().enumerate() {
        let counts = handle.join().unwrap();
        if i % 2 == 0 {
            moss_counts.extend(counts);
        } else {
            goblin_counts.extend(counts);
        }
    }

    assert_eq!(tracker.kill_count("Moss giant"), 2000);
    assert_eq!(tracker.kill_count("Goblin"), 2000);

    // Every count from 1 to 2000 was handed out exactly once
    moss_counts.sort_unstable();
    goblin_counts.sort_unstable();
    assert_eq!(moss_counts, (1..=2000).collect::<Vec<u64>>());
    assert_eq!(goblin_counts, (1..=2000).collect::<Vec<u64>>());
}

/// A bad subject in a config file is fatal at setup.
#[test]
fn test_invalid_config_file_is_fatal() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[subjects.\"Moss giant\"]\ndrop_rate = -128.0").unwrap();

    let err = KillTracker::from_config_file(file.path()).unwrap_err();
    assert!(matches!(err, TrackerError::InvalidSubject { .. }));
    assert!(err.to_string().contains("Moss giant"));
}

/// A config file that does not parse surfaces as a config error.
#[test]
fn test_malformed_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[subjects").unwrap();

    let err = KillTracker::from_config_file(file.path()).unwrap_err();
    assert!(matches!(err, TrackerError::Config(_)));
}

/// JSON output round-trips into reports.
#[test]
fn test_json_lines_output() {
    let events = loot_events::read_feed(fixture("sample_feed.jsonl")).unwrap();
    let config = TrackerConfig::from_file(&fixture("sample_tracker.toml")).unwrap();
    let sink = WriterSink::new(Vec::new(), OutputFormat::JsonLines);
    let mut session = TrackerSession::from_config(&config, sink).unwrap();

    session.replay(&events);
    let (_, sink) = session.finish();
    let output = String::from_utf8(sink.into_inner()).unwrap();

    let reports: Vec<Report> = output
        .lines()
        .filter(|line| !line.contains("\"message\""))
        .map(|line| serde_json::from_str(line).expect("Failed to parse report"))
        .collect();

    assert_eq!(reports.len(), 5);
    assert_eq!(reports.last().unwrap().label, "Hill Giant");
    assert_eq!(reports.last().unwrap().trial_count, 2);
}
