//! Loot Probability feed replay
//!
//! Run with: cargo run -p kill-tracker --bin loot-replay
//!
//! Examples:
//!   cargo run -p kill-tracker --bin loot-replay -- --feed events.jsonl
//!   cargo run -p kill-tracker --bin loot-replay -- --feed events.jsonl --config tracker.toml --json
//!   cargo run -p kill-tracker --bin loot-replay -- --print-default-config > tracker.toml

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use kill_tracker::{
    default_config_toml, OutputFormat, SessionSummary, TrackerConfig, TrackerError,
    TrackerSession, WriterSink,
};

/// Replays a host event feed through the kill tracker
#[derive(Parser, Debug)]
#[command(name = "loot-replay")]
#[command(about = "Replay NPC kills and report rare drop odds after each one")]
struct Args {
    /// JSONL feed of host events
    #[arg(long, required_unless_present = "print_default_config")]
    feed: Option<PathBuf>,

    /// Tracker configuration (TOML). Tracks the Moss giant at 1/128 when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit reports as JSON lines instead of chat text
    #[arg(long)]
    json: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Reports go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    if args.print_default_config {
        print!("{}", default_config_toml());
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(summary) => {
            for (subject, count) in &summary.kill_counts {
                tracing::info!("{}: {} kill(s)", subject, count);
            }
            if args.json {
                print_summary_json(&summary);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Writes the summary as the last JSON line, after the reports.
fn print_summary_json(summary: &SessionSummary) {
    match serde_json::to_string(&serde_json::json!({ "summary": summary })) {
        Ok(line) => println!("{}", line),
        Err(e) => tracing::warn!("Failed to serialize session summary: {}", e),
    }
}

fn run(args: &Args) -> Result<SessionSummary, TrackerError> {
    let config = match &args.config {
        Some(path) => {
            tracing::info!("Loading config from {:?}", path);
            TrackerConfig::from_file(path)?
        }
        None => TrackerConfig::default(),
    };

    let format = if args.json {
        OutputFormat::JsonLines
    } else {
        OutputFormat::Text
    };
    let sink = WriterSink::new(io::stdout().lock(), format);
    let mut session = TrackerSession::from_config(&config, sink)?;

    if let Some(feed) = &args.feed {
        let events = loot_events::read_feed(feed)?;
        tracing::info!("Replaying {} event(s) from {:?}", events.len(), feed);
        session.replay(&events);
    }

    let (summary, sink) = session.finish();
    if sink.failed_writes() > 0 {
        tracing::warn!("{} report line(s) could not be written", sink.failed_writes());
    }

    Ok(summary)
}
