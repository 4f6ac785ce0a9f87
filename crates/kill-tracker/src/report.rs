//! Per-kill reports and their chat rendering.

use loot_events::SubjectKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Statistics for one qualifying kill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub subject_key: SubjectKey,
    /// Display name
    pub label: String,
    pub trial_count: u64,
    /// Chance of at least one drop so far, in [0, 1]
    pub cumulative_probability: f64,
    /// Percentage of players who would still be dry, in [0, 100]
    pub dry_percentile: f64,
}

/// Renders a report as a single chat line.
///
/// `Moss Giant #128 | Chance for rare drop: 63.36% | Drier than 36.6% of players`
///
/// Ties round half up (56.25 shows as 56.3), not to even.
pub fn format_report(report: &Report) -> String {
    format!(
        "{} #{} | Chance for rare drop: {:.2}% | Drier than {:.1}% of players",
        report.label,
        report.trial_count,
        round_half_up(report.cumulative_probability * 100.0, 2),
        round_half_up(report.dry_percentile, 1)
    )
}

/// Rounds to `decimals` places with ties away from zero.
fn round_half_up(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_report(self))
    }
}
