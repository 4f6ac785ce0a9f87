//! Probability engine.
//!
//! Both statistics are derived from the same miss probability `(1 - p)^n`
//! so that `cumulative_probability + dry_percentile / 100 == 1`.

use crate::rate::DropRate;

/// Chance that `trials` independent trials all miss: `(1 - 1/N)^trials`.
pub fn miss_probability(rate: DropRate, trials: u64) -> f64 {
    let miss_once = 1.0 - rate.chance_per_trial();
    // powf keeps counts above i32::MAX well defined
    miss_once.powf(trials as f64)
}

/// Probability of at least one drop after `trials` trials.
///
/// `1 - (1 - 1/N)^trials`, and exactly 0.0 when no trial has happened yet.
///
/// Example with a 1/128 drop after 128 kills:
/// - miss chance per kill: 127/128
/// - miss chance over 128 kills: (127/128)^128 ≈ 0.366
/// - chance of at least one drop: ≈ 0.634
pub fn cumulative_probability(rate: DropRate, trials: u64) -> f64 {
    if trials == 0 {
        return 0.0;
    }
    1.0 - miss_probability(rate, trials)
}

/// Percentage of equivalent actors that would still be dry after `trials`
/// trials: `100 * (1 - 1/N)^trials`.
///
/// A result of 5.0 means only 5% of players go this long without the drop.
pub fn dry_percentile(rate: DropRate, trials: u64) -> f64 {
    miss_probability(rate, trials) * 100.0
}
