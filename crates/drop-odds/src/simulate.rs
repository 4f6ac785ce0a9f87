//! Monte Carlo population of independent actors.
//!
//! Reports never use this; it exists to check the closed forms against an
//! actual simulated population.

use rand::Rng;

use crate::rate::DropRate;

/// Simulates `population` actors each performing `trials` trials and returns
/// the percentage that never got the drop.
///
/// An empty population is treated as entirely dry (100.0).
pub fn simulate_dry_share<R: Rng + ?Sized>(
    rate: DropRate,
    trials: u64,
    population: usize,
    rng: &mut R,
) -> f64 {
    if population == 0 {
        return 100.0;
    }

    let chance = rate.chance_per_trial();
    let dry = (0..population)
        .filter(|_| (0..trials).all(|_| !rng.gen_bool(chance)))
        .count();

    dry as f64 * 100.0 / population as f64
}
