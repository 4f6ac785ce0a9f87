//! Drop odds: closed-form probability math for "1 in N" drops.
//!
//! Everything here is a pure function of a [`DropRate`] and a trial count.
//!
//! # Modules
//!
//! - [`rate`]: The validated `DropRate` type
//! - [`engine`]: Cumulative probability and dry percentile
//! - [`simulate`]: Monte Carlo population used to cross-check the closed forms

pub mod engine;
pub mod rate;
pub mod simulate;

pub use engine::{cumulative_probability, dry_percentile, miss_probability};
pub use rate::{DropRate, OddsError};
pub use simulate::simulate_dry_share;
