//! # Alteration
//!
//! Crossovers recombine groups of parents, mutators perturb single individuals. Both
//! implement [`Alterer`], so the engine can run them as one ordered pipeline.
//!
//! ## Example
//!
//! ```rust
//! use genforge::alteration::{Alterer, RandomMutator, SinglePointCrossover};
//!
//! let pipeline: Vec<Box<dyn Alterer<genforge::genetic::IntGene>>> = vec![
//!     Box::new(SinglePointCrossover::new(0.6).unwrap()),
//!     Box::new(RandomMutator::new(0.1, 0.5, 0.2).unwrap()),
//! ];
//! assert_eq!(pipeline.len(), 2);
//! ```

pub mod alterer;
pub mod crossover;
pub mod mutation;

pub use alterer::{Alterer, AltererResult};
pub use crossover::{
    AverageCrossover, CombineCrossover, Crossover, PartiallyMappedCrossover,
    PositionBasedCrossover, SinglePointCrossover,
};
pub use mutation::{InversionMutator, Mutator, PointMutator, RandomMutator, SwapMutator};

use crate::constraints::{DoubleRequirement, Enforcer};

/// Requires every named rate to lie in `[0, 1]`.
pub(crate) fn require_rates(e: &mut Enforcer, rates: &[(&str, f64)]) {
    for (name, rate) in rates {
        e.require(name, rate, DoubleRequirement::BeInUnitInterval);
    }
}
