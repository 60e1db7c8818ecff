//! # Selection
//!
//! Selectors choose individuals from an evaluated population, with replacement. The engine
//! uses one selector for survivors and another for the parents of the next offspring.

pub mod probability;
pub mod random;
pub mod roulette;
pub mod selector;
pub mod tournament;

pub use probability::{
    select_by_probability, CumulativeDistribution, ProbabilitySelector, BINARY_SEARCH_THRESHOLD,
};
pub use random::RandomSelector;
pub use roulette::RouletteWheelSelector;
pub use selector::Selector;
pub use tournament::TournamentSelector;
