pub mod alteration;
pub mod caching;
pub mod constraints;
pub mod context;
pub mod error;
pub mod evolution;
pub mod genetic;
pub mod ranking;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use context::EvolutionContext;
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{Challenge, EvolutionEngine, EvolutionEngineBuilder, EvolutionOptions};
pub use genetic::{Chromosome, Gene, Genotype, GenotypeFactory, Individual, Population};
pub use ranking::{FitnessMaxRanker, FitnessMinRanker, Ranker, RankerExt};
