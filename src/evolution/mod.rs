pub mod builder;
pub mod challenge;
pub mod engine;
pub mod evaluator;
pub mod limits;
pub mod listener;
pub mod options;

pub use builder::EvolutionEngineBuilder;
pub use challenge::Challenge;
pub use engine::{EvolutionEngine, EvolutionPhase, EvolutionResult};
pub use evaluator::Evaluator;
pub use limits::{EvolutionState, GenerationCount, Limit, SteadyGenerations, TargetFitness};
pub use listener::{EvolutionListener, TracingListener};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel};
