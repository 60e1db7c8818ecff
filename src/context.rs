//! # EvolutionContext
//!
//! Per-run state handed by `&mut` to every factory and operator: the random stream and the
//! validation mode. A context is created once per run, so neither outlives it.

use crate::constraints::ValidationMode;
use crate::rng::RandomNumberGenerator;

#[derive(Debug, Clone)]
pub struct EvolutionContext {
    pub rng: RandomNumberGenerator,
    pub validation: ValidationMode,
}

impl EvolutionContext {
    pub fn new(rng: RandomNumberGenerator, validation: ValidationMode) -> Self {
        Self { rng, validation }
    }

    /// A context with a seeded stream that enforces every check.
    pub fn seeded(seed: u64) -> Self {
        Self::new(RandomNumberGenerator::from_seed(seed), ValidationMode::Enforce)
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }
}

impl Default for EvolutionContext {
    fn default() -> Self {
        Self::new(RandomNumberGenerator::new(), ValidationMode::Enforce)
    }
}
