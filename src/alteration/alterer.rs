use std::fmt::Debug;

use crate::context::EvolutionContext;
use crate::error::Result;
use crate::genetic::{Gene, Population};

/// The outcome of one alteration stage.
#[derive(Debug, Clone)]
pub struct AltererResult<G: Gene> {
    /// The altered population, the same size as the input.
    pub population: Population<G>,
    /// How many crossovers or gene mutations were performed.
    pub alterations: usize,
}

impl<G: Gene> AltererResult<G> {
    pub fn new(population: Population<G>, alterations: usize) -> Self {
        Self {
            population,
            alterations,
        }
    }

    /// Wraps a population no operator touched.
    pub fn unchanged(population: Population<G>) -> Self {
        Self::new(population, 0)
    }
}

/// A stage of the offspring pipeline: crossover or mutation.
///
/// Alterers consume the population and return a new one. Individuals whose genotype
/// changed come back unevaluated; the others keep their fitness.
pub trait Alterer<G: Gene>: Debug + Send + Sync {
    fn alter(&self, population: Population<G>, ctx: &mut EvolutionContext) -> Result<AltererResult<G>>;
}
