use std::fmt::Debug;

use crate::context::EvolutionContext;
use crate::error::{GeneticError, Result};
use crate::genetic::{Gene, Individual, Population};
use crate::ranking::Ranker;

/// Trait for selection operators.
///
/// A selector chooses `count` individuals from a population, by default with replacement.
/// It never modifies the population it reads from.
///
/// # Examples
///
/// ```
/// use genforge::context::EvolutionContext;
/// use genforge::genetic::{BoolGene, Chromosome, Genotype, Individual};
/// use genforge::ranking::FitnessMaxRanker;
/// use genforge::selection::{Selector, TournamentSelector};
///
/// let population: Vec<Individual<BoolGene>> = (0..5)
///     .map(|i| {
///         let genotype = Genotype::new(vec![Chromosome::new(vec![BoolGene::new(i % 2 == 0)])]).unwrap();
///         Individual::new(genotype).into_evaluated(i as f64)
///     })
///     .collect();
///
/// let mut ctx = EvolutionContext::seeded(42);
/// let selector = TournamentSelector::new(3).unwrap();
/// let selected = selector.select(&population, 10, &FitnessMaxRanker, &mut ctx).unwrap();
///
/// assert_eq!(selected.len(), 10);
/// ```
pub trait Selector<G: Gene>: Debug + Send + Sync {
    /// Selects `count` individuals from the population.
    ///
    /// # Errors
    ///
    /// Returns a `Selection` error if the population is empty.
    fn select(
        &self,
        population: &[Individual<G>],
        count: usize,
        ranker: &dyn Ranker,
        ctx: &mut EvolutionContext,
    ) -> Result<Population<G>>;
}

pub(crate) fn ensure_selectable<G: Gene>(population: &[Individual<G>]) -> Result<()> {
    if population.is_empty() {
        return Err(GeneticError::Selection(
            "Cannot select from an empty population".to_string(),
        ));
    }
    Ok(())
}
