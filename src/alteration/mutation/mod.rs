//! Mutation operators.
//!
//! Each individual is picked with probability `probability`; each of its chromosomes is
//! then mutated with probability `chromosome_rate`. What happens inside a chromosome is up
//! to the concrete mutator.

pub mod inversion;
pub mod point;
pub mod random;
pub mod swap;

pub use inversion::InversionMutator;
pub use point::PointMutator;
pub use random::RandomMutator;
pub use swap::SwapMutator;

use std::fmt::Debug;

use crate::alteration::AltererResult;
use crate::context::EvolutionContext;
use crate::error::Result;
use crate::genetic::{Chromosome, Gene, Individual, Population};

/// The chromosome rate used when none is given.
pub const DEFAULT_CHROMOSOME_RATE: f64 = 0.5;

pub trait Mutator<G: Gene>: Debug + Send + Sync {
    /// Probability that an individual is mutated at all.
    fn probability(&self) -> f64;

    /// Probability that a chromosome of a mutated individual is mutated.
    fn chromosome_rate(&self) -> f64;

    /// Returns the mutated chromosome and the number of mutations performed.
    fn mutate_chromosome(
        &self,
        chromosome: &Chromosome<G>,
        ctx: &mut EvolutionContext,
    ) -> Result<(Chromosome<G>, usize)>;
}

/// Runs a mutator over a whole population.
///
/// Individuals with at least one mutation come back unevaluated.
pub fn mutate_population<G, M>(
    mutator: &M,
    population: Population<G>,
    ctx: &mut EvolutionContext,
) -> Result<AltererResult<G>>
where
    G: Gene,
    M: Mutator<G> + ?Sized,
{
    let mut alterations = 0;
    let mut mutated = Vec::with_capacity(population.len());
    for individual in population {
        if !ctx.rng.coin(mutator.probability()) {
            mutated.push(individual);
            continue;
        }

        let mut count = 0;
        let mut chromosomes = Vec::with_capacity(individual.genotype().len());
        for chromosome in individual.genotype().chromosomes() {
            if ctx.rng.coin(mutator.chromosome_rate()) {
                let (chromosome, mutations) = mutator.mutate_chromosome(chromosome, ctx)?;
                count += mutations;
                chromosomes.push(chromosome);
            } else {
                chromosomes.push(chromosome.clone());
            }
        }

        if count == 0 {
            mutated.push(individual);
        } else {
            alterations += count;
            let genotype = individual.genotype().duplicate_with_chromosomes(chromosomes);
            mutated.push(Individual::new(genotype));
        }
    }
    Ok(AltererResult::new(mutated, alterations))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::genetic::{Genotype, IntGene};

    pub(crate) fn int_chromosome(values: &[i64]) -> Chromosome<IntGene> {
        values.iter().map(|&v| IntGene::unbounded(v)).collect()
    }

    pub(crate) fn evaluated(values: &[i64]) -> Individual<IntGene> {
        Individual::new(Genotype::new(vec![int_chromosome(values)]).unwrap()).into_evaluated(1.0)
    }

    #[test]
    fn test_zero_probability_changes_nothing() {
        let mut ctx = EvolutionContext::seeded(1);
        let mutator = RandomMutator::new(0.0, 1.0, 1.0).unwrap();
        let population = vec![evaluated(&[1, 2, 3]), evaluated(&[4, 5, 6])];
        let result = mutate_population(&mutator, population, &mut ctx).unwrap();
        assert_eq!(result.alterations, 0);
        assert!(result.population.iter().all(|i| i.is_evaluated()));
        assert_eq!(result.population[1].genotype().flatten(), vec![4, 5, 6]);
    }

    #[test]
    fn test_mutated_individuals_are_unevaluated() {
        let mut ctx = EvolutionContext::seeded(1);
        let mutator = RandomMutator::new(1.0, 1.0, 1.0).unwrap();
        let population = vec![evaluated(&[1, 2, 3]), evaluated(&[4, 5, 6])];
        let result = mutate_population(&mutator, population, &mut ctx).unwrap();
        assert_eq!(result.alterations, 6);
        assert!(result.population.iter().all(|i| !i.is_evaluated()));
    }
}
