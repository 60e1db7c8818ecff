use crate::context::EvolutionContext;
use crate::error::Result;
use crate::genetic::{Gene, Individual, Population};
use crate::ranking::Ranker;
use crate::selection::selector::{ensure_selectable, Selector};

/// Selects every output slot by an independent uniform draw, with replacement.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl RandomSelector {
    pub fn new() -> Self {
        Self
    }
}

impl<G: Gene> Selector<G> for RandomSelector {
    fn select(
        &self,
        population: &[Individual<G>],
        count: usize,
        _ranker: &dyn Ranker,
        ctx: &mut EvolutionContext,
    ) -> Result<Population<G>> {
        ensure_selectable(population)?;
        Ok((0..count)
            .map(|_| population[ctx.rng.index(population.len())].clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetic::{Chromosome, Genotype, IntGene};
    use crate::ranking::FitnessMaxRanker;

    fn population(size: i64) -> Vec<Individual<IntGene>> {
        (0..size)
            .map(|i| {
                let genotype =
                    Genotype::new(vec![Chromosome::new(vec![IntGene::unbounded(i)])]).unwrap();
                Individual::new(genotype).into_evaluated(i as f64)
            })
            .collect()
    }

    #[test]
    fn test_random_selection_counts() {
        let population = population(4);
        let mut ctx = EvolutionContext::seeded(1);
        for count in 0..=8 {
            let selected = RandomSelector
                .select(&population, count, &FitnessMaxRanker, &mut ctx)
                .unwrap();
            assert_eq!(selected.len(), count);
        }
    }

    #[test]
    fn test_random_selection_is_uniform_replay() {
        let population = population(6);
        let mut ctx = EvolutionContext::seeded(99);
        let selected = RandomSelector
            .select(&population, 12, &FitnessMaxRanker, &mut ctx)
            .unwrap();

        let mut replay = EvolutionContext::seeded(99);
        for individual in &selected {
            let expected = replay.rng.index(population.len()) as i64;
            assert_eq!(individual.genotype().flatten(), vec![expected]);
        }
    }

    #[test]
    fn test_empty_population() {
        let population: Vec<Individual<IntGene>> = Vec::new();
        let mut ctx = EvolutionContext::seeded(1);
        let result = RandomSelector.select(&population, 3, &FitnessMaxRanker, &mut ctx);
        assert!(matches!(result, Err(crate::error::GeneticError::Selection(_))));
    }
}
