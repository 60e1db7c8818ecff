use crate::alteration::crossover::{recombine, validate_permutations, Crossover};
use crate::alteration::{require_rates, Alterer, AltererResult};
use crate::constraints::enforce;
use crate::context::EvolutionContext;
use crate::error::{GeneticError, OptionExt, Result};
use crate::genetic::{Chromosome, Gene, Population};

/// Position-based crossover for permutation chromosomes.
///
/// A random set of positions is drawn, each position with probability `gene_rate`. A child
/// keeps its own parent's values at those positions and fills the remaining positions, in
/// order, with the other parent's values that are still missing.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PositionBasedCrossoverConfig")
)]
#[derive(Debug, Clone)]
pub struct PositionBasedCrossover {
    chromosome_rate: f64,
    gene_rate: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PositionBasedCrossoverConfig {
    chromosome_rate: f64,
    gene_rate: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<PositionBasedCrossoverConfig> for PositionBasedCrossover {
    type Error = crate::error::GeneticError;

    fn try_from(config: PositionBasedCrossoverConfig) -> Result<Self> {
        Self::new(config.chromosome_rate, config.gene_rate)
    }
}

impl PositionBasedCrossover {
    pub fn new(chromosome_rate: f64, gene_rate: f64) -> Result<Self> {
        enforce(|e| {
            require_rates(
                e,
                &[("chromosomeRate", chromosome_rate), ("geneRate", gene_rate)],
            )
        })?;
        Ok(Self {
            chromosome_rate,
            gene_rate,
        })
    }

    /// Probability that a position keeps its own parent's value.
    pub fn gene_rate(&self) -> f64 {
        self.gene_rate
    }

    /// Crosses two permutations keeping the given ascending positions.
    pub fn crossover_keeping<G: Gene>(
        first: &Chromosome<G>,
        second: &Chromosome<G>,
        positions: &[usize],
    ) -> Result<(Chromosome<G>, Chromosome<G>)> {
        let a = position_child(first.genes(), second.genes(), positions)?;
        let b = position_child(second.genes(), first.genes(), positions)?;
        Ok((first.duplicate_with_genes(a), second.duplicate_with_genes(b)))
    }
}

fn position_child<G: Gene>(keeper: &[G], filler: &[G], positions: &[usize]) -> Result<Vec<G>> {
    let kept: Vec<&G::Value> = positions.iter().map(|&i| keeper[i].value()).collect();
    let mut fill = filler
        .iter()
        .map(Gene::value)
        .filter(|v| !kept.contains(v));

    let mut child = Vec::with_capacity(keeper.len());
    for (i, gene) in keeper.iter().enumerate() {
        if positions.binary_search(&i).is_ok() {
            child.push(gene.clone());
        } else {
            let value = fill.next().ok_or_else_genetic(|| {
                GeneticError::Alteration("parents are not permutations of each other".to_string())
            })?;
            child.push(gene.duplicate_with_value(value.clone()));
        }
    }
    Ok(child)
}

impl<G: Gene> Crossover<G> for PositionBasedCrossover {
    fn chromosome_rate(&self) -> f64 {
        self.chromosome_rate
    }

    fn crossover_chromosomes(
        &self,
        parents: &[Chromosome<G>],
        ctx: &mut EvolutionContext,
    ) -> Result<Vec<Chromosome<G>>> {
        validate_permutations(parents, ctx)?;
        let len = parents.first().map_or(0, Chromosome::len);
        if parents.len() < 2 || len < 2 {
            return Ok(parents.to_vec());
        }
        let positions = ctx.rng.indices(self.gene_rate, len);
        let (a, b) = Self::crossover_keeping(&parents[0], &parents[1], &positions)?;
        Ok(vec![a, b])
    }
}

impl<G: Gene> Alterer<G> for PositionBasedCrossover {
    fn alter(&self, population: Population<G>, ctx: &mut EvolutionContext) -> Result<AltererResult<G>> {
        recombine(self, population, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alteration::crossover::tests::{int_chromosome, int_individual, sorted};

    #[test]
    fn test_fixed_positions() {
        let first = int_chromosome(&[1, 2, 3, 4, 5]);
        let second = int_chromosome(&[5, 4, 3, 2, 1]);
        let (a, b) = PositionBasedCrossover::crossover_keeping(&first, &second, &[0, 2]).unwrap();
        // keeps 1 and 3, fills with 5, 4, 2 in the second parent's order
        assert_eq!(a.values(), vec![1, 5, 3, 4, 2]);
        assert_eq!(b.values(), vec![5, 1, 3, 2, 4]);
    }

    #[test]
    fn test_preserves_permutations() {
        let mut ctx = EvolutionContext::seeded(3);
        let crossover = PositionBasedCrossover::new(1.0, 0.5).unwrap();
        let first = int_chromosome(&[0, 1, 2, 3, 4, 5, 6, 7]);
        let second = int_chromosome(&[7, 5, 3, 1, 6, 4, 2, 0]);
        for _ in 0..200 {
            let children = crossover
                .crossover_chromosomes(&[first.clone(), second.clone()], &mut ctx)
                .unwrap();
            for child in &children {
                assert_eq!(sorted(child.values()), (0..8).collect::<Vec<i64>>());
            }
        }
    }

    #[test]
    fn test_population_alteration() {
        let mut ctx = EvolutionContext::seeded(3);
        let crossover = PositionBasedCrossover::new(1.0, 0.5).unwrap();
        let population = vec![
            int_individual(&[0, 1, 2, 3]),
            int_individual(&[3, 2, 1, 0]),
            int_individual(&[2, 0, 3, 1]),
        ];
        let result = crossover.alter(population, &mut ctx).unwrap();
        for individual in &result.population {
            assert_eq!(sorted(individual.genotype().flatten()), vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn test_gene_rate_is_validated() {
        let error = PositionBasedCrossover::new(0.5, 1.5).unwrap_err();
        let violations = error.violations().unwrap();
        assert_eq!(violations.len(), 1);
        assert!(violations.contains_clause("geneRate"));

        let error = PositionBasedCrossover::new(2.0, -0.1).unwrap_err();
        assert_eq!(error.violations().unwrap().len(), 2);
    }

    #[test]
    fn test_full_gene_rate_keeps_parents() {
        let mut ctx = EvolutionContext::seeded(5);
        let crossover = PositionBasedCrossover::new(1.0, 1.0).unwrap();
        let first = int_chromosome(&[0, 1, 2, 3, 4, 5]);
        let second = int_chromosome(&[5, 3, 1, 0, 2, 4]);
        let children = crossover
            .crossover_chromosomes(&[first.clone(), second.clone()], &mut ctx)
            .unwrap();
        assert_eq!(children[0].values(), first.values());
        assert_eq!(children[1].values(), second.values());
    }
}
