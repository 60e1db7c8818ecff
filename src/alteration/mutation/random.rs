use crate::alteration::mutation::{mutate_population, Mutator, DEFAULT_CHROMOSOME_RATE};
use crate::alteration::{require_rates, Alterer, AltererResult};
use crate::constraints::enforce;
use crate::context::EvolutionContext;
use crate::error::Result;
use crate::genetic::{Chromosome, Gene, Population};

/// Replaces each gene, with probability `gene_rate`, by a freshly generated gene that
/// respects the original gene's own constraints.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RandomMutatorConfig")
)]
#[derive(Debug, Clone)]
pub struct RandomMutator {
    probability: f64,
    chromosome_rate: f64,
    gene_rate: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RandomMutatorConfig {
    probability: f64,
    chromosome_rate: f64,
    gene_rate: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RandomMutatorConfig> for RandomMutator {
    type Error = crate::error::GeneticError;

    fn try_from(config: RandomMutatorConfig) -> Result<Self> {
        Self::new(config.probability, config.chromosome_rate, config.gene_rate)
    }
}

impl RandomMutator {
    /// # Errors
    ///
    /// Returns a double constraint error listing every rate outside `[0, 1]`.
    pub fn new(probability: f64, chromosome_rate: f64, gene_rate: f64) -> Result<Self> {
        enforce(|e| {
            require_rates(
                e,
                &[
                    ("probability", probability),
                    ("chromosomeRate", chromosome_rate),
                    ("geneRate", gene_rate),
                ],
            )
        })?;
        Ok(Self {
            probability,
            chromosome_rate,
            gene_rate,
        })
    }

    /// Like [`new`](Self::new) with the default chromosome rate of 0.5.
    pub fn with_gene_rate(probability: f64, gene_rate: f64) -> Result<Self> {
        Self::new(probability, DEFAULT_CHROMOSOME_RATE, gene_rate)
    }

    pub fn gene_rate(&self) -> f64 {
        self.gene_rate
    }
}

impl<G: Gene> Mutator<G> for RandomMutator {
    fn probability(&self) -> f64 {
        self.probability
    }

    fn chromosome_rate(&self) -> f64 {
        self.chromosome_rate
    }

    fn mutate_chromosome(
        &self,
        chromosome: &Chromosome<G>,
        ctx: &mut EvolutionContext,
    ) -> Result<(Chromosome<G>, usize)> {
        let mut count = 0;
        let genes = chromosome
            .genes()
            .iter()
            .map(|gene| {
                if ctx.rng.coin(self.gene_rate) {
                    count += 1;
                    gene.generate(&mut ctx.rng)
                } else {
                    gene.clone()
                }
            })
            .collect();
        Ok((chromosome.duplicate_with_genes(genes), count))
    }
}

impl<G: Gene> Alterer<G> for RandomMutator {
    fn alter(&self, population: Population<G>, ctx: &mut EvolutionContext) -> Result<AltererResult<G>> {
        mutate_population(self, population, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetic::{ChromosomeFactory, IntChromosomeFactory, IntGene};

    #[test]
    fn test_zero_gene_rate() {
        let mut ctx = EvolutionContext::seeded(5);
        let chromosome = IntChromosomeFactory::new(8).with_range(0..=9).make(&mut ctx).unwrap();
        let mutator = RandomMutator::new(1.0, 1.0, 0.0).unwrap();
        let (mutated, count) = mutator.mutate_chromosome(&chromosome, &mut ctx).unwrap();
        assert_eq!(count, 0);
        assert_eq!(mutated.values(), chromosome.values());
    }

    #[test]
    fn test_full_gene_rate_respects_constraints() {
        let mut ctx = EvolutionContext::seeded(5);
        let chromosome = IntChromosomeFactory::new(8)
            .with_range(0..=100)
            .with_filter(|v| v % 2 == 0)
            .make(&mut ctx)
            .unwrap();
        let mutator = RandomMutator::new(1.0, 1.0, 1.0).unwrap();
        let (mutated, count) = mutator.mutate_chromosome(&chromosome, &mut ctx).unwrap();
        assert_eq!(count, chromosome.len());
        assert!(mutated.verify());
        assert!(mutated.genes().iter().all(|g| g.range() == &(0..=100)));
    }

    #[test]
    fn test_default_chromosome_rate() {
        let mutator = RandomMutator::with_gene_rate(0.1, 0.2).unwrap();
        assert_eq!(Mutator::<IntGene>::chromosome_rate(&mutator), DEFAULT_CHROMOSOME_RATE);
        assert_eq!(mutator.gene_rate(), 0.2);
    }

    #[test]
    fn test_invalid_rates() {
        let error = RandomMutator::new(2.0, 0.5, -1.0).unwrap_err();
        let violations = error.violations().unwrap();
        assert_eq!(violations.len(), 2);
        assert!(violations.contains_clause("probability"));
        assert!(violations.contains_clause("geneRate"));
    }
}
