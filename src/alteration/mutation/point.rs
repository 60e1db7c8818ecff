use crate::alteration::mutation::{mutate_population, Mutator, DEFAULT_CHROMOSOME_RATE};
use crate::alteration::{require_rates, Alterer, AltererResult};
use crate::constraints::enforce;
use crate::context::EvolutionContext;
use crate::error::Result;
use crate::genetic::{Chromosome, Gene, Population, ProgramGene};

/// Point mutation for program genes.
///
/// Each gene is picked with probability `gene_rate`; one node of its program is then
/// replaced by a random primitive of the same arity, so the tree keeps its shape.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PointMutatorConfig")
)]
#[derive(Debug, Clone)]
pub struct PointMutator {
    probability: f64,
    chromosome_rate: f64,
    gene_rate: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PointMutatorConfig {
    probability: f64,
    chromosome_rate: f64,
    gene_rate: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<PointMutatorConfig> for PointMutator {
    type Error = crate::error::GeneticError;

    fn try_from(config: PointMutatorConfig) -> Result<Self> {
        Self::new(config.probability, config.chromosome_rate, config.gene_rate)
    }
}

impl PointMutator {
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

    pub fn with_gene_rate(probability: f64, gene_rate: f64) -> Result<Self> {
        Self::new(probability, DEFAULT_CHROMOSOME_RATE, gene_rate)
    }

    pub fn gene_rate(&self) -> f64 {
        self.gene_rate
    }

    fn mutate_gene(&self, gene: &ProgramGene, ctx: &mut EvolutionContext) -> ProgramGene {
        let program = gene.value();
        if program.is_empty() {
            return gene.clone();
        }
        let index = ctx.rng.index(program.len());
        let candidates = gene.primitive_set().with_arity(program.nodes()[index].arity());
        if candidates.is_empty() {
            return gene.clone();
        }
        let replacement = candidates[ctx.rng.index(candidates.len())].clone();
        gene.duplicate_with_value(program.with_node(index, replacement))
    }
}

impl Mutator<ProgramGene> for PointMutator {
    fn probability(&self) -> f64 {
        self.probability
    }

    fn chromosome_rate(&self) -> f64 {
        self.chromosome_rate
    }

    fn mutate_chromosome(
        &self,
        chromosome: &Chromosome<ProgramGene>,
        ctx: &mut EvolutionContext,
    ) -> Result<(Chromosome<ProgramGene>, usize)> {
        let mut count = 0;
        let genes = chromosome
            .genes()
            .iter()
            .map(|gene| {
                if ctx.rng.coin(self.gene_rate) {
                    count += 1;
                    self.mutate_gene(gene, ctx)
                } else {
                    gene.clone()
                }
            })
            .collect();
        Ok((chromosome.duplicate_with_genes(genes), count))
    }
}

impl Alterer<ProgramGene> for PointMutator {
    fn alter(
        &self,
        population: Population<ProgramGene>,
        ctx: &mut EvolutionContext,
    ) -> Result<AltererResult<ProgramGene>> {
        mutate_population(self, population, ctx)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::genetic::{Primitive, PrimitiveSet, ProgramChromosomeFactory};
    use crate::genetic::ChromosomeFactory;

    fn primitive_set() -> Arc<PrimitiveSet> {
        Arc::new(
            PrimitiveSet::new(
                vec![
                    Primitive::new("add", 2),
                    Primitive::new("sub", 2),
                    Primitive::new("mul", 2),
                    Primitive::new("neg", 1),
                ],
                vec![Primitive::terminal("x"), Primitive::terminal("1")],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_point_mutation_keeps_shape() {
        let mut ctx = EvolutionContext::seeded(13);
        let chromosome = ProgramChromosomeFactory::new(5, primitive_set(), 4)
            .make(&mut ctx)
            .unwrap();
        let mutator = PointMutator::new(1.0, 1.0, 1.0).unwrap();

        for _ in 0..20 {
            let (mutated, count) = mutator.mutate_chromosome(&chromosome, &mut ctx).unwrap();
            assert_eq!(count, chromosome.len());
            assert!(mutated.verify());
            for (before, after) in chromosome.genes().iter().zip(mutated.genes()) {
                let arities = |g: &ProgramGene| -> Vec<usize> {
                    g.value().nodes().iter().map(|n| n.arity()).collect()
                };
                assert_eq!(arities(before), arities(after));
            }
        }
    }

    #[test]
    fn test_zero_gene_rate() {
        let mut ctx = EvolutionContext::seeded(13);
        let chromosome = ProgramChromosomeFactory::new(3, primitive_set(), 3)
            .make(&mut ctx)
            .unwrap();
        let mutator = PointMutator::new(1.0, 1.0, 0.0).unwrap();
        let (mutated, count) = mutator.mutate_chromosome(&chromosome, &mut ctx).unwrap();
        assert_eq!(count, 0);
        assert_eq!(mutated.values(), chromosome.values());
    }

    #[test]
    fn test_default_chromosome_rate() {
        let mutator = PointMutator::with_gene_rate(0.4, 0.1).unwrap();
        assert_eq!(Mutator::<ProgramGene>::chromosome_rate(&mutator), DEFAULT_CHROMOSOME_RATE);
        assert_eq!(mutator.gene_rate(), 0.1);
        assert!(PointMutator::with_gene_rate(-0.4, 0.1).is_err());
    }
}
