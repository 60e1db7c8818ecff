use crate::alteration::mutation::{mutate_population, Mutator, DEFAULT_CHROMOSOME_RATE};
use crate::alteration::{require_rates, Alterer, AltererResult};
use crate::constraints::enforce;
use crate::context::EvolutionContext;
use crate::error::Result;
use crate::genetic::{Chromosome, Gene, Population};

/// Swaps each gene, with probability `swap_rate`, with a gene at a uniformly random index.
///
/// A gene drawn to swap with itself still counts as a mutation. Chromosomes with fewer than
/// two genes are left alone.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SwapMutatorConfig")
)]
#[derive(Debug, Clone)]
pub struct SwapMutator {
    probability: f64,
    chromosome_rate: f64,
    swap_rate: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SwapMutatorConfig {
    probability: f64,
    chromosome_rate: f64,
    swap_rate: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<SwapMutatorConfig> for SwapMutator {
    type Error = crate::error::GeneticError;

    fn try_from(config: SwapMutatorConfig) -> Result<Self> {
        Self::new(config.probability, config.chromosome_rate, config.swap_rate)
    }
}

impl SwapMutator {
    pub fn new(probability: f64, chromosome_rate: f64, swap_rate: f64) -> Result<Self> {
        enforce(|e| {
            require_rates(
                e,
                &[
                    ("probability", probability),
                    ("chromosomeRate", chromosome_rate),
                    ("swapRate", swap_rate),
                ],
            )
        })?;
        Ok(Self {
            probability,
            chromosome_rate,
            swap_rate,
        })
    }

    pub fn with_swap_rate(probability: f64, swap_rate: f64) -> Result<Self> {
        Self::new(probability, DEFAULT_CHROMOSOME_RATE, swap_rate)
    }

    pub fn swap_rate(&self) -> f64 {
        self.swap_rate
    }
}

impl<G: Gene> Mutator<G> for SwapMutator {
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
        let len = chromosome.len();
        if len < 2 {
            return Ok((chromosome.clone(), 0));
        }
        let mut genes = chromosome.genes().to_vec();
        let picked = ctx.rng.indices(self.swap_rate, len);
        for &i in &picked {
            let j = ctx.rng.index(len);
            genes.swap(i, j);
        }
        Ok((chromosome.duplicate_with_genes(genes), picked.len()))
    }
}

impl<G: Gene> Alterer<G> for SwapMutator {
    fn alter(&self, population: Population<G>, ctx: &mut EvolutionContext) -> Result<AltererResult<G>> {
        mutate_population(self, population, ctx)
    }
}
