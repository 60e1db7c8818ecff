use crate::alteration::mutation::{mutate_population, Mutator, DEFAULT_CHROMOSOME_RATE};
use crate::alteration::{require_rates, Alterer, AltererResult};
use crate::constraints::enforce;
use crate::context::EvolutionContext;
use crate::error::Result;
use crate::genetic::{Chromosome, Gene, Population};

/// Reverses the values of a contiguous run of genes.
///
/// The run is found by scanning forward: the first position whose biased coin
/// (`boundary_probability`) comes up marks `start`, the next such position after it marks
/// `end`. Without a hit, `start` defaults to the first position and `end` to the last.
///
/// # Examples
///
/// ```
/// use genforge::alteration::InversionMutator;
/// use genforge::genetic::{Chromosome, IntGene};
///
/// let chromosome: Chromosome<IntGene> = (0..6).map(IntGene::unbounded).collect();
/// let inverted = InversionMutator::invert(&chromosome, 1, 4);
/// assert_eq!(inverted.values(), vec![0, 4, 3, 2, 1, 5]);
/// assert_eq!(InversionMutator::invert(&inverted, 1, 4).values(), chromosome.values());
/// ```
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "InversionMutatorConfig")
)]
#[derive(Debug, Clone)]
pub struct InversionMutator {
    probability: f64,
    chromosome_rate: f64,
    boundary_probability: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct InversionMutatorConfig {
    probability: f64,
    chromosome_rate: f64,
    boundary_probability: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<InversionMutatorConfig> for InversionMutator {
    type Error = crate::error::GeneticError;

    fn try_from(config: InversionMutatorConfig) -> Result<Self> {
        Self::new(config.probability, config.chromosome_rate, config.boundary_probability)
    }
}

impl InversionMutator {
    pub fn new(probability: f64, chromosome_rate: f64, boundary_probability: f64) -> Result<Self> {
        enforce(|e| {
            require_rates(
                e,
                &[
                    ("probability", probability),
                    ("chromosomeRate", chromosome_rate),
                    ("boundaryProbability", boundary_probability),
                ],
            )
        })?;
        Ok(Self {
            probability,
            chromosome_rate,
            boundary_probability,
        })
    }

    /// Applies the default chromosome rate.
    pub fn with_boundary_probability(probability: f64, boundary_probability: f64) -> Result<Self> {
        Self::new(probability, DEFAULT_CHROMOSOME_RATE, boundary_probability)
    }

    pub fn boundary_probability(&self) -> f64 {
        self.boundary_probability
    }

    /// Reverses the values held in positions `start..=end`. Each position keeps its own
    /// gene constraints.
    pub fn invert<G: Gene>(chromosome: &Chromosome<G>, start: usize, end: usize) -> Chromosome<G> {
        let genes = chromosome.genes();
        let end = end.min(genes.len().saturating_sub(1));
        let inverted = genes
            .iter()
            .enumerate()
            .map(|(i, gene)| {
                if start <= i && i <= end {
                    gene.duplicate_with_value(genes[start + end - i].value().clone())
                } else {
                    gene.clone()
                }
            })
            .collect();
        chromosome.duplicate_with_genes(inverted)
    }

    fn boundaries(&self, len: usize, ctx: &mut EvolutionContext) -> (usize, usize) {
        let p = self.boundary_probability;
        let start = (0..len).find(|_| ctx.rng.coin(p)).unwrap_or(0);
        let end = (start + 1..len)
            .find(|_| ctx.rng.coin(p))
            .unwrap_or(len - 1);
        (start, end)
    }
}

impl<G: Gene> Mutator<G> for InversionMutator {
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
        let (start, end) = self.boundaries(len, ctx);
        if end <= start {
            return Ok((chromosome.clone(), 0));
        }
        Ok((Self::invert(chromosome, start, end), 1))
    }
}

impl<G: Gene> Alterer<G> for InversionMutator {
    fn alter(&self, population: Population<G>, ctx: &mut EvolutionContext) -> Result<AltererResult<G>> {
        mutate_population(self, population, ctx)
    }
}
