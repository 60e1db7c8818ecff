use crate::alteration::crossover::{recombine, validate_permutations, Crossover};
use crate::alteration::{require_rates, Alterer, AltererResult};
use crate::constraints::enforce;
use crate::context::EvolutionContext;
use crate::error::Result;
use crate::genetic::{Chromosome, Gene, Population};

/// Partially mapped crossover (PMX) for permutation chromosomes.
///
/// Two cuts `lo < hi` are drawn. Each child takes the `[lo, hi)` slice from the opposite
/// parent; the rest of its positions keep their own values, except that a value already
/// brought in by the slice is replaced by following the slice's position mapping until a
/// free value is found. Every child is therefore a permutation of its parent's values.
///
/// Both parents must be permutations of the same distinct values; anything else is a
/// collection constraint error.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PartiallyMappedCrossoverConfig")
)]
#[derive(Debug, Clone)]
pub struct PartiallyMappedCrossover {
    chromosome_rate: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PartiallyMappedCrossoverConfig {
    chromosome_rate: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<PartiallyMappedCrossoverConfig> for PartiallyMappedCrossover {
    type Error = crate::error::GeneticError;

    fn try_from(config: PartiallyMappedCrossoverConfig) -> Result<Self> {
        Self::new(config.chromosome_rate)
    }
}

impl PartiallyMappedCrossover {
    pub fn new(chromosome_rate: f64) -> Result<Self> {
        enforce(|e| require_rates(e, &[("chromosomeRate", chromosome_rate)]))?;
        Ok(Self { chromosome_rate })
    }

    /// Crosses two permutations with the slice `[lo, hi)`.
    pub fn crossover_between<G: Gene>(
        first: &Chromosome<G>,
        second: &Chromosome<G>,
        lo: usize,
        hi: usize,
    ) -> (Chromosome<G>, Chromosome<G>) {
        let a = pmx_child(first.genes(), second.genes(), lo, hi);
        let b = pmx_child(second.genes(), first.genes(), lo, hi);
        (first.duplicate_with_genes(a), second.duplicate_with_genes(b))
    }
}

fn pmx_child<G: Gene>(template: &[G], donor: &[G], lo: usize, hi: usize) -> Vec<G> {
    let len = template.len();
    let hi = hi.min(len);
    let lo = lo.min(hi);

    let mut child = template.to_vec();
    for i in lo..hi {
        child[i] = template[i].duplicate_with_value(donor[i].value().clone());
    }
    for i in (0..lo).chain(hi..len) {
        let mut value = template[i].value();
        // A valid permutation resolves in fewer than `len` steps.
        for _ in 0..len {
            match (lo..hi).find(|&j| donor[j].value() == value) {
                Some(j) => value = template[j].value(),
                None => break,
            }
        }
        child[i] = template[i].duplicate_with_value(value.clone());
    }
    child
}

impl<G: Gene> Crossover<G> for PartiallyMappedCrossover {
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
        let lo = ctx.rng.index(len);
        let hi = lo + 1 + ctx.rng.index(len - lo);
        let (a, b) = Self::crossover_between(&parents[0], &parents[1], lo, hi);
        Ok(vec![a, b])
    }
}

impl<G: Gene> Alterer<G> for PartiallyMappedCrossover {
    fn alter(&self, population: Population<G>, ctx: &mut EvolutionContext) -> Result<AltererResult<G>> {
        recombine(self, population, ctx)
    }
}
