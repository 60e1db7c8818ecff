use std::fmt;
use std::sync::Arc;

use crate::alteration::crossover::{recombine, validate_parents, Crossover};
use crate::alteration::{require_rates, Alterer, AltererResult};
use crate::constraints::{enforce, Enforcer, IntRequirement};
use crate::context::EvolutionContext;
use crate::error::Result;
use crate::genetic::{Chromosome, Gene, NumberGene, Population};

/// Merges the genes every parent holds at one position into a single gene.
///
/// The first gene of the slice is the one being replaced.
pub type Combiner<G> = Arc<dyn Fn(&[G]) -> Result<G> + Send + Sync>;

/// For each gene position, with probability `gene_rate`, replaces the gene with a
/// combination of every parent's gene at that position. Otherwise the gene is kept.
pub struct CombineCrossover<G: Gene> {
    combiner: Combiner<G>,
    chromosome_rate: f64,
    gene_rate: f64,
    num_parents: usize,
}

impl<G: Gene> CombineCrossover<G> {
    /// # Errors
    ///
    /// Returns a double constraint error listing every rate outside `[0, 1]`.
    pub fn new<F>(combiner: F, chromosome_rate: f64, gene_rate: f64) -> Result<Self>
    where
        F: Fn(&[G]) -> Result<G> + Send + Sync + 'static,
    {
        Self::with_parents(combiner, chromosome_rate, gene_rate, 2)
    }

    /// Like [`new`](Self::new), combining `num_parents` parents (at least 2).
    pub fn with_parents<F>(
        combiner: F,
        chromosome_rate: f64,
        gene_rate: f64,
        num_parents: usize,
    ) -> Result<Self>
    where
        F: Fn(&[G]) -> Result<G> + Send + Sync + 'static,
    {
        enforce(|e| require_combine_parameters(e, chromosome_rate, gene_rate, num_parents))?;
        Ok(Self {
            combiner: Arc::new(combiner),
            chromosome_rate,
            gene_rate,
            num_parents,
        })
    }

    pub fn gene_rate(&self) -> f64 {
        self.gene_rate
    }
}

impl<G: Gene> fmt::Debug for CombineCrossover<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombineCrossover")
            .field("chromosome_rate", &self.chromosome_rate)
            .field("gene_rate", &self.gene_rate)
            .field("num_parents", &self.num_parents)
            .finish_non_exhaustive()
    }
}

impl<G: Gene> Crossover<G> for CombineCrossover<G> {
    fn num_parents(&self) -> usize {
        self.num_parents
    }

    fn chromosome_rate(&self) -> f64 {
        self.chromosome_rate
    }

    fn crossover_chromosomes(
        &self,
        parents: &[Chromosome<G>],
        ctx: &mut EvolutionContext,
    ) -> Result<Vec<Chromosome<G>>> {
        combine_chromosomes(parents, self.gene_rate, ctx, |genes| (self.combiner)(genes))
    }
}

impl<G: Gene> Alterer<G> for CombineCrossover<G> {
    fn alter(&self, population: Population<G>, ctx: &mut EvolutionContext) -> Result<AltererResult<G>> {
        recombine(self, population, ctx)
    }
}

/// A [`CombineCrossover`] whose combiner is the arithmetic mean of the parents' values.
///
/// # Examples
///
/// ```
/// use genforge::alteration::{AverageCrossover, Crossover};
/// use genforge::context::EvolutionContext;
/// use genforge::genetic::{Chromosome, DoubleGene};
///
/// let mut ctx = EvolutionContext::seeded(0);
/// let crossover = AverageCrossover::new(1.0, 1.0).unwrap();
/// let parents = vec![
///     Chromosome::new(vec![DoubleGene::unbounded(4.0)]),
///     Chromosome::new(vec![DoubleGene::unbounded(6.0)]),
/// ];
///
/// let offspring = crossover.crossover_chromosomes(&parents, &mut ctx).unwrap();
/// assert_eq!(offspring[0].values(), vec![5.0]);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "AverageCrossoverConfig")
)]
#[derive(Debug, Clone)]
pub struct AverageCrossover {
    chromosome_rate: f64,
    gene_rate: f64,
    num_parents: usize,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct AverageCrossoverConfig {
    chromosome_rate: f64,
    gene_rate: f64,
    num_parents: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<AverageCrossoverConfig> for AverageCrossover {
    type Error = crate::error::GeneticError;

    fn try_from(config: AverageCrossoverConfig) -> Result<Self> {
        Self::with_parents(config.chromosome_rate, config.gene_rate, config.num_parents)
    }
}

impl AverageCrossover {
    pub fn new(chromosome_rate: f64, gene_rate: f64) -> Result<Self> {
        Self::with_parents(chromosome_rate, gene_rate, 2)
    }

    pub fn with_parents(chromosome_rate: f64, gene_rate: f64, num_parents: usize) -> Result<Self> {
        enforce(|e| require_combine_parameters(e, chromosome_rate, gene_rate, num_parents))?;
        Ok(Self {
            chromosome_rate,
            gene_rate,
            num_parents,
        })
    }

    pub fn gene_rate(&self) -> f64 {
        self.gene_rate
    }
}

impl<G: NumberGene> Crossover<G> for AverageCrossover {
    fn num_parents(&self) -> usize {
        self.num_parents
    }

    fn chromosome_rate(&self) -> f64 {
        self.chromosome_rate
    }

    fn crossover_chromosomes(
        &self,
        parents: &[Chromosome<G>],
        ctx: &mut EvolutionContext,
    ) -> Result<Vec<Chromosome<G>>> {
        combine_chromosomes(parents, self.gene_rate, ctx, G::average)
    }
}

impl<G: NumberGene> Alterer<G> for AverageCrossover {
    fn alter(&self, population: Population<G>, ctx: &mut EvolutionContext) -> Result<AltererResult<G>> {
        recombine(self, population, ctx)
    }
}

fn require_combine_parameters(e: &mut Enforcer, chromosome_rate: f64, gene_rate: f64, num_parents: usize) {
    require_rates(e, &[("chromosomeRate", chromosome_rate), ("geneRate", gene_rate)]);
    e.require("numParents", &num_parents, IntRequirement::BeAtLeast(2));
}

/// Offspring `k` starts from parent `k`. Each of its genes is, with probability
/// `gene_rate`, replaced by the combination of the column led by its own gene.
fn combine_chromosomes<G, F>(
    parents: &[Chromosome<G>],
    gene_rate: f64,
    ctx: &mut EvolutionContext,
    combiner: F,
) -> Result<Vec<Chromosome<G>>>
where
    G: Gene,
    F: Fn(&[G]) -> Result<G>,
{
    validate_parents(parents, ctx)?;
    let mut offspring = Vec::with_capacity(parents.len());
    for (k, parent) in parents.iter().enumerate() {
        let mut genes = Vec::with_capacity(parent.len());
        for (i, gene) in parent.genes().iter().enumerate() {
            if ctx.rng.coin(gene_rate) {
                let column: Vec<G> = parents[k..]
                    .iter()
                    .chain(&parents[..k])
                    .map(|p| p.genes()[i].clone())
                    .collect();
                genes.push(combiner(&column)?);
            } else {
                genes.push(gene.clone());
            }
        }
        offspring.push(parent.duplicate_with_genes(genes));
    }
    Ok(offspring)
}
