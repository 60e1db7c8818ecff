use crate::alteration::crossover::{recombine, validate_parents, Crossover};
use crate::alteration::{require_rates, Alterer, AltererResult};
use crate::constraints::enforce;
use crate::context::EvolutionContext;
use crate::error::Result;
use crate::genetic::{Chromosome, Gene, Population};

/// Cuts both parents at one random index in `[1, len)` and swaps the tails.
///
/// # Examples
///
/// ```
/// use genforge::alteration::SinglePointCrossover;
/// use genforge::genetic::{Chromosome, IntGene};
///
/// let first: Chromosome<IntGene> = [1, 2, 3, 4, 5].iter().map(|&v| IntGene::unbounded(v)).collect();
/// let second: Chromosome<IntGene> = [5, 4, 3, 2, 1].iter().map(|&v| IntGene::unbounded(v)).collect();
///
/// let (a, b) = SinglePointCrossover::crossover_at(&first, &second, 2);
/// assert_eq!(a.values(), vec![1, 2, 3, 2, 1]);
/// assert_eq!(b.values(), vec![5, 4, 3, 4, 5]);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SinglePointCrossoverConfig")
)]
#[derive(Debug, Clone)]
pub struct SinglePointCrossover {
    chromosome_rate: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SinglePointCrossoverConfig {
    chromosome_rate: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<SinglePointCrossoverConfig> for SinglePointCrossover {
    type Error = crate::error::GeneticError;

    fn try_from(config: SinglePointCrossoverConfig) -> Result<Self> {
        Self::new(config.chromosome_rate)
    }
}

impl SinglePointCrossover {
    /// # Errors
    ///
    /// Returns a double constraint error if `chromosome_rate` is outside `[0, 1]`.
    pub fn new(chromosome_rate: f64) -> Result<Self> {
        enforce(|e| require_rates(e, &[("chromosomeRate", chromosome_rate)]))?;
        Ok(Self { chromosome_rate })
    }

    /// Crosses two chromosomes at a fixed cut. The cut is clamped to the shorter parent.
    pub fn crossover_at<G: Gene>(
        first: &Chromosome<G>,
        second: &Chromosome<G>,
        cut: usize,
    ) -> (Chromosome<G>, Chromosome<G>) {
        let cut = cut.min(first.len()).min(second.len());
        let (head_a, tail_a) = first.genes().split_at(cut);
        let (head_b, tail_b) = second.genes().split_at(cut);

        let a = head_a.iter().chain(tail_b).cloned().collect();
        let b = head_b.iter().chain(tail_a).cloned().collect();
        (first.duplicate_with_genes(a), second.duplicate_with_genes(b))
    }
}

impl<G: Gene> Crossover<G> for SinglePointCrossover {
    fn chromosome_rate(&self) -> f64 {
        self.chromosome_rate
    }

    fn crossover_chromosomes(
        &self,
        parents: &[Chromosome<G>],
        ctx: &mut EvolutionContext,
    ) -> Result<Vec<Chromosome<G>>> {
        validate_parents(parents, ctx)?;
        let len = parents.first().map_or(0, Chromosome::len);
        if parents.len() < 2 || len < 2 {
            return Ok(parents.to_vec());
        }
        let cut = 1 + ctx.rng.index(len - 1);
        let (a, b) = Self::crossover_at(&parents[0], &parents[1], cut);
        Ok(vec![a, b])
    }
}

impl<G: Gene> Alterer<G> for SinglePointCrossover {
    fn alter(&self, population: Population<G>, ctx: &mut EvolutionContext) -> Result<AltererResult<G>> {
        recombine(self, population, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alteration::crossover::tests::{int_chromosome, sorted};

    #[test]
    fn test_fixed_cut() {
        let first = int_chromosome(&[1, 2, 3, 4, 5]);
        let second = int_chromosome(&[5, 4, 3, 2, 1]);
        let (a, b) = SinglePointCrossover::crossover_at(&first, &second, 2);
        assert_eq!(a.values(), vec![1, 2, 3, 2, 1]);
        assert_eq!(b.values(), vec![5, 4, 3, 4, 5]);
    }

    #[test]
    fn test_random_cut_is_interior() {
        let mut ctx = EvolutionContext::seeded(11);
        let crossover = SinglePointCrossover::new(1.0).unwrap();
        let first = int_chromosome(&[0, 0, 0, 0]);
        let second = int_chromosome(&[1, 1, 1, 1]);
        for _ in 0..50 {
            let children = crossover
                .crossover_chromosomes(&[first.clone(), second.clone()], &mut ctx)
                .unwrap();
            let a = children[0].values();
            // head from the first parent, tail from the second, both non-empty
            assert_eq!(a[0], 0);
            assert_eq!(a[3], 1);
            assert_eq!(sorted(a.clone()), a);
        }
    }

    #[test]
    fn test_mismatched_lengths_fail() {
        let mut ctx = EvolutionContext::seeded(11);
        let crossover = SinglePointCrossover::new(1.0).unwrap();
        let result = crossover.crossover_chromosomes(
            &[int_chromosome(&[1, 2, 3]), int_chromosome(&[1, 2])],
            &mut ctx,
        );
        assert!(result.unwrap_err().violations().is_some());
    }

    #[test]
    fn test_invalid_rate() {
        let error = SinglePointCrossover::new(1.5).unwrap_err();
        let violations = error.violations().unwrap();
        assert!(violations.contains_clause("chromosomeRate"));
        assert!(violations.to_string().contains("1.5"));
    }
}
