use crate::context::EvolutionContext;
use crate::error::Result;
use crate::genetic::{Gene, Individual, Population};
use crate::ranking::Ranker;
use crate::selection::probability::{select_by_probability, ProbabilitySelector};
use crate::selection::selector::Selector;

/// A selection strategy that selects individuals through roulette wheel selection.
///
/// Roulette wheel selection (also known as fitness proportionate selection) selects
/// individuals with probability proportional to their fitness. Fitness values are first
/// mapped through the ranker's transform, so minimization works without special casing.
/// Negative values are shifted so the smallest becomes zero. If every weight is zero,
/// all individuals are equally likely.
///
/// # Examples
///
/// ```
/// use genforge::genetic::{Chromosome, Genotype, Individual, IntGene};
/// use genforge::ranking::FitnessMaxRanker;
/// use genforge::selection::{ProbabilitySelector, RouletteWheelSelector};
///
/// let population: Vec<Individual<IntGene>> = [1.0, 2.0, 3.0]
///     .iter()
///     .map(|&f| {
///         let genotype = Genotype::new(vec![Chromosome::new(vec![IntGene::unbounded(0)])]).unwrap();
///         Individual::new(genotype).into_evaluated(f)
///     })
///     .collect();
///
/// let probabilities = RouletteWheelSelector::new().probabilities(&population, &FitnessMaxRanker);
/// assert_eq!(probabilities, vec![1.0 / 6.0, 2.0 / 6.0, 3.0 / 6.0]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct RouletteWheelSelector {
    /// Sort the population best first and search the wheel by bisection.
    sorted: bool,
}

impl RouletteWheelSelector {
    pub fn new() -> Self {
        Self { sorted: false }
    }

    pub fn sorted() -> Self {
        Self { sorted: true }
    }
}

impl<G: Gene> ProbabilitySelector<G> for RouletteWheelSelector {
    fn is_sorted(&self) -> bool {
        self.sorted
    }

    fn probabilities(&self, population: &[Individual<G>], ranker: &dyn Ranker) -> Vec<f64> {
        let fitness: Vec<f64> = population.iter().map(|i| i.fitness()).collect();
        let transformed = ranker.fitness_transform(&fitness);

        // f64::min ignores NaN, so unevaluated individuals do not poison the shift
        let shift = transformed.iter().copied().fold(f64::INFINITY, f64::min).min(0.0);
        let weights: Vec<f64> = transformed
            .iter()
            .map(|f| {
                let weight = f - shift;
                if weight.is_nan() {
                    0.0
                } else {
                    weight
                }
            })
            .collect();

        let total: f64 = weights.iter().sum();
        if total == 0.0 || !total.is_finite() {
            let uniform = 1.0 / population.len() as f64;
            return vec![uniform; population.len()];
        }
        weights.iter().map(|w| w / total).collect()
    }
}

impl<G: Gene> Selector<G> for RouletteWheelSelector {
    fn select(
        &self,
        population: &[Individual<G>],
        count: usize,
        ranker: &dyn Ranker,
        ctx: &mut EvolutionContext,
    ) -> Result<Population<G>> {
        select_by_probability(self, population, count, ranker, ctx)
    }
}
