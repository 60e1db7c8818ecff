use std::fmt::Debug;

use crate::context::EvolutionContext;
use crate::error::{GeneticError, Result};
use crate::genetic::{Gene, Individual, Population};
use crate::ranking::{Ranker, RankerExt};
use crate::selection::selector::ensure_selectable;

/// Populations at least this large are searched by bisection instead of a linear scan.
pub const BINARY_SEARCH_THRESHOLD: usize = 35;

/// A selector that assigns every individual a probability and samples by inverse CDF.
pub trait ProbabilitySelector<G: Gene>: Debug + Send + Sync {
    /// Whether the population is sorted best first before sampling.
    fn is_sorted(&self) -> bool;

    /// Selection probabilities, aligned with `population`. They are non-negative and sum to 1.
    fn probabilities(&self, population: &[Individual<G>], ranker: &dyn Ranker) -> Vec<f64>;
}

/// A cumulative distribution over population indices.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeDistribution {
    cumulative: Vec<f64>,
    sorted: bool,
}

impl CumulativeDistribution {
    /// Builds the running sum of `probabilities`.
    pub fn new(probabilities: &[f64]) -> Self {
        let cumulative = probabilities
            .iter()
            .scan(0.0, |sum, p| {
                *sum += p;
                Some(*sum)
            })
            .collect();
        Self::from_cumulative(cumulative)
    }

    /// Wraps an already accumulated array. It is not required to be sorted, but only a
    /// non-decreasing one can be searched by bisection.
    pub fn from_cumulative(cumulative: Vec<f64>) -> Self {
        let sorted = cumulative.windows(2).all(|w| w[0] <= w[1]);
        Self { cumulative, sorted }
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// The first index whose cumulative value exceeds `value`, scanning linearly.
    /// Falls back to the last index with non-zero mass when rounding leaves `value` past
    /// the end.
    pub fn serial_search(&self, value: f64) -> usize {
        self.cumulative
            .iter()
            .position(|&c| value < c)
            .unwrap_or_else(|| self.last_reachable())
    }

    /// Same contract as [`serial_search`](Self::serial_search), by bisection.
    ///
    /// # Errors
    ///
    /// Returns a `Selection` error if the cumulative array is not non-decreasing.
    pub fn binary_search(&self, value: f64) -> Result<usize> {
        if !self.sorted {
            return Err(GeneticError::Selection(
                "Binary search requires a sorted cumulative distribution".to_string(),
            ));
        }
        let index = self.cumulative.partition_point(|&c| c <= value);
        if index < self.cumulative.len() {
            Ok(index)
        } else {
            Ok(self.last_reachable())
        }
    }

    fn last_reachable(&self) -> usize {
        let c = &self.cumulative;
        (1..c.len()).rev().find(|&i| c[i] > c[i - 1]).unwrap_or(0)
    }
}

/// Samples `count` individuals through a [`ProbabilitySelector`].
///
/// When the selector asks for sorting, the population is ordered best first and large
/// populations are searched by bisection. Otherwise the cumulative array is scanned.
pub fn select_by_probability<G, S>(
    selector: &S,
    population: &[Individual<G>],
    count: usize,
    ranker: &dyn Ranker,
    ctx: &mut EvolutionContext,
) -> Result<Population<G>>
where
    G: Gene,
    S: ProbabilitySelector<G> + ?Sized,
{
    ensure_selectable(population)?;

    let pool = if selector.is_sorted() {
        ranker.sort(population)
    } else {
        population.to_vec()
    };
    let distribution = CumulativeDistribution::new(&selector.probabilities(&pool, ranker));
    let bisect = selector.is_sorted() && pool.len() >= BINARY_SEARCH_THRESHOLD;

    let mut selected = Vec::with_capacity(count);
    for _ in 0..count {
        let value = ctx.rng.next_f64();
        let index = if bisect {
            distribution.binary_search(value)?
        } else {
            distribution.serial_search(value)
        };
        selected.push(pool[index].clone());
    }
    Ok(selected)
}
