//! # Ranking
//!
//! A [`Ranker`] defines which of two fitness values is better. [`FitnessMaxRanker`] prefers
//! larger values, [`FitnessMinRanker`] smaller ones. Unevaluated individuals (NaN fitness)
//! always rank last.
//!
//! ## Example
//!
//! ```rust
//! use genforge::ranking::{FitnessMinRanker, Ranker};
//! use std::cmp::Ordering;
//!
//! let ranker = FitnessMinRanker;
//! assert_eq!(ranker.compare_fitness(1.0, 2.0), Ordering::Greater);
//! assert_eq!(ranker.compare_fitness(f64::NAN, 2.0), Ordering::Less);
//! ```

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::genetic::{Gene, Individual};

/// Defines "better" between fitness values.
pub trait Ranker: Debug + Send + Sync {
    /// `Ordering::Greater` means `a` is better than `b`.
    fn compare_fitness(&self, a: f64, b: f64) -> Ordering;

    /// Maps fitness values onto a scale where larger is better, for fitness-proportional
    /// selection.
    fn fitness_transform(&self, fitness: &[f64]) -> Vec<f64>;
}

/// Population-level operations available on every ranker.
pub trait RankerExt: Ranker {
    fn compare<G: Gene>(&self, a: &Individual<G>, b: &Individual<G>) -> Ordering {
        self.compare_fitness(a.fitness(), b.fitness())
    }

    /// A copy of the population ordered best first. Equal individuals keep their order.
    fn sort<G: Gene>(&self, population: &[Individual<G>]) -> Vec<Individual<G>> {
        let mut sorted = population.to_vec();
        sorted.sort_by(|a, b| self.compare(b, a));
        sorted
    }

    /// The first best individual encountered.
    fn best<'a, G: Gene>(&self, population: &'a [Individual<G>]) -> Option<&'a Individual<G>> {
        population.iter().fold(None, |best, candidate| match best {
            Some(current) if self.compare(candidate, current) != Ordering::Greater => Some(current),
            _ => Some(candidate),
        })
    }

    /// The first worst individual encountered.
    fn worst<'a, G: Gene>(&self, population: &'a [Individual<G>]) -> Option<&'a Individual<G>> {
        population.iter().fold(None, |worst, candidate| match worst {
            Some(current) if self.compare(candidate, current) != Ordering::Less => Some(current),
            _ => Some(candidate),
        })
    }
}

impl<R: Ranker + ?Sized> RankerExt for R {}

fn compare_with_nan_last(a: f64, b: f64, ordering: impl FnOnce(f64, f64) -> Ordering) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => ordering(a, b),
    }
}

/// Larger fitness is better.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FitnessMaxRanker;

impl Ranker for FitnessMaxRanker {
    fn compare_fitness(&self, a: f64, b: f64) -> Ordering {
        compare_with_nan_last(a, b, |a, b| a.partial_cmp(&b).unwrap_or(Ordering::Equal))
    }

    fn fitness_transform(&self, fitness: &[f64]) -> Vec<f64> {
        fitness.to_vec()
    }
}

/// Smaller fitness is better.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FitnessMinRanker;

impl Ranker for FitnessMinRanker {
    fn compare_fitness(&self, a: f64, b: f64) -> Ordering {
        compare_with_nan_last(a, b, |a, b| b.partial_cmp(&a).unwrap_or(Ordering::Equal))
    }

    fn fitness_transform(&self, fitness: &[f64]) -> Vec<f64> {
        fitness.iter().map(|f| -f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetic::{BoolGene, Chromosome, Genotype};

    fn individual(flag: bool, fitness: f64) -> Individual<BoolGene> {
        let genotype = Genotype::new(vec![Chromosome::new(vec![BoolGene::new(flag)])]).unwrap();
        Individual::new(genotype).into_evaluated(fitness)
    }

    #[test]
    fn test_max_ranker_sorts_descending() {
        let population = vec![individual(true, 1.0), individual(true, 3.0), individual(true, 2.0)];
        let sorted = FitnessMaxRanker.sort(&population);
        let fitness: Vec<f64> = sorted.iter().map(|i| i.fitness()).collect();
        assert_eq!(fitness, vec![3.0, 2.0, 1.0]);
        // input untouched
        assert_eq!(population[0].fitness(), 1.0);
    }

    #[test]
    fn test_min_ranker_sorts_ascending() {
        let population = vec![individual(true, 1.0), individual(true, 3.0), individual(true, 2.0)];
        let fitness: Vec<f64> = FitnessMinRanker
            .sort(&population)
            .iter()
            .map(|i| i.fitness())
            .collect();
        assert_eq!(fitness, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_best_is_first_maximal() {
        let population = vec![individual(false, 1.0), individual(true, 5.0), individual(false, 5.0)];
        let best = FitnessMaxRanker.best(&population).unwrap();
        assert_eq!(best.genotype().flatten(), vec![true]);

        let worst = FitnessMinRanker.worst(&population).unwrap();
        assert_eq!(worst.genotype().flatten(), vec![true]);
    }

    #[test]
    fn test_nan_ranks_last() {
        let unevaluated = Individual::new(
            Genotype::new(vec![Chromosome::new(vec![BoolGene::new(true)])]).unwrap(),
        );
        let population = vec![unevaluated, individual(false, -100.0)];
        assert_eq!(FitnessMaxRanker.best(&population).unwrap().fitness(), -100.0);
        assert_eq!(FitnessMinRanker.best(&population).unwrap().fitness(), -100.0);
        assert!(FitnessMaxRanker.sort(&population)[1].fitness().is_nan());
    }

    #[test]
    fn test_empty_population() {
        let population: Vec<Individual<BoolGene>> = Vec::new();
        assert!(FitnessMaxRanker.best(&population).is_none());
        assert!(FitnessMaxRanker.worst(&population).is_none());
    }

    #[test]
    fn test_fitness_transform() {
        assert_eq!(FitnessMaxRanker.fitness_transform(&[1.0, -2.0]), vec![1.0, -2.0]);
        assert_eq!(FitnessMinRanker.fitness_transform(&[1.0, -2.0]), vec![-1.0, 2.0]);
    }

    #[test]
    fn test_works_through_trait_objects() {
        let ranker: Box<dyn Ranker> = Box::new(FitnessMaxRanker);
        let population = vec![individual(true, 1.0), individual(true, 2.0)];
        assert_eq!(ranker.best(&population).unwrap().fitness(), 2.0);
    }
}
