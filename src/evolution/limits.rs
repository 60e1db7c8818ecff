//! # Limits
//!
//! A limit is a termination predicate checked after every generation. The run stops as
//! soon as any configured limit is reached.

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::constraints::{enforce, DoubleRequirement, IntRequirement};
use crate::error::Result;
use crate::genetic::{Gene, Individual};
use crate::ranking::Ranker;

/// What a limit can see of the run after a generation.
#[derive(Debug)]
pub struct EvolutionState<'a, G: Gene> {
    /// Generations completed so far.
    pub generation: usize,
    /// The evaluated population.
    pub population: &'a [Individual<G>],
    /// The best individual seen during the run.
    pub best: &'a Individual<G>,
    /// Consecutive generations that did not improve on `best`.
    pub steady_generations: usize,
    pub ranker: &'a dyn Ranker,
}

pub trait Limit<G: Gene>: Debug + Send + Sync {
    fn reached(&self, state: &EvolutionState<'_, G>) -> bool;
}

/// Stops after a number of generations.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GenerationCountConfig")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationCount(usize);

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GenerationCountConfig(usize);

#[cfg(feature = "serde")]
impl TryFrom<GenerationCountConfig> for GenerationCount {
    type Error = crate::error::GeneticError;

    fn try_from(config: GenerationCountConfig) -> Result<Self> {
        Self::new(config.0)
    }
}

impl GenerationCount {
    pub const DEFAULT: GenerationCount = GenerationCount(100);

    pub fn new(generations: usize) -> Result<Self> {
        enforce(|e| {
            e.require("generations", &generations, IntRequirement::BePositive);
        })?;
        Ok(Self(generations))
    }

    pub fn generations(&self) -> usize {
        self.0
    }
}

impl Default for GenerationCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl<G: Gene> Limit<G> for GenerationCount {
    fn reached(&self, state: &EvolutionState<'_, G>) -> bool {
        state.generation >= self.0
    }
}

/// Stops once the best fitness has not improved for a number of generations.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SteadyGenerationsConfig")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteadyGenerations(usize);

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SteadyGenerationsConfig(usize);

#[cfg(feature = "serde")]
impl TryFrom<SteadyGenerationsConfig> for SteadyGenerations {
    type Error = crate::error::GeneticError;

    fn try_from(config: SteadyGenerationsConfig) -> Result<Self> {
        Self::new(config.0)
    }
}

impl SteadyGenerations {
    pub fn new(generations: usize) -> Result<Self> {
        enforce(|e| {
            e.require("steadyGenerations", &generations, IntRequirement::BePositive);
        })?;
        Ok(Self(generations))
    }

    pub fn generations(&self) -> usize {
        self.0
    }
}

impl<G: Gene> Limit<G> for SteadyGenerations {
    fn reached(&self, state: &EvolutionState<'_, G>) -> bool {
        state.steady_generations >= self.0
    }
}

/// Stops once the best individual is at least as good as a target fitness.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "TargetFitnessConfig")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetFitness(f64);

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TargetFitnessConfig(f64);

#[cfg(feature = "serde")]
impl TryFrom<TargetFitnessConfig> for TargetFitness {
    type Error = crate::error::GeneticError;

    fn try_from(config: TargetFitnessConfig) -> Result<Self> {
        Self::new(config.0)
    }
}

impl TargetFitness {
    pub fn new(target: f64) -> Result<Self> {
        enforce(|e| {
            e.require("targetFitness", &target, DoubleRequirement::BeFinite);
        })?;
        Ok(Self(target))
    }

    pub fn target(&self) -> f64 {
        self.0
    }
}

impl<G: Gene> Limit<G> for TargetFitness {
    fn reached(&self, state: &EvolutionState<'_, G>) -> bool {
        state.ranker.compare_fitness(state.best.fitness(), self.0) != Ordering::Less
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetic::{BoolGene, Chromosome, Genotype};
    use crate::ranking::{FitnessMaxRanker, FitnessMinRanker};

    fn individual(fitness: f64) -> Individual<BoolGene> {
        Individual::new(Genotype::new(vec![Chromosome::new(vec![BoolGene::new(true)])]).unwrap())
            .into_evaluated(fitness)
    }

    fn state<'a>(
        population: &'a [Individual<BoolGene>],
        generation: usize,
        steady_generations: usize,
        ranker: &'a dyn Ranker,
    ) -> EvolutionState<'a, BoolGene> {
        EvolutionState {
            generation,
            population,
            best: &population[0],
            steady_generations,
            ranker,
        }
    }

    #[test]
    fn test_generation_count() {
        let population = vec![individual(1.0)];
        let limit = GenerationCount::new(3).unwrap();
        assert!(!Limit::<BoolGene>::reached(&limit, &state(&population, 2, 0, &FitnessMaxRanker)));
        assert!(Limit::<BoolGene>::reached(&limit, &state(&population, 3, 0, &FitnessMaxRanker)));
        assert!(GenerationCount::new(0).is_err());
        assert_eq!(GenerationCount::default().generations(), 100);
    }

    #[test]
    fn test_steady_generations() {
        let population = vec![individual(1.0)];
        let limit = SteadyGenerations::new(5).unwrap();
        assert!(!Limit::<BoolGene>::reached(&limit, &state(&population, 9, 4, &FitnessMaxRanker)));
        assert!(Limit::<BoolGene>::reached(&limit, &state(&population, 9, 5, &FitnessMaxRanker)));
    }

    #[test]
    fn test_target_fitness_follows_the_ranker() {
        let population = vec![individual(10.0)];
        let limit = TargetFitness::new(10.0).unwrap();
        assert!(Limit::<BoolGene>::reached(&limit, &state(&population, 1, 0, &FitnessMaxRanker)));
        assert!(Limit::<BoolGene>::reached(&limit, &state(&population, 1, 0, &FitnessMinRanker)));

        let limit = TargetFitness::new(5.0).unwrap();
        assert!(Limit::<BoolGene>::reached(&limit, &state(&population, 1, 0, &FitnessMaxRanker)));
        assert!(!Limit::<BoolGene>::reached(&limit, &state(&population, 1, 0, &FitnessMinRanker)));

        assert!(TargetFitness::new(f64::NAN).is_err());
    }
}
