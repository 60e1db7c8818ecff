//! # Individual
//!
//! A genotype paired with its fitness. Fitness starts as NaN, which marks the individual as
//! not yet evaluated; evaluation attaches a score through [`Individual::with_fitness`].

use std::cmp::Ordering;

use crate::genetic::genes::Gene;
use crate::genetic::genotype::Genotype;

/// A population is an ordered list of individuals; duplicates are allowed.
pub type Population<G> = Vec<Individual<G>>;

#[derive(Debug, Clone)]
pub struct Individual<G: Gene> {
    genotype: Genotype<G>,
    fitness: f64,
}

impl<G: Gene> Individual<G> {
    /// Creates an unevaluated individual.
    pub fn new(genotype: Genotype<G>) -> Self {
        Self {
            genotype,
            fitness: f64::NAN,
        }
    }

    pub fn genotype(&self) -> &Genotype<G> {
        &self.genotype
    }

    pub fn into_genotype(self) -> Genotype<G> {
        self.genotype
    }

    /// The fitness, or NaN if the individual has not been evaluated.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn is_evaluated(&self) -> bool {
        !self.fitness.is_nan()
    }

    /// Returns a copy of this individual carrying `fitness`.
    pub fn with_fitness(&self, fitness: f64) -> Self {
        Self {
            genotype: self.genotype.clone(),
            fitness,
        }
    }

    /// Consumes this individual, attaching `fitness`.
    pub fn into_evaluated(self, fitness: f64) -> Self {
        Self {
            genotype: self.genotype,
            fitness,
        }
    }

    /// `true` if the genotype verifies and the fitness has been assigned.
    pub fn verify(&self) -> bool {
        self.genotype.verify() && self.is_evaluated()
    }
}

/// Individuals compare by fitness alone.
impl<G: Gene> PartialEq for Individual<G> {
    fn eq(&self, other: &Self) -> bool {
        self.fitness == other.fitness
    }
}

impl<G: Gene> PartialOrd for Individual<G> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.fitness.partial_cmp(&other.fitness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetic::{BoolGene, Chromosome};

    fn genotype(values: &[bool]) -> Genotype<BoolGene> {
        Genotype::new(vec![values.iter().map(|&v| BoolGene::new(v)).collect::<Chromosome<_>>()])
            .unwrap()
    }

    #[test]
    fn test_unevaluated_by_default() {
        let individual = Individual::new(genotype(&[true]));
        assert!(!individual.is_evaluated());
        assert!(individual.fitness().is_nan());
        assert!(!individual.verify());
    }

    #[test]
    fn test_with_fitness_returns_new_individual() {
        let individual = Individual::new(genotype(&[true, false]));
        let evaluated = individual.with_fitness(2.5);
        assert!(!individual.is_evaluated());
        assert!(evaluated.is_evaluated());
        assert_eq!(evaluated.fitness(), 2.5);
        assert!(evaluated.verify());
        assert_eq!(evaluated.genotype().flatten(), vec![true, false]);
    }

    #[test]
    fn test_ordering_uses_fitness_only() {
        let a = Individual::new(genotype(&[true])).into_evaluated(1.0);
        let b = Individual::new(genotype(&[false])).into_evaluated(1.0);
        let c = Individual::new(genotype(&[true])).into_evaluated(3.0);
        assert_eq!(a, b);
        assert!(a < c);
        assert!(a.partial_cmp(&Individual::new(genotype(&[true]))).is_none());
    }
}
