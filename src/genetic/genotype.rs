//! # Genotype
//!
//! The full genetic encoding of one individual: a non-empty, ordered list of chromosomes.

use std::fmt::Debug;

use crate::constraints::{enforce, CollectionRequirement};
use crate::context::EvolutionContext;
use crate::error::Result;
use crate::genetic::chromosome::{Chromosome, ChromosomeFactory};
use crate::genetic::genes::Gene;

#[derive(Debug, Clone)]
pub struct Genotype<G: Gene> {
    chromosomes: Vec<Chromosome<G>>,
}

impl<G: Gene> Genotype<G> {
    /// Creates a genotype.
    ///
    /// # Errors
    ///
    /// Fails with a collection constraint error if `chromosomes` is empty.
    pub fn new(chromosomes: Vec<Chromosome<G>>) -> Result<Self> {
        enforce(|e| {
            e.require("chromosomes", chromosomes.as_slice(), CollectionRequirement::NotBeEmpty);
        })?;
        Ok(Self { chromosomes })
    }

    pub fn chromosomes(&self) -> &[Chromosome<G>] {
        &self.chromosomes
    }

    pub fn into_chromosomes(self) -> Vec<Chromosome<G>> {
        self.chromosomes
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    /// Always `false`; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// The values of every gene of every chromosome, in order.
    pub fn flatten(&self) -> Vec<G::Value> {
        self.chromosomes
            .iter()
            .flat_map(|c| c.genes().iter().map(|g| g.value().clone()))
            .collect()
    }

    /// `true` if every chromosome verifies.
    pub fn verify(&self) -> bool {
        self.chromosomes.iter().all(Chromosome::verify)
    }

    /// A genotype of the same shape holding `chromosomes`.
    ///
    /// Callers replace chromosomes one for one, so the result stays non-empty.
    pub fn duplicate_with_chromosomes(&self, chromosomes: Vec<Chromosome<G>>) -> Self {
        debug_assert!(!chromosomes.is_empty());
        Self { chromosomes }
    }
}

/// Builds genotypes by asking each chromosome factory for one chromosome.
#[derive(Debug)]
pub struct GenotypeFactory<G: Gene> {
    factories: Vec<Box<dyn ChromosomeFactory<G>>>,
}

impl<G: Gene> GenotypeFactory<G> {
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    pub fn with_chromosome<F>(mut self, factory: F) -> Self
    where
        F: ChromosomeFactory<G> + 'static,
    {
        self.factories.push(Box::new(factory));
        self
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    pub fn make(&self, ctx: &mut EvolutionContext) -> Result<Genotype<G>> {
        let chromosomes = self
            .factories
            .iter()
            .map(|factory| factory.make(ctx))
            .collect::<Result<Vec<_>>>()?;
        Genotype::new(chromosomes)
    }
}

impl<G: Gene> Default for GenotypeFactory<G> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetic::{BoolChromosomeFactory, BoolGene, IntChromosomeFactory};

    #[test]
    fn test_empty_genotype_rejected() {
        let error = Genotype::<BoolGene>::new(Vec::new()).unwrap_err();
        assert!(error.violations().unwrap().contains_clause("chromosomes"));
    }

    #[test]
    fn test_flatten_and_verify() {
        let genotype = Genotype::new(vec![
            Chromosome::new(vec![BoolGene::new(true)]),
            Chromosome::new(vec![BoolGene::new(false), BoolGene::new(true)]),
        ])
        .unwrap();
        assert_eq!(genotype.len(), 2);
        assert_eq!(genotype.flatten(), vec![true, false, true]);
        assert!(genotype.verify());
    }

    #[test]
    fn test_factory_builds_every_chromosome() {
        let mut ctx = EvolutionContext::seeded(10);
        let factory = GenotypeFactory::new()
            .with_chromosome(IntChromosomeFactory::new(3).with_range(0..=9))
            .with_chromosome(IntChromosomeFactory::new(5).with_range(10..=19));
        let genotype = factory.make(&mut ctx).unwrap();
        assert_eq!(genotype.len(), 2);
        assert_eq!(genotype.chromosomes()[0].len(), 3);
        assert_eq!(genotype.chromosomes()[1].len(), 5);
        assert!(genotype.verify());
    }

    #[test]
    fn test_factory_without_chromosomes_fails() {
        let mut ctx = EvolutionContext::seeded(10);
        assert!(GenotypeFactory::<BoolGene>::new().make(&mut ctx).is_err());
    }

    #[test]
    fn test_factory_propagates_chromosome_errors() {
        let mut ctx = EvolutionContext::seeded(10);
        let factory = GenotypeFactory::new().with_chromosome(BoolChromosomeFactory::new(2, 2.0));
        assert!(factory.make(&mut ctx).is_err());
    }
}
