use std::sync::Arc;

use crate::alteration::Alterer;
use crate::constraints::{enforce, IntRequirement};
use crate::error::{GeneticError, Result};
use crate::evolution::challenge::Challenge;
use crate::evolution::engine::EvolutionEngine;
use crate::evolution::limits::{GenerationCount, Limit};
use crate::evolution::listener::{EvolutionListener, TracingListener};
use crate::evolution::options::{EvolutionOptions, LogLevel};
use crate::genetic::{Gene, GenotypeFactory};
use crate::ranking::{FitnessMaxRanker, Ranker};
use crate::selection::{Selector, TournamentSelector};

/// Assembles an [`EvolutionEngine`].
///
/// A genotype factory and a challenge are required. Everything else has a default: a
/// maximizing ranker, tournament selection of size 3 for survivors and offspring, no
/// alterers, and a limit of 100 generations.
///
/// # Examples
///
/// ```
/// use genforge::alteration::{RandomMutator, SinglePointCrossover};
/// use genforge::error::Result;
/// use genforge::evolution::{EvolutionEngineBuilder, EvolutionOptions, GenerationCount};
/// use genforge::genetic::{Genotype, GenotypeFactory, IntChromosomeFactory, IntGene};
///
/// let engine = EvolutionEngineBuilder::new()
///     .with_genotype_factory(
///         GenotypeFactory::new().with_chromosome(IntChromosomeFactory::new(8).with_range(0..=9)),
///     )
///     .with_challenge(|g: &Genotype<IntGene>| -> Result<f64> {
///         Ok(g.flatten().iter().sum::<i64>() as f64)
///     })
///     .with_alterer(SinglePointCrossover::new(0.6)?)
///     .with_alterer(RandomMutator::new(0.2, 0.5, 0.2)?)
///     .with_limit(GenerationCount::new(20)?)
///     .with_options(EvolutionOptions::builder().population_size(30).seed(7).build())
///     .build()?;
///
/// let result = engine.evolve()?;
/// assert_eq!(result.generations, 20);
/// assert!(result.best.fitness() <= 72.0);
/// # Ok::<(), genforge::error::GeneticError>(())
/// ```
pub struct EvolutionEngineBuilder<G: Gene> {
    genotype_factory: Option<GenotypeFactory<G>>,
    challenge: Option<Box<dyn Challenge<G>>>,
    ranker: Option<Arc<dyn Ranker>>,
    survivor_selector: Option<Box<dyn Selector<G>>>,
    offspring_selector: Option<Box<dyn Selector<G>>>,
    alterers: Vec<Box<dyn Alterer<G>>>,
    limits: Vec<Box<dyn Limit<G>>>,
    listeners: Vec<Box<dyn EvolutionListener<G>>>,
    options: EvolutionOptions,
}

impl<G: Gene> EvolutionEngineBuilder<G> {
    pub fn new() -> Self {
        Self {
            genotype_factory: None,
            challenge: None,
            ranker: None,
            survivor_selector: None,
            offspring_selector: None,
            alterers: Vec::new(),
            limits: Vec::new(),
            listeners: Vec::new(),
            options: EvolutionOptions::default(),
        }
    }

    pub fn with_genotype_factory(mut self, genotype_factory: GenotypeFactory<G>) -> Self {
        self.genotype_factory = Some(genotype_factory);
        self
    }

    pub fn with_challenge<C: Challenge<G> + 'static>(mut self, challenge: C) -> Self {
        self.challenge = Some(Box::new(challenge));
        self
    }

    pub fn with_ranker<R: Ranker + 'static>(mut self, ranker: R) -> Self {
        self.ranker = Some(Arc::new(ranker));
        self
    }

    pub fn with_survivor_selector<S: Selector<G> + 'static>(mut self, selector: S) -> Self {
        self.survivor_selector = Some(Box::new(selector));
        self
    }

    pub fn with_offspring_selector<S: Selector<G> + 'static>(mut self, selector: S) -> Self {
        self.offspring_selector = Some(Box::new(selector));
        self
    }

    /// Appends an alterer. Alterers run in the order they were added.
    pub fn with_alterer<A: Alterer<G> + 'static>(mut self, alterer: A) -> Self {
        self.alterers.push(Box::new(alterer));
        self
    }

    pub fn with_limit<L: Limit<G> + 'static>(mut self, limit: L) -> Self {
        self.limits.push(Box::new(limit));
        self
    }

    pub fn with_listener<L: EvolutionListener<G> + 'static>(mut self, listener: L) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn with_options(mut self, options: EvolutionOptions) -> Self {
        self.options = options;
        self
    }

    /// # Errors
    ///
    /// Returns a `Configuration` error if the genotype factory or the challenge is
    /// missing, and a constraint error listing every invalid option.
    pub fn build(self) -> Result<EvolutionEngine<G>> {
        let genotype_factory = self.genotype_factory.ok_or_else(|| {
            GeneticError::Configuration("Genotype factory not specified".to_string())
        })?;

        let challenge = self
            .challenge
            .ok_or_else(|| GeneticError::Configuration("Challenge not specified".to_string()))?;

        enforce(|e| {
            self.options.enforce_constraints(e);
            e.require("chromosomeFactories", &genotype_factory.len(), IntRequirement::BePositive);
        })?;

        let ranker = self.ranker.unwrap_or_else(|| Arc::new(FitnessMaxRanker));
        let mut limits = self.limits;
        if limits.is_empty() {
            limits.push(Box::new(GenerationCount::default()));
        }
        let mut listeners = self.listeners;
        if self.options.get_log_level() != LogLevel::None {
            listeners.push(Box::new(TracingListener::new(
                self.options.get_log_level(),
                Arc::clone(&ranker),
            )));
        }

        Ok(EvolutionEngine {
            genotype_factory,
            challenge,
            ranker,
            survivor_selector: self
                .survivor_selector
                .unwrap_or_else(|| Box::new(TournamentSelector::default())),
            offspring_selector: self
                .offspring_selector
                .unwrap_or_else(|| Box::new(TournamentSelector::default())),
            alterers: self.alterers,
            limits,
            listeners,
            options: self.options,
        })
    }
}

impl<G: Gene> Default for EvolutionEngineBuilder<G> {
    fn default() -> Self {
        Self::new()
    }
}
