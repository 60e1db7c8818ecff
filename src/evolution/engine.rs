//! # EvolutionEngine
//!
//! Runs the generational loop. A run moves through the phases
//! `Created -> Initializing -> Evaluating`, then repeats
//! `Selecting -> Altering -> Evaluating -> Checking` until a limit is reached, and ends in
//! `Terminated`.
//!
//! Every generation keeps `survivor_count` individuals chosen by the survivor selector and
//! breeds `offspring_count` more: the offspring selector picks parents, then every alterer
//! runs over them in the configured order. Survivors keep their fitness and are never
//! scored again.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, debug_span};

use crate::alteration::Alterer;
use crate::context::EvolutionContext;
use crate::error::{GeneticError, OptionExt, Result};
use crate::evolution::challenge::Challenge;
use crate::evolution::evaluator::Evaluator;
use crate::evolution::limits::{EvolutionState, Limit};
use crate::evolution::listener::EvolutionListener;
use crate::evolution::options::EvolutionOptions;
use crate::genetic::{Gene, GenotypeFactory, Individual, Population};
use crate::ranking::{Ranker, RankerExt};
use crate::selection::Selector;

/// The phases of a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvolutionPhase {
    Created,
    Initializing,
    Evaluating,
    Selecting,
    Altering,
    Checking,
    Terminated,
}

/// The outcome of a run.
#[derive(Debug, Clone)]
pub struct EvolutionResult<G: Gene> {
    /// The final, evaluated population.
    pub population: Population<G>,
    /// The best individual seen during the run.
    pub best: Individual<G>,
    /// The number of generations completed.
    pub generations: usize,
}

/// A configured evolutionary run. Create one with
/// [`EvolutionEngineBuilder`](crate::evolution::EvolutionEngineBuilder).
pub struct EvolutionEngine<G: Gene> {
    pub(crate) genotype_factory: GenotypeFactory<G>,
    pub(crate) challenge: Box<dyn Challenge<G>>,
    pub(crate) ranker: Arc<dyn Ranker>,
    pub(crate) survivor_selector: Box<dyn Selector<G>>,
    pub(crate) offspring_selector: Box<dyn Selector<G>>,
    pub(crate) alterers: Vec<Box<dyn Alterer<G>>>,
    pub(crate) limits: Vec<Box<dyn Limit<G>>>,
    pub(crate) listeners: Vec<Box<dyn EvolutionListener<G>>>,
    pub(crate) options: EvolutionOptions,
}

impl<G: Gene> fmt::Debug for EvolutionEngine<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvolutionEngine")
            .field("genotype_factory", &self.genotype_factory)
            .field("ranker", &self.ranker)
            .field("survivor_selector", &self.survivor_selector)
            .field("offspring_selector", &self.offspring_selector)
            .field("alterers", &self.alterers)
            .field("limits", &self.limits)
            .field("listeners", &self.listeners.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

struct Run<'a, G: Gene> {
    engine: &'a EvolutionEngine<G>,
    evaluator: Evaluator,
    phase: EvolutionPhase,
}

impl<G: Gene> Run<'_, G> {
    fn enter(&mut self, phase: EvolutionPhase) {
        debug!(from = ?self.phase, to = ?phase, "phase");
        for listener in &self.engine.listeners {
            listener.on_phase_changed(self.phase, phase);
        }
        self.phase = phase;
    }

    fn evaluate(&mut self, population: Population<G>) -> Result<Population<G>> {
        self.enter(EvolutionPhase::Evaluating);
        let (population, calls) = self
            .evaluator
            .evaluate(population, self.engine.challenge.as_ref())?;
        debug!(calls, "evaluated");
        Ok(population)
    }
}

impl<G: Gene> EvolutionEngine<G> {
    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn ranker(&self) -> &dyn Ranker {
        self.ranker.as_ref()
    }

    /// Runs the evolution with a fresh context built from the options.
    ///
    /// # Errors
    ///
    /// Fails with the first error of any stage. Errors of the challenge are returned
    /// unchanged and abort the run.
    pub fn evolve(&self) -> Result<EvolutionResult<G>> {
        let mut ctx = self.options.context();
        self.evolve_with(&mut ctx)
    }

    /// Runs the evolution drawing from the given context.
    pub fn evolve_with(&self, ctx: &mut EvolutionContext) -> Result<EvolutionResult<G>> {
        let span = debug_span!("evolve", population_size = self.options.get_population_size());
        let _guard = span.enter();

        let started = Instant::now();
        let mut run = Run {
            engine: self,
            evaluator: Evaluator::new(self.options.get_parallel_threshold()),
            phase: EvolutionPhase::Created,
        };

        run.enter(EvolutionPhase::Initializing);
        for listener in &self.listeners {
            listener.on_initialization_started();
        }
        let initialization = Instant::now();
        let population = self.initial_population(ctx)?;
        for listener in &self.listeners {
            listener.on_initialization_ended(&population, initialization.elapsed());
        }

        let mut population = run.evaluate(population)?;
        let mut best = self
            .ranker
            .best(&population)
            .cloned()
            .ok_or_else_genetic(|| GeneticError::Evolution("initial population is empty".to_string()))?;

        let mut generation = 0;
        let mut steady_generations = 0;
        loop {
            generation += 1;
            let generation_started = Instant::now();
            for listener in &self.listeners {
                listener.on_generation_started(generation);
            }

            run.enter(EvolutionPhase::Selecting);
            let survivors = self.survivor_selector.select(
                &population,
                self.options.survivor_count(),
                self.ranker.as_ref(),
                ctx,
            )?;
            let mut offspring = self.offspring_selector.select(
                &population,
                self.options.offspring_count(),
                self.ranker.as_ref(),
                ctx,
            )?;

            run.enter(EvolutionPhase::Altering);
            for alterer in &self.alterers {
                let result = alterer.alter(offspring, ctx)?;
                debug!(alterer = ?alterer, alterations = result.alterations, "altered");
                offspring = result.population;
            }

            let mut next = survivors;
            next.extend(offspring);
            population = run.evaluate(next)?;

            run.enter(EvolutionPhase::Checking);
            let generation_best = self
                .ranker
                .best(&population)
                .ok_or_else_genetic(|| {
                    GeneticError::Evolution(format!("generation {} is empty", generation))
                })?;
            if self.ranker.compare(generation_best, &best) == std::cmp::Ordering::Greater {
                best = generation_best.clone();
                steady_generations = 0;
            } else {
                steady_generations += 1;
            }

            for listener in &self.listeners {
                listener.on_generation_ended(generation, &population, generation_started.elapsed());
            }

            let state = EvolutionState {
                generation,
                population: &population,
                best: &best,
                steady_generations,
                ranker: self.ranker.as_ref(),
            };
            if self.limits.iter().any(|limit| limit.reached(&state)) {
                break;
            }
        }

        run.enter(EvolutionPhase::Terminated);
        let result = EvolutionResult {
            population,
            best,
            generations: generation,
        };
        for listener in &self.listeners {
            listener.on_evolution_ended(&result, started.elapsed());
        }
        Ok(result)
    }

    fn initial_population(&self, ctx: &mut EvolutionContext) -> Result<Population<G>> {
        (0..self.options.get_population_size())
            .map(|_| self.genotype_factory.make(ctx).map(Individual::new))
            .collect()
    }
}
