//! # Listeners
//!
//! Lifecycle hooks of a run. Hooks are called in order: initialization started, then
//! initialization ended, then for every generation started before ended, then evolution
//! ended. Every hook has a no-op default.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, trace};

use crate::evolution::engine::{EvolutionPhase, EvolutionResult};
use crate::evolution::options::LogLevel;
use crate::genetic::{Gene, Individual};
use crate::ranking::{Ranker, RankerExt};

#[allow(unused_variables)]
pub trait EvolutionListener<G: Gene>: Send + Sync {
    fn on_phase_changed(&self, from: EvolutionPhase, to: EvolutionPhase) {}

    fn on_initialization_started(&self) {}

    /// `elapsed` is measured from the matching start hook.
    fn on_initialization_ended(&self, population: &[Individual<G>], elapsed: Duration) {}

    fn on_generation_started(&self, generation: usize) {}

    fn on_generation_ended(&self, generation: usize, population: &[Individual<G>], elapsed: Duration) {}

    fn on_evolution_ended(&self, result: &EvolutionResult<G>, elapsed: Duration) {}
}

/// Reports the run through `tracing` events, as much as the log level asks for.
#[derive(Debug)]
pub struct TracingListener {
    level: LogLevel,
    ranker: Arc<dyn Ranker>,
}

impl TracingListener {
    /// `ranker` decides which fitness is reported as the best of a generation.
    pub fn new(level: LogLevel, ranker: Arc<dyn Ranker>) -> Self {
        Self { level, ranker }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }
}

impl<G: Gene> EvolutionListener<G> for TracingListener {
    fn on_phase_changed(&self, from: EvolutionPhase, to: EvolutionPhase) {
        if self.level == LogLevel::Verbose {
            trace!(?from, ?to, "phase changed");
        }
    }

    fn on_initialization_ended(&self, population: &[Individual<G>], elapsed: Duration) {
        if self.level != LogLevel::None {
            info!(size = population.len(), ?elapsed, "population initialized");
        }
    }

    fn on_generation_ended(&self, generation: usize, population: &[Individual<G>], elapsed: Duration) {
        match self.level {
            LogLevel::None => {}
            LogLevel::Minimal => {
                let best = self.ranker.best(population).map(|i| i.fitness());
                info!(generation, ?best, ?elapsed, "generation ended");
            }
            LogLevel::Verbose => {
                let best = self.ranker.best(population).map(|i| i.fitness());
                info!(generation, ?best, ?elapsed, "generation ended");
                for individual in population {
                    debug!(generation, fitness = individual.fitness(), genotype = ?individual.genotype().flatten());
                }
            }
        }
    }

    fn on_evolution_ended(&self, result: &EvolutionResult<G>, elapsed: Duration) {
        if self.level != LogLevel::None {
            info!(
                generations = result.generations,
                best = result.best.fitness(),
                ?elapsed,
                "evolution ended"
            );
        }
    }
}
