//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct represents the configuration options for an evolutionary
//! run: the population size, how much of each generation survives unaltered, when fitness
//! evaluation goes parallel, how much is logged, whether contract checks run, and the seed
//! of the random stream.
//!
//! ## Example
//!
//! ```rust
//! use genforge::evolution::options::{EvolutionOptions, LogLevel};
//!
//! // Create a new EvolutionOptions instance with custom parameters
//! let options = EvolutionOptions::builder()
//!     .population_size(200)
//!     .survival_rate(0.3)
//!     .log_level(LogLevel::Minimal)
//!     .seed(42)
//!     .build();
//! assert_eq!(options.get_population_size(), 200);
//!
//! // Create a new EvolutionOptions instance with default parameters
//! let default_options = EvolutionOptions::default();
//! assert_eq!(default_options.get_population_size(), 50);
//! ```

use crate::constraints::{enforce, DoubleRequirement, Enforcer, IntRequirement, ValidationMode};
use crate::context::EvolutionContext;
use crate::error::Result;
use crate::rng::RandomNumberGenerator;

pub const DEFAULT_POPULATION_SIZE: usize = 50;
pub const DEFAULT_SURVIVAL_RATE: f64 = 0.5;
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// How much the run reports through `tracing`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Every generation and every individual's fitness.
    Verbose,
    /// One line per generation.
    Minimal,
    #[default]
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    population_size: usize,
    survival_rate: f64,
    parallel_threshold: usize,
    log_level: LogLevel,
    validation: ValidationMode,
    seed: Option<u64>,
}

impl EvolutionOptions {
    pub fn new(population_size: usize, survival_rate: f64, log_level: LogLevel) -> Self {
        Self {
            population_size,
            survival_rate,
            log_level,
            ..Self::default()
        }
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_survival_rate(&self) -> f64 {
        self.survival_rate
    }

    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn get_validation(&self) -> ValidationMode {
        self.validation
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_survival_rate(&mut self, survival_rate: f64) {
        self.survival_rate = survival_rate;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_validation(&mut self, validation: ValidationMode) {
        self.validation = validation;
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Number of survivors carried into each next generation.
    pub fn survivor_count(&self) -> usize {
        let survivors = (self.population_size as f64 * self.survival_rate).round() as usize;
        survivors.min(self.population_size)
    }

    /// Number of offspring bred for each next generation.
    pub fn offspring_count(&self) -> usize {
        self.population_size - self.survivor_count()
    }

    /// Records every invalid option.
    pub fn enforce_constraints(&self, e: &mut Enforcer) {
        e.require("populationSize", &self.population_size, IntRequirement::BePositive);
        e.require("survivalRate", &self.survival_rate, DoubleRequirement::BeInUnitInterval);
        e.require("parallelThreshold", &self.parallel_threshold, IntRequirement::BePositive);
    }

    /// # Errors
    ///
    /// Returns a constraint error listing every invalid option.
    pub fn validate(&self) -> Result<()> {
        enforce(|e| self.enforce_constraints(e))
    }

    /// A fresh context for one run: seeded if a seed is set, from entropy otherwise.
    pub fn context(&self) -> EvolutionContext {
        let rng = self
            .seed
            .map_or_else(RandomNumberGenerator::new, RandomNumberGenerator::from_seed);
        EvolutionContext::new(rng, self.validation)
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            survival_rate: DEFAULT_SURVIVAL_RATE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            log_level: LogLevel::None,
            validation: ValidationMode::Enforce,
            seed: None,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Provides a fluent interface for constructing `EvolutionOptions` instances. Unset fields
/// take their defaults; values are validated when the engine is built.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    population_size: Option<usize>,
    survival_rate: Option<f64>,
    parallel_threshold: Option<usize>,
    log_level: Option<LogLevel>,
    validation: Option<ValidationMode>,
    seed: Option<u64>,
}

impl EvolutionOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the share of each generation kept as survivors.
    pub fn survival_rate(mut self, value: f64) -> Self {
        self.survival_rate = Some(value);
        self
    }

    /// Sets the number of pending evaluations from which evaluation runs in parallel.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn validation(mut self, value: ValidationMode) -> Self {
        self.validation = Some(value);
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        EvolutionOptions {
            population_size: self.population_size.unwrap_or(DEFAULT_POPULATION_SIZE),
            survival_rate: self.survival_rate.unwrap_or(DEFAULT_SURVIVAL_RATE),
            parallel_threshold: self.parallel_threshold.unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
            log_level: self.log_level.unwrap_or_default(),
            validation: self.validation.unwrap_or_default(),
            seed: self.seed,
        }
    }
}
