use std::cmp::Ordering;

use crate::constraints::{enforce, IntRequirement};
use crate::context::EvolutionContext;
use crate::error::Result;
use crate::genetic::{Gene, Individual, Population};
use crate::ranking::{Ranker, RankerExt};
use crate::selection::selector::{ensure_selectable, Selector};

/// A selection strategy that selects individuals through tournament selection.
///
/// For every output slot, `tournament_size` individuals are drawn uniformly with
/// replacement and the best of them under the ranker wins. When several participants
/// share the best fitness, the first one drawn wins.
///
/// Tournament selection provides a balance between exploration and exploitation:
/// - Smaller tournament sizes lead to more exploration (a size of 1 is uniform selection)
/// - Larger tournament sizes lead to more exploitation (more focus on the best individuals)
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "TournamentSelectorConfig")
)]
#[derive(Debug, Clone)]
pub struct TournamentSelector {
    tournament_size: usize,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TournamentSelectorConfig {
    tournament_size: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<TournamentSelectorConfig> for TournamentSelector {
    type Error = crate::error::GeneticError;

    fn try_from(config: TournamentSelectorConfig) -> Result<Self> {
        Self::new(config.tournament_size)
    }
}

impl TournamentSelector {
    pub const DEFAULT_TOURNAMENT_SIZE: usize = 3;

    /// Creates a new tournament selector.
    ///
    /// # Errors
    ///
    /// Returns an int constraint error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        enforce(|e| {
            e.require("tournamentSize", &tournament_size, IntRequirement::BePositive);
        })?;
        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament and returns the index of the winner.
    fn run_tournament<G: Gene>(
        &self,
        population: &[Individual<G>],
        ranker: &dyn Ranker,
        ctx: &mut EvolutionContext,
    ) -> usize {
        let mut winner = ctx.rng.index(population.len());
        for _ in 1..self.tournament_size {
            let challenger = ctx.rng.index(population.len());
            if ranker.compare(&population[challenger], &population[winner]) == Ordering::Greater {
                winner = challenger;
            }
        }
        winner
    }
}

impl Default for TournamentSelector {
    fn default() -> Self {
        Self {
            tournament_size: Self::DEFAULT_TOURNAMENT_SIZE,
        }
    }
}

impl<G: Gene> Selector<G> for TournamentSelector {
    fn select(
        &self,
        population: &[Individual<G>],
        count: usize,
        ranker: &dyn Ranker,
        ctx: &mut EvolutionContext,
    ) -> Result<Population<G>> {
        ensure_selectable(population)?;
        Ok((0..count)
            .map(|_| population[self.run_tournament(population, ranker, ctx)].clone())
            .collect())
    }
}
