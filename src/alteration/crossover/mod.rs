//! Crossover operators.
//!
//! A crossover works chromosome by chromosome: for every chromosome position of a parent
//! group, with probability `chromosome_rate`, the parents' chromosomes at that position are
//! recombined. Every parent group yields as many offspring as it has parents.

pub mod combine;
pub mod pmx;
pub mod position_based;
pub mod single_point;

pub use combine::{AverageCrossover, CombineCrossover};
pub use pmx::PartiallyMappedCrossover;
pub use position_based::PositionBasedCrossover;
pub use single_point::SinglePointCrossover;

use std::fmt::Debug;

use crate::alteration::AltererResult;
use crate::constraints::{enforce_with, CollectionRequirement, ConstraintKind};
use crate::context::EvolutionContext;
use crate::error::Result;
use crate::genetic::{Chromosome, Gene, Genotype, Individual, Population};

pub trait Crossover<G: Gene>: Debug + Send + Sync {
    /// Number of parents recombined together.
    fn num_parents(&self) -> usize {
        2
    }

    /// Probability that a chromosome position undergoes crossover.
    fn chromosome_rate(&self) -> f64;

    /// Recombines one chromosome from each parent, returning one offspring per parent.
    fn crossover_chromosomes(
        &self,
        parents: &[Chromosome<G>],
        ctx: &mut EvolutionContext,
    ) -> Result<Vec<Chromosome<G>>>;
}

/// Runs a crossover over a whole population.
///
/// Consecutive individuals form parent groups. A trailing group that is too small is
/// topped up with random partners; only its real members are replaced by offspring.
pub fn recombine<G, C>(
    crossover: &C,
    mut population: Population<G>,
    ctx: &mut EvolutionContext,
) -> Result<AltererResult<G>>
where
    G: Gene,
    C: Crossover<G> + ?Sized,
{
    let group_size = crossover.num_parents();
    let len = population.len();
    if len < group_size {
        return Ok(AltererResult::unchanged(population));
    }

    let mut alterations = 0;
    for start in (0..len).step_by(group_size) {
        let members = (start + group_size).min(len) - start;
        let mut group: Vec<usize> = (start..start + members).collect();
        while group.len() < group_size {
            group.push(ctx.rng.index(len));
        }

        let (offspring, crossings) = cross_group(crossover, &population, &group, ctx)?;
        if crossings == 0 {
            continue;
        }
        alterations += crossings;
        for (&slot, genotype) in group[..members].iter().zip(offspring) {
            population[slot] = Individual::new(genotype);
        }
    }
    Ok(AltererResult::new(population, alterations))
}

fn cross_group<G, C>(
    crossover: &C,
    population: &[Individual<G>],
    group: &[usize],
    ctx: &mut EvolutionContext,
) -> Result<(Vec<Genotype<G>>, usize)>
where
    G: Gene,
    C: Crossover<G> + ?Sized,
{
    let genotypes: Vec<&Genotype<G>> = group.iter().map(|&i| population[i].genotype()).collect();
    let chromosome_count = genotypes[0].len();
    enforce_with(ctx.validation, |e| {
        for (i, genotype) in genotypes.iter().enumerate() {
            e.require(
                &format!("parents[{}].chromosomes", i),
                genotype.chromosomes(),
                CollectionRequirement::HaveSize(chromosome_count),
            );
        }
    })?;

    let mut offspring: Vec<Vec<Chromosome<G>>> = vec![Vec::with_capacity(chromosome_count); group.len()];
    let mut crossings = 0;
    for position in 0..chromosome_count {
        let parents: Vec<Chromosome<G>> = genotypes
            .iter()
            .map(|g| g.chromosomes()[position].clone())
            .collect();
        let children = if ctx.rng.coin(crossover.chromosome_rate()) {
            crossings += 1;
            crossover.crossover_chromosomes(&parents, ctx)?
        } else {
            parents
        };
        for (chromosomes, child) in offspring.iter_mut().zip(children) {
            chromosomes.push(child);
        }
    }

    let genotypes = genotypes
        .iter()
        .zip(offspring)
        .map(|(parent, chromosomes)| parent.duplicate_with_chromosomes(chromosomes))
        .collect();
    Ok((genotypes, crossings))
}

/// Requires the parent chromosomes to be non-empty and of equal length.
pub(crate) fn validate_parents<G: Gene>(
    parents: &[Chromosome<G>],
    ctx: &EvolutionContext,
) -> Result<()> {
    enforce_with(ctx.validation, |e| {
        e.require("parents", parents, CollectionRequirement::NotBeEmpty);
        let size = parents.first().map_or(0, |p| p.len());
        for (i, parent) in parents.iter().enumerate() {
            let clause = format!("parents[{}]", i);
            e.require(&clause, parent.genes(), CollectionRequirement::NotBeEmpty);
            e.require(&clause, parent.genes(), CollectionRequirement::HaveSize(size));
        }
    })
}

/// Requires every parent to be a permutation of the same distinct values.
pub(crate) fn validate_permutations<G: Gene>(
    parents: &[Chromosome<G>],
    ctx: &EvolutionContext,
) -> Result<()> {
    validate_parents(parents, ctx)?;
    enforce_with(ctx.validation, |e| {
        let reference = parents.first().map(Chromosome::values).unwrap_or_default();
        for (i, parent) in parents.iter().enumerate() {
            let values = parent.values();
            let distinct = values
                .iter()
                .enumerate()
                .all(|(j, v)| !values[..j].contains(v));
            let same_values = values.iter().all(|v| reference.contains(v));
            e.check(
                &format!("parents[{}]", i),
                ConstraintKind::Collection,
                distinct && same_values,
                || format!("expected a permutation of {:?}, got {:?}", reference, values),
            );
        }
    })
}
