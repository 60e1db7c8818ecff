//! # Chromosomes
//!
//! A [`Chromosome`] is an ordered, immutable sequence of genes of one kind. Chromosomes are
//! produced by a [`ChromosomeFactory`], which validates its configuration every time it
//! makes one and reports every problem at once.
//!
//! ## Example
//!
//! ```rust
//! use genforge::context::EvolutionContext;
//! use genforge::genetic::{ChromosomeFactory, IntChromosomeFactory};
//!
//! let mut ctx = EvolutionContext::seeded(3);
//! let factory = IntChromosomeFactory::new(4)
//!     .with_ranges(vec![0..=1, 0..=10, 0..=100, 0..=1000]);
//!
//! let chromosome = factory.make(&mut ctx).unwrap();
//! assert_eq!(chromosome.len(), 4);
//! assert!(chromosome.verify());
//! ```

use std::fmt::{self, Debug};
use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::constraints::{
    enforce_with, CollectionRequirement, ConstraintKind, DoubleRequirement, Enforcer,
    IntRequirement, PairRequirement,
};
use crate::context::EvolutionContext;
use crate::error::Result;
use crate::genetic::genes::{BoolGene, Bounded, BoundedGene, Filter, Gene};
use crate::genetic::program::{PrimitiveSet, ProgramGene};

/// An ordered sequence of genes of one kind.
#[derive(Debug, Clone)]
pub struct Chromosome<G: Gene> {
    genes: Vec<G>,
}

impl<G: Gene> Chromosome<G> {
    pub fn new(genes: Vec<G>) -> Self {
        Self { genes }
    }

    pub fn genes(&self) -> &[G] {
        &self.genes
    }

    pub fn into_genes(self) -> Vec<G> {
        self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// The values of all genes, in order.
    pub fn values(&self) -> Vec<G::Value> {
        self.genes.iter().map(|g| g.value().clone()).collect()
    }

    /// `true` if every gene verifies.
    pub fn verify(&self) -> bool {
        self.genes.iter().all(Gene::verify)
    }

    /// A chromosome of the same kind holding `genes`.
    pub fn duplicate_with_genes(&self, genes: Vec<G>) -> Self {
        Self::new(genes)
    }
}

impl<G: Gene> FromIterator<G> for Chromosome<G> {
    fn from_iter<I: IntoIterator<Item = G>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Produces chromosomes of a configured shape.
pub trait ChromosomeFactory<G: Gene>: Debug + Send + Sync {
    /// Validates the configuration and builds a new random chromosome.
    ///
    /// # Errors
    ///
    /// Returns a constraint error listing every inconsistent setting, unless the context
    /// skips validation.
    fn make(&self, ctx: &mut EvolutionContext) -> Result<Chromosome<G>>;
}

/// Factory for chromosomes of [`BoundedGene`]s.
///
/// Ranges and filters may be left empty (the gene defaults apply), given once (broadcast
/// to every gene) or given once per gene.
#[derive(Clone)]
pub struct BoundedChromosomeFactory<T: Bounded> {
    size: usize,
    ranges: Vec<RangeInclusive<T>>,
    filters: Vec<Filter<T>>,
}

pub type IntChromosomeFactory = BoundedChromosomeFactory<i64>;
pub type DoubleChromosomeFactory = BoundedChromosomeFactory<f64>;
pub type CharChromosomeFactory = BoundedChromosomeFactory<char>;

impl<T: Bounded> BoundedChromosomeFactory<T> {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            ranges: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// One range applied to every gene.
    pub fn with_range(mut self, range: RangeInclusive<T>) -> Self {
        self.ranges = vec![range];
        self
    }

    pub fn with_ranges(mut self, ranges: Vec<RangeInclusive<T>>) -> Self {
        self.ranges = ranges;
        self
    }

    /// One filter applied to every gene.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.filters = vec![Arc::new(filter)];
        self
    }

    pub fn with_filters(mut self, filters: Vec<Filter<T>>) -> Self {
        self.filters = filters;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Records every inconsistency of the configuration.
    pub fn enforce_constraints(&self, e: &mut Enforcer) {
        e.require("size", &self.size, IntRequirement::BePositive);
        e.require(
            "ranges",
            self.ranges.as_slice(),
            CollectionRequirement::HaveSizeAtMostOneOr(self.size),
        );
        e.require(
            "filters",
            self.filters.as_slice(),
            CollectionRequirement::HaveSizeAtMostOneOr(self.size),
        );
        for (i, range) in self.ranges.iter().enumerate() {
            e.require(
                &format!("ranges[{}]", i),
                &(*range.start(), *range.end()),
                PairRequirement::BeOrdered,
            );
            e.check(&format!("ranges[{}]", i), ConstraintKind::Double, T::is_sampleable(range), || {
                format!(
                    "expected range {:?}..={:?} to have finite bounds and a finite width",
                    range.start(),
                    range.end()
                )
            });
        }
    }

    fn range_at(&self, index: usize) -> RangeInclusive<T> {
        match self.ranges.len() {
            0 => T::full_range(),
            n => self.ranges[index % n].clone(),
        }
    }

    fn filter_at(&self, index: usize) -> Filter<T> {
        match self.filters.len() {
            0 => BoundedGene::<T>::accept_all(),
            n => Arc::clone(&self.filters[index % n]),
        }
    }
}

impl<T: Bounded> Debug for BoundedChromosomeFactory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedChromosomeFactory")
            .field("size", &self.size)
            .field("ranges", &self.ranges)
            .field("filters", &self.filters.len())
            .finish()
    }
}

impl<T: Bounded> ChromosomeFactory<BoundedGene<T>> for BoundedChromosomeFactory<T> {
    fn make(&self, ctx: &mut EvolutionContext) -> Result<Chromosome<BoundedGene<T>>> {
        enforce_with(ctx.validation, |e| self.enforce_constraints(e))?;
        (0..self.size)
            .map(|i| BoundedGene::random(self.range_at(i), self.filter_at(i), &mut ctx.rng))
            .collect::<Result<Vec<_>>>()
            .map(Chromosome::new)
    }
}

/// Factory for chromosomes of [`BoolGene`]s.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct BoolChromosomeFactory {
    size: usize,
    true_rate: f64,
}

impl BoolChromosomeFactory {
    /// `true_rate` is the probability of each gene being `true`.
    pub fn new(size: usize, true_rate: f64) -> Self {
        Self { size, true_rate }
    }
}

impl ChromosomeFactory<BoolGene> for BoolChromosomeFactory {
    fn make(&self, ctx: &mut EvolutionContext) -> Result<Chromosome<BoolGene>> {
        enforce_with(ctx.validation, |e| {
            e.require("size", &self.size, IntRequirement::BePositive);
            e.require("trueRate", &self.true_rate, DoubleRequirement::BeInUnitInterval);
        })?;
        Ok((0..self.size)
            .map(|_| BoolGene::new(ctx.rng.coin(self.true_rate)))
            .collect())
    }
}

/// Factory for chromosomes holding a random permutation of fixed, distinct values.
///
/// Every gene's range spans the smallest to the largest value.
#[derive(Debug, Clone)]
pub struct PermutationChromosomeFactory<T: Bounded> {
    values: Vec<T>,
}

impl<T: Bounded> PermutationChromosomeFactory<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self { values }
    }

    fn is_distinct(&self) -> bool {
        self.values
            .iter()
            .enumerate()
            .all(|(i, a)| self.values[i + 1..].iter().all(|b| a != b))
    }

    fn span(&self) -> Option<RangeInclusive<T>> {
        let mut values = self.values.iter().copied();
        let first = values.next()?;
        let (lo, hi) = values.fold((first, first), |(lo, hi), v| {
            (if v < lo { v } else { lo }, if v > hi { v } else { hi })
        });
        Some(lo..=hi)
    }
}

impl<T: Bounded> ChromosomeFactory<BoundedGene<T>> for PermutationChromosomeFactory<T> {
    fn make(&self, ctx: &mut EvolutionContext) -> Result<Chromosome<BoundedGene<T>>> {
        enforce_with(ctx.validation, |e| {
            e.require("values", self.values.as_slice(), CollectionRequirement::NotBeEmpty);
            e.check("values", ConstraintKind::Collection, self.is_distinct(), || {
                format!("expected distinct values but got {:?}", self.values)
            });
        })?;
        let range = self.span().unwrap_or_else(T::full_range);
        let mut values = self.values.clone();
        ctx.rng.shuffle(&mut values);
        Ok(values
            .into_iter()
            .map(|v| BoundedGene::new(v, range.clone(), BoundedGene::<T>::accept_all()))
            .collect())
    }
}

/// Factory for chromosomes of [`ProgramGene`]s.
#[derive(Debug, Clone)]
pub struct ProgramChromosomeFactory {
    size: usize,
    set: Arc<PrimitiveSet>,
    max_depth: usize,
}

impl ProgramChromosomeFactory {
    pub fn new(size: usize, set: Arc<PrimitiveSet>, max_depth: usize) -> Self {
        Self {
            size,
            set,
            max_depth,
        }
    }
}

impl ChromosomeFactory<ProgramGene> for ProgramChromosomeFactory {
    fn make(&self, ctx: &mut EvolutionContext) -> Result<Chromosome<ProgramGene>> {
        enforce_with(ctx.validation, |e| {
            e.require("size", &self.size, IntRequirement::BePositive);
        })?;
        Ok((0..self.size)
            .map(|_| ProgramGene::random(Arc::clone(&self.set), self.max_depth, &mut ctx.rng))
            .collect())
    }
}
