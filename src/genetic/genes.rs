//! # Genes
//!
//! A gene is the smallest unit of genetic information. Genes are immutable values: every
//! change (mutation, crossover) produces a new gene through [`Gene::generate`] or
//! [`Gene::duplicate_with_value`].
//!
//! ## Example
//!
//! ```rust
//! use genforge::genetic::{Gene, IntGene};
//! use genforge::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let gene = IntGene::random(0..=10, IntGene::accept_all(), &mut rng).unwrap();
//! assert!(gene.verify());
//!
//! let mutated = gene.generate(&mut rng);
//! assert!(mutated.verify());
//! assert_eq!(mutated.range(), gene.range());
//! ```

use std::convert::Infallible;
use std::fmt::{self, Debug};
use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::constraints::{enforce, CollectionRequirement};
use crate::error::{absurd, GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Number of draws attempted before giving up on a filter.
pub const MAX_FILTER_ATTEMPTS: usize = 1000;

/// A predicate every value of a filtered gene must satisfy.
pub type Filter<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// The capabilities shared by every gene.
pub trait Gene: Clone + Debug + Send + Sync + 'static {
    /// The type of the value held by the gene.
    type Value: Clone + Debug + PartialEq + Send + Sync + 'static;

    /// Returns the value held by the gene.
    fn value(&self) -> &Self::Value;

    /// Produces a gene of the same kind and constraints holding a freshly generated value.
    fn generate(&self, rng: &mut RandomNumberGenerator) -> Self;

    /// Produces a gene of the same kind and constraints holding `value`.
    fn duplicate_with_value(&self, value: Self::Value) -> Self;

    /// Returns `true` if the gene satisfies its own constraints. Must be side-effect free.
    fn verify(&self) -> bool {
        true
    }
}

/// Genes whose value is a number and can therefore be averaged.
pub trait NumberGene: Gene {
    fn to_f64(&self) -> f64;

    /// Returns a gene like `self` holding the given real value, converted to the gene's type.
    fn with_f64(&self, value: f64) -> Self;

    /// The arithmetic mean of the genes' values, as a gene like the first one.
    fn average(genes: &[Self]) -> Result<Self> {
        enforce(|e| {
            e.require("genes", genes, CollectionRequirement::NotBeEmpty);
        })?;
        let mean = genes.iter().map(|g| g.to_f64()).sum::<f64>() / genes.len() as f64;
        Ok(genes[0].with_f64(mean))
    }
}

/// Value types that can live inside a [`BoundedGene`].
pub trait Bounded: Copy + PartialOrd + Debug + Send + Sync + 'static {
    /// The range used when none is supplied.
    fn full_range() -> RangeInclusive<Self>;

    /// Draws a uniform value from an ordered range.
    fn sample(range: &RangeInclusive<Self>, rng: &mut RandomNumberGenerator) -> Self;

    /// Whether the uniform sampler can draw from `range`.
    fn is_sampleable(_range: &RangeInclusive<Self>) -> bool {
        true
    }
}

impl Bounded for i64 {
    fn full_range() -> RangeInclusive<Self> {
        i64::MIN..=i64::MAX
    }

    fn sample(range: &RangeInclusive<Self>, rng: &mut RandomNumberGenerator) -> Self {
        rng.gen_range(*range.start()..=*range.end())
    }
}

impl Bounded for f64 {
    // Wider spans overflow the uniform sampler.
    fn full_range() -> RangeInclusive<Self> {
        (f64::MIN / 4.0)..=(f64::MAX / 4.0)
    }

    fn sample(range: &RangeInclusive<Self>, rng: &mut RandomNumberGenerator) -> Self {
        let (lo, hi) = (*range.start(), *range.end());
        if lo == hi {
            return lo;
        }
        if Self::is_sampleable(range) {
            return rng.gen_range(lo..=hi);
        }
        // Interpolate so an overflowing span cannot reach the sampler.
        let (lo, hi) = (lo.max(f64::MIN), hi.min(f64::MAX));
        let t = rng.next_f64();
        lo * (1.0 - t) + hi * t
    }

    fn is_sampleable(range: &RangeInclusive<Self>) -> bool {
        let (lo, hi) = (*range.start(), *range.end());
        lo.is_finite() && hi.is_finite() && (hi - lo).is_finite()
    }
}

impl Bounded for char {
    fn full_range() -> RangeInclusive<Self> {
        '\0'..=char::MAX
    }

    fn sample(range: &RangeInclusive<Self>, rng: &mut RandomNumberGenerator) -> Self {
        rng.gen_range(*range.start()..=*range.end())
    }
}

/// Bounded values that convert to and from reals.
pub trait Numeric: Bounded {
    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Self;
}

impl Numeric for i64 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value.round() as i64
    }
}

impl Numeric for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}

/// A gene holding a value from an inclusive range that also passes a filter.
#[derive(Clone)]
pub struct BoundedGene<T: Bounded> {
    value: T,
    range: RangeInclusive<T>,
    filter: Filter<T>,
}

pub type IntGene = BoundedGene<i64>;
pub type DoubleGene = BoundedGene<f64>;
pub type CharGene = BoundedGene<char>;

impl<T: Bounded> BoundedGene<T> {
    /// Creates a gene from its parts. The value is not checked, see [`Gene::verify`].
    pub fn new(value: T, range: RangeInclusive<T>, filter: Filter<T>) -> Self {
        Self {
            value,
            range,
            filter,
        }
    }

    /// Creates a gene with the full range of `T` and no filter.
    pub fn unbounded(value: T) -> Self {
        Self::new(value, T::full_range(), Self::accept_all())
    }

    /// A filter that accepts every value.
    pub fn accept_all() -> Filter<T> {
        Arc::new(|_: &T| true)
    }

    /// Draws a gene from `range` whose value passes `filter`.
    ///
    /// # Errors
    ///
    /// Returns `MaxAttemptsReached` if no passing value was found within
    /// [`MAX_FILTER_ATTEMPTS`] draws.
    pub fn random(
        range: RangeInclusive<T>,
        filter: Filter<T>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self> {
        let value = draw(&range, &filter, rng).ok_or_else(|| {
            GeneticError::MaxAttemptsReached(format!(
                "no value in {:?} passed the gene filter after {} draws",
                range, MAX_FILTER_ATTEMPTS
            ))
        })?;
        Ok(Self::new(value, range, filter))
    }

    pub fn range(&self) -> &RangeInclusive<T> {
        &self.range
    }

    pub fn filter(&self) -> &Filter<T> {
        &self.filter
    }
}

fn draw<T: Bounded>(
    range: &RangeInclusive<T>,
    filter: &Filter<T>,
    rng: &mut RandomNumberGenerator,
) -> Option<T> {
    (0..MAX_FILTER_ATTEMPTS)
        .map(|_| T::sample(range, rng))
        .find(|value| filter(value))
}

impl<T: Bounded> Debug for BoundedGene<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedGene")
            .field("value", &self.value)
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}

impl<T: Bounded> Gene for BoundedGene<T> {
    type Value = T;

    fn value(&self) -> &T {
        &self.value
    }

    /// Draws a new value from the gene's own range and filter. If the filter rejects every
    /// draw the current value is kept.
    fn generate(&self, rng: &mut RandomNumberGenerator) -> Self {
        let value = draw(&self.range, &self.filter, rng).unwrap_or(self.value);
        self.duplicate_with_value(value)
    }

    fn duplicate_with_value(&self, value: T) -> Self {
        Self::new(value, self.range.clone(), Arc::clone(&self.filter))
    }

    fn verify(&self) -> bool {
        self.range.contains(&self.value) && (self.filter)(&self.value)
    }
}

impl<T: Numeric> NumberGene for BoundedGene<T> {
    fn to_f64(&self) -> f64 {
        self.value.to_f64()
    }

    fn with_f64(&self, value: f64) -> Self {
        self.duplicate_with_value(T::from_f64(value))
    }
}

/// A gene holding a boolean.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolGene {
    value: bool,
}

impl BoolGene {
    pub fn new(value: bool) -> Self {
        Self { value }
    }
}

impl Gene for BoolGene {
    type Value = bool;

    fn value(&self) -> &bool {
        &self.value
    }

    fn generate(&self, rng: &mut RandomNumberGenerator) -> Self {
        Self::new(rng.coin(0.5))
    }

    fn duplicate_with_value(&self, value: bool) -> Self {
        Self::new(value)
    }
}

/// A gene that deliberately holds nothing, used to fill shapes without data.
///
/// Reading its value is an absurd operation and panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaceholderGene;

impl Gene for PlaceholderGene {
    type Value = Infallible;

    fn value(&self) -> &Infallible {
        absurd("a placeholder gene has no value")
    }

    fn generate(&self, _rng: &mut RandomNumberGenerator) -> Self {
        *self
    }

    fn duplicate_with_value(&self, value: Infallible) -> Self {
        match value {}
    }
}
