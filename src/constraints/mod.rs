//! # Constraints Module
//!
//! This module provides the contract checking used at every construction boundary of the
//! library: chromosome factories, genotypes and operator constructors.
//!
//! ## Overview
//!
//! A check is a named clause pairing a value with a [`Requirement`]. Clauses are evaluated
//! inside an [`Enforcer`], which keeps going after a failure and reports every violated
//! clause at once as a single [`GeneticError::Constraint`].
//!
//! ## Key Components
//!
//! - [`Requirement`] trait: a predicate over a value plus the kind of constraint it expresses
//! - [`ConstraintViolation`]: one failed clause
//! - [`ConstraintViolations`]: the aggregate carried by the composite error
//! - [`Enforcer`], [`enforce`] and [`enforce_with`]: collect clauses, then finalize
//! - [`ValidationMode`]: enforce or skip checks for a whole run
//!
//! ## Basic Usage
//!
//! ```rust
//! use genforge::constraints::{enforce, CollectionRequirement, DoubleRequirement, IntRequirement};
//!
//! let result = enforce(|e| {
//!     e.require("size", &0_usize, IntRequirement::BePositive);
//!     e.require("rate", &1.5, DoubleRequirement::BeInUnitInterval);
//!     e.require("ranges", [1, 2].as_slice(), CollectionRequirement::HaveSizeAtMostOneOr(3));
//! });
//!
//! let error = result.unwrap_err();
//! assert_eq!(error.violations().unwrap().len(), 3);
//! ```

use std::fmt::{self, Display};

use crate::error::{GeneticError, Result};

pub mod requirements;

pub use requirements::{CollectionRequirement, DoubleRequirement, IntRequirement, PairRequirement};

/// Whether contract checks run or are bypassed.
///
/// The mode is carried by the evolution options and context of a run, so skipping checks
/// never outlives the run that asked for it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Every clause is evaluated.
    #[default]
    Enforce,
    /// Every clause is ignored.
    Skip,
}

impl ValidationMode {
    pub fn is_skipping(&self) -> bool {
        matches!(self, ValidationMode::Skip)
    }
}

/// The domain a constraint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Int,
    Double,
    Pair,
    Collection,
}

impl Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstraintKind::Int => "int",
            ConstraintKind::Double => "double",
            ConstraintKind::Pair => "pair",
            ConstraintKind::Collection => "collection",
        };
        write!(f, "{}", name)
    }
}

/// Represents a violation of a single clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintViolation {
    kind: ConstraintKind,
    clause: String,
    message: String,
}

impl ConstraintViolation {
    /// Creates a new constraint violation for the named clause.
    pub fn new<S: Into<String>, M: Into<String>>(kind: ConstraintKind, clause: S, message: M) -> Self {
        Self {
            kind,
            clause: clause.into(),
            message: message.into(),
        }
    }

    /// Returns the kind of constraint that was violated.
    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// Returns the name of the clause that was violated.
    pub fn clause(&self) -> &str {
        &self.clause
    }

    /// Returns the description of the violation.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.clause, self.message)
    }
}

/// Every violation raised by one enforcement block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstraintViolations(Vec<ConstraintViolation>);

impl ConstraintViolations {
    pub fn new(violations: Vec<ConstraintViolation>) -> Self {
        Self(violations)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConstraintViolation> {
        self.0.iter()
    }

    /// Returns `true` if a clause with the given name was violated.
    pub fn contains_clause(&self, clause: &str) -> bool {
        self.0.iter().any(|v| v.clause() == clause)
    }
}

impl Display for ConstraintViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} violation(s): ", self.0.len())?;
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl IntoIterator for ConstraintViolations {
    type Item = ConstraintViolation;
    type IntoIter = std::vec::IntoIter<ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A predicate over values of type `T`.
///
/// Implementations are closed sums per constrained domain (see [`requirements`]); the
/// [`ConstraintKind`] they report decides how a failure is classified.
pub trait Requirement<T: ?Sized> {
    /// Returns `true` if the value satisfies the requirement.
    fn validator(&self, value: &T) -> bool;

    /// The kind of violation this requirement produces.
    fn kind(&self) -> ConstraintKind;

    /// What the requirement asks for, e.g. "be positive".
    fn describe(&self) -> String;

    /// A message explaining why `value` fails the requirement.
    fn describe_failure(&self, value: &T) -> String;

    /// Turns a failure on `value` into a violation of the named clause.
    fn generate_violation(&self, clause: &str, value: &T) -> ConstraintViolation {
        ConstraintViolation::new(self.kind(), clause, self.describe_failure(value))
    }

    /// Checks the value, producing the violation on failure.
    fn validate(&self, clause: &str, value: &T) -> std::result::Result<(), ConstraintViolation> {
        if self.validator(value) {
            Ok(())
        } else {
            Err(self.generate_violation(clause, value))
        }
    }

    /// The logical complement of [`Requirement::validate`].
    fn validate_not(&self, clause: &str, value: &T) -> std::result::Result<(), ConstraintViolation> {
        if self.validator(value) {
            Err(ConstraintViolation::new(
                self.kind(),
                clause,
                format!("expected value not to {}", self.describe()),
            ))
        } else {
            Ok(())
        }
    }
}

/// Collects the outcome of every clause in a block.
#[derive(Debug, Default)]
pub struct Enforcer {
    mode: ValidationMode,
    violations: Vec<ConstraintViolation>,
}

impl Enforcer {
    /// Creates an enforcer that evaluates every clause.
    pub fn new() -> Self {
        Self::with_mode(ValidationMode::Enforce)
    }

    /// Creates an enforcer with the given validation mode.
    pub fn with_mode(mode: ValidationMode) -> Self {
        Self {
            mode,
            violations: Vec::new(),
        }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Requires `value` to satisfy `requirement`.
    pub fn require<T, R>(&mut self, clause: &str, value: &T, requirement: R) -> &mut Self
    where
        T: ?Sized,
        R: Requirement<T>,
    {
        if !self.mode.is_skipping() {
            if let Err(violation) = requirement.validate(clause, value) {
                self.violations.push(violation);
            }
        }
        self
    }

    /// Requires `value` not to satisfy `requirement`.
    pub fn require_not<T, R>(&mut self, clause: &str, value: &T, requirement: R) -> &mut Self
    where
        T: ?Sized,
        R: Requirement<T>,
    {
        if !self.mode.is_skipping() {
            if let Err(violation) = requirement.validate_not(clause, value) {
                self.violations.push(violation);
            }
        }
        self
    }

    /// Records a free-form predicate. The message is only built on failure.
    pub fn check<F>(&mut self, clause: &str, kind: ConstraintKind, holds: bool, message: F) -> &mut Self
    where
        F: FnOnce() -> String,
    {
        if !self.mode.is_skipping() && !holds {
            self.violations
                .push(ConstraintViolation::new(kind, clause, message()));
        }
        self
    }

    /// Returns the violations recorded so far.
    pub fn violations(&self) -> &[ConstraintViolation] {
        &self.violations
    }

    /// Finalizes the block, failing with every recorded violation.
    pub fn finish(self) -> Result<()> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(GeneticError::Constraint(ConstraintViolations::new(
                self.violations,
            )))
        }
    }
}

/// Runs a block of clauses, always checking them.
pub fn enforce<F>(block: F) -> Result<()>
where
    F: FnOnce(&mut Enforcer),
{
    enforce_with(ValidationMode::Enforce, block)
}

/// Runs a block of clauses under the given validation mode.
pub fn enforce_with<F>(mode: ValidationMode, block: F) -> Result<()>
where
    F: FnOnce(&mut Enforcer),
{
    let mut enforcer = Enforcer::with_mode(mode);
    block(&mut enforcer);
    enforcer.finish()
}
