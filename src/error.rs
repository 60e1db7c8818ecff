//! # Error Types
//!
//! This module defines the error type shared by every part of the library.
//!
//! Three kinds of failure exist:
//!
//! - **Constraint violations** are collected by an [`Enforcer`](crate::constraints::Enforcer)
//!   and surface once, as [`GeneticError::Constraint`], listing every violated clause.
//! - **Absurd operations** (such as reading the value of a placeholder gene) are programming
//!   errors and panic immediately through [`absurd`].
//! - **User errors** returned by a fitness function are passed through untouched.
//!
//! ## Examples
//!
//! ```rust
//! use genforge::error::{GeneticError, Result};
//!
//! fn some_function() -> Result<()> {
//!     Ok(())
//! }
//!
//! match some_function() {
//!     Ok(_) => println!("Success!"),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genforge::error::{GeneticError, OptionExt};
//!
//! fn find_best_candidate(candidates: &[i32]) -> genforge::error::Result<i32> {
//!     candidates.iter().max().cloned().ok_or_else_genetic(||
//!         GeneticError::Selection("no candidates".to_string())
//!     )
//! }
//! ```

use thiserror::Error;

use crate::constraints::ConstraintViolations;

/// Represents errors that can occur in the genetic algorithm library.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// One or more constraints were violated inside a single enforcement block.
    #[error("Constraint error: {0}")]
    Constraint(ConstraintViolations),

    /// Error that occurs when a selection operator cannot run.
    #[error("Selection error: {0}")]
    Selection(String),

    /// Error that occurs when a crossover or mutation cannot be applied.
    #[error("Alteration error: {0}")]
    Alteration(String),

    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an evolution process fails.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// Error that occurs when a fitness calculation fails.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when NaN values are encountered where a real number is required.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// Error that occurs when a maximum number of attempts is reached.
    #[error("Maximum attempts reached: {0}")]
    MaxAttemptsReached(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

impl GeneticError {
    /// Returns the aggregated violations if this is a constraint error.
    pub fn violations(&self) -> Option<&ConstraintViolations> {
        match self {
            GeneticError::Constraint(violations) => Some(violations),
            _ => None,
        }
    }
}

/// A specialized Result type for genetic algorithm operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the error type
/// fixed to `GeneticError`.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an Option to a Result using a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

/// Signals an operation that must never happen.
///
/// This is not a validation failure: it marks a programming error and panics unconditionally.
#[track_caller]
pub fn absurd(message: &str) -> ! {
    panic!("absurd operation: {}", message)
}
