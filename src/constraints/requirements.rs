//! Closed sets of requirements, one sum type per constrained domain.

use std::fmt::Debug;

use super::{ConstraintKind, Requirement};

/// Requirements on integer values.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntRequirement {
    BePositive,
    BeNonNegative,
    BeAtLeast(i64),
    /// Inclusive on both ends.
    BeInRange(i64, i64),
    BeEqualTo(i64),
}

impl IntRequirement {
    fn holds(&self, value: i128) -> bool {
        match *self {
            IntRequirement::BePositive => value > 0,
            IntRequirement::BeNonNegative => value >= 0,
            IntRequirement::BeAtLeast(min) => value >= min as i128,
            IntRequirement::BeInRange(lo, hi) => (lo as i128..=hi as i128).contains(&value),
            IntRequirement::BeEqualTo(expected) => value == expected as i128,
        }
    }

    fn description(&self) -> String {
        match *self {
            IntRequirement::BePositive => "be positive".to_string(),
            IntRequirement::BeNonNegative => "be non-negative".to_string(),
            IntRequirement::BeAtLeast(min) => format!("be at least {}", min),
            IntRequirement::BeInRange(lo, hi) => format!("be in range [{}, {}]", lo, hi),
            IntRequirement::BeEqualTo(expected) => format!("be equal to {}", expected),
        }
    }
}

impl Requirement<i64> for IntRequirement {
    fn validator(&self, value: &i64) -> bool {
        self.holds(*value as i128)
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Int
    }

    fn describe(&self) -> String {
        self.description()
    }

    fn describe_failure(&self, value: &i64) -> String {
        format!("expected {} to {}", value, self.description())
    }
}

impl Requirement<usize> for IntRequirement {
    fn validator(&self, value: &usize) -> bool {
        self.holds(*value as i128)
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Int
    }

    fn describe(&self) -> String {
        self.description()
    }

    fn describe_failure(&self, value: &usize) -> String {
        format!("expected {} to {}", value, self.description())
    }
}

/// Requirements on real values. NaN satisfies none of them.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DoubleRequirement {
    /// Inclusive on both ends.
    BeInRange(f64, f64),
    /// Shorthand for `BeInRange(0.0, 1.0)`, used by every rate and probability.
    BeInUnitInterval,
    BeFinite,
}

impl DoubleRequirement {
    fn description(&self) -> String {
        match *self {
            DoubleRequirement::BeInRange(lo, hi) => format!("be in range [{}, {}]", lo, hi),
            DoubleRequirement::BeInUnitInterval => "be in range [0, 1]".to_string(),
            DoubleRequirement::BeFinite => "be finite".to_string(),
        }
    }
}

impl Requirement<f64> for DoubleRequirement {
    fn validator(&self, value: &f64) -> bool {
        match *self {
            DoubleRequirement::BeInRange(lo, hi) => (lo..=hi).contains(value),
            DoubleRequirement::BeInUnitInterval => (0.0..=1.0).contains(value),
            DoubleRequirement::BeFinite => value.is_finite(),
        }
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Double
    }

    fn describe(&self) -> String {
        self.description()
    }

    fn describe_failure(&self, value: &f64) -> String {
        format!("expected {} to {}", value, self.description())
    }
}

/// Requirements on `(first, second)` pairs, typically range bounds.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRequirement {
    /// `first <= second`
    BeOrdered,
    /// `first < second`
    BeStrictlyOrdered,
}

impl<T> Requirement<(T, T)> for PairRequirement
where
    T: PartialOrd + Debug,
{
    fn validator(&self, value: &(T, T)) -> bool {
        match self {
            PairRequirement::BeOrdered => value.0 <= value.1,
            PairRequirement::BeStrictlyOrdered => value.0 < value.1,
        }
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Pair
    }

    fn describe(&self) -> String {
        match self {
            PairRequirement::BeOrdered => "be ordered".to_string(),
            PairRequirement::BeStrictlyOrdered => "be strictly ordered".to_string(),
        }
    }

    fn describe_failure(&self, value: &(T, T)) -> String {
        format!("expected ({:?}, {:?}) to {}", value.0, value.1, Requirement::<(T, T)>::describe(self))
    }
}

/// Requirements on the shape of a collection.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionRequirement {
    NotBeEmpty,
    HaveSize(usize),
    HaveAtLeast(usize),
    /// Zero or one element (broadcast), or exactly `n` elements.
    HaveSizeAtMostOneOr(usize),
}

impl CollectionRequirement {
    fn holds(&self, len: usize) -> bool {
        match *self {
            CollectionRequirement::NotBeEmpty => len > 0,
            CollectionRequirement::HaveSize(n) => len == n,
            CollectionRequirement::HaveAtLeast(n) => len >= n,
            CollectionRequirement::HaveSizeAtMostOneOr(n) => len <= 1 || len == n,
        }
    }
}

impl<T> Requirement<[T]> for CollectionRequirement {
    fn validator(&self, value: &[T]) -> bool {
        self.holds(value.len())
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Collection
    }

    fn describe(&self) -> String {
        match *self {
            CollectionRequirement::NotBeEmpty => "not be empty".to_string(),
            CollectionRequirement::HaveSize(n) => format!("have size {}", n),
            CollectionRequirement::HaveAtLeast(n) => format!("have at least {} elements", n),
            CollectionRequirement::HaveSizeAtMostOneOr(n) => {
                format!("have at most one element or exactly {}", n)
            }
        }
    }

    fn describe_failure(&self, value: &[T]) -> String {
        match self {
            CollectionRequirement::NotBeEmpty => "expected a non-empty collection".to_string(),
            _ => format!(
                "expected collection to {} but it has {}",
                Requirement::<[T]>::describe(self),
                value.len()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_requirements() {
        assert!(IntRequirement::BePositive.validator(&1_i64));
        assert!(!IntRequirement::BePositive.validator(&0_usize));
        assert!(IntRequirement::BeNonNegative.validator(&0_i64));
        assert!(IntRequirement::BeAtLeast(2).validator(&2_usize));
        assert!(IntRequirement::BeInRange(-3, 3).validator(&-3_i64));
        assert!(!IntRequirement::BeInRange(-3, 3).validator(&4_i64));
        assert!(IntRequirement::BeEqualTo(7).validator(&7_usize));
    }

    #[test]
    fn test_double_requirements() {
        assert!(DoubleRequirement::BeInUnitInterval.validator(&0.0));
        assert!(DoubleRequirement::BeInUnitInterval.validator(&1.0));
        assert!(!DoubleRequirement::BeInUnitInterval.validator(&1.0001));
        assert!(!DoubleRequirement::BeInUnitInterval.validator(&f64::NAN));
        assert!(DoubleRequirement::BeInRange(-1.0, 1.0).validator(&-1.0));
        assert!(!DoubleRequirement::BeFinite.validator(&f64::INFINITY));
    }

    #[test]
    fn test_pair_requirements() {
        assert!(PairRequirement::BeOrdered.validator(&(1, 1)));
        assert!(!PairRequirement::BeStrictlyOrdered.validator(&(1, 1)));
        assert!(PairRequirement::BeStrictlyOrdered.validator(&(0.5, 2.0)));
        let failure = PairRequirement::BeOrdered.describe_failure(&(3, 1));
        assert!(failure.contains("(3, 1)"));
    }

    #[test]
    fn test_collection_requirements() {
        let empty: [u8; 0] = [];
        assert!(!CollectionRequirement::NotBeEmpty.validator(empty.as_slice()));
        assert!(CollectionRequirement::HaveSize(2).validator([1, 2].as_slice()));
        assert!(CollectionRequirement::HaveAtLeast(2).validator([1, 2, 3].as_slice()));
        assert!(CollectionRequirement::HaveSizeAtMostOneOr(4).validator(empty.as_slice()));
        assert!(CollectionRequirement::HaveSizeAtMostOneOr(4).validator([1].as_slice()));
        assert!(CollectionRequirement::HaveSizeAtMostOneOr(4).validator([1, 2, 3, 4].as_slice()));
        assert!(!CollectionRequirement::HaveSizeAtMostOneOr(4).validator([1, 2].as_slice()));

        let failure = CollectionRequirement::HaveSize(5).describe_failure([1, 2].as_slice());
        assert!(failure.contains("has 2"));
    }

    #[test]
    fn test_negated_non_empty_message() {
        let violation = CollectionRequirement::NotBeEmpty
            .validate_not("genes", [1, 2].as_slice())
            .unwrap_err();
        assert_eq!(violation.message(), "expected value not to not be empty");
        assert!(CollectionRequirement::NotBeEmpty.validate_not("genes", [0_u8; 0].as_slice()).is_ok());
    }
}
