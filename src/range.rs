use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{errors::ObjectGraphError, term::Term};

/// An open interval used in the object position of a query in place of a
/// literal. Both bounds are exclusive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InRange {
    min: Option<Term>,
    max: Option<Term>,
}

impl InRange {
    /// Fails when both bounds are given but are of different kinds.
    pub fn new(min: Option<Term>, max: Option<Term>) -> Result<Self, ObjectGraphError> {
        if let (Some(lo), Some(hi)) = (&min, &max) {
            if !lo.same_kind(hi) {
                return Err(ObjectGraphError::configuration(format!(
                    "range bounds must share a kind (got {} and {})",
                    lo.kind(),
                    hi.kind()
                )));
            }
        }
        Ok(Self { min, max })
    }

    pub fn less_than(max: Term) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn greater_than(min: Term) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// A range with no bounds matches any value and is not an anchor.
    pub fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    pub fn min(&self) -> Option<&Term> {
        self.min.as_ref()
    }

    pub fn max(&self) -> Option<&Term> {
        self.max.as_ref()
    }

    pub fn is_defined(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Strict comparison against each bound. A value of a different kind than
    /// the bounds is never contained.
    pub fn contains(&self, value: &Term) -> bool {
        if let Some(max) = &self.max {
            if !max.same_kind(value) || value >= max {
                return false;
            }
        }
        if let Some(min) = &self.min {
            if !min.same_kind(value) || value <= min {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for InRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.min, &self.max) {
            (Some(lo), Some(hi)) => write!(f, "({lo}, {hi})"),
            (Some(lo), None) => write!(f, "({lo}, ..)"),
            (None, Some(hi)) => write!(f, "(.., {hi})"),
            (None, None) => write!(f, "(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_bounds_fail_at_construction() {
        let err = InRange::new(Some(Term::integer(1)), Some(Term::text("z"))).unwrap_err();
        assert!(matches!(err, ObjectGraphError::Configuration(_)));
    }

    #[test]
    fn bounds_are_exclusive() {
        let range = InRange::new(Some(Term::integer(10)), Some(Term::integer(20))).unwrap();
        let inside: Vec<i64> = [5, 10, 15, 20]
            .into_iter()
            .filter(|v| range.contains(&Term::integer(*v)))
            .collect();
        assert_eq!(inside, vec![15]);
    }

    #[test]
    fn one_sided_ranges() {
        assert!(InRange::less_than(Term::integer(3)).contains(&Term::integer(2)));
        assert!(!InRange::less_than(Term::integer(3)).contains(&Term::integer(3)));
        assert!(InRange::greater_than(Term::text("b")).contains(&Term::text("c")));
        assert!(!InRange::greater_than(Term::text("b")).contains(&Term::integer(9)));
    }

    #[test]
    fn unbounded_is_not_defined() {
        assert!(!InRange::unbounded().is_defined());
        assert!(InRange::unbounded().contains(&Term::integer(0)));
    }
}
