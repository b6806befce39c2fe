//! Triple patterns accepted by [`crate::store::TripleStore`].

use std::fmt;

use crate::{
    range::InRange,
    term::{Position, Term, Triple},
};

/// One position of a [`TriplePattern`].
///
/// `Choices` means "match any of"; an empty list matches nothing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PatternTerm {
    Any,
    Exact(Term),
    Choices(Vec<Term>),
    Range(InRange),
}

impl PatternTerm {
    pub fn choices<I: IntoIterator<Item = Term>>(terms: I) -> Self {
        let mut list: Vec<Term> = terms.into_iter().collect();
        list.sort();
        list.dedup();
        PatternTerm::Choices(list)
    }

    pub fn matches(&self, term: &Term) -> bool {
        match self {
            PatternTerm::Any => true,
            PatternTerm::Exact(expected) => expected == term,
            PatternTerm::Choices(list) => list.contains(term),
            PatternTerm::Range(range) => range.contains(term),
        }
    }

    pub fn is_choices(&self) -> bool {
        matches!(self, PatternTerm::Choices(_))
    }

    pub fn as_exact(&self) -> Option<&Term> {
        match self {
            PatternTerm::Exact(term) => Some(term),
            _ => None,
        }
    }

    /// True when `term` is the exact value or one of the choices.
    pub fn mentions(&self, term: &Term) -> bool {
        match self {
            PatternTerm::Exact(expected) => expected == term,
            PatternTerm::Choices(list) => list.contains(term),
            _ => false,
        }
    }
}

impl From<Term> for PatternTerm {
    fn from(term: Term) -> Self {
        PatternTerm::Exact(term)
    }
}

impl From<Option<Term>> for PatternTerm {
    fn from(term: Option<Term>) -> Self {
        term.map_or(PatternTerm::Any, PatternTerm::Exact)
    }
}

impl From<InRange> for PatternTerm {
    fn from(range: InRange) -> Self {
        PatternTerm::Range(range)
    }
}

impl fmt::Display for PatternTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternTerm::Any => write!(f, "?"),
            PatternTerm::Exact(term) => write!(f, "{term}"),
            PatternTerm::Choices(list) => {
                write!(f, "[")?;
                for (idx, term) in list.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{term}")?;
                }
                write!(f, "]")
            }
            PatternTerm::Range(range) => write!(f, "{range}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    pub subject: PatternTerm,
    pub predicate: PatternTerm,
    pub object: PatternTerm,
}

impl TriplePattern {
    pub fn new(
        subject: impl Into<PatternTerm>,
        predicate: impl Into<PatternTerm>,
        object: impl Into<PatternTerm>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    pub fn any() -> Self {
        Self::new(PatternTerm::Any, PatternTerm::Any, PatternTerm::Any)
    }

    /// Pattern matching exactly `triple`.
    pub fn exact(triple: &Triple) -> Self {
        Self::new(
            triple.subject.clone(),
            triple.predicate.clone(),
            triple.object.clone(),
        )
    }

    pub fn get(&self, position: Position) -> &PatternTerm {
        match position {
            Position::Subject => &self.subject,
            Position::Predicate => &self.predicate,
            Position::Object => &self.object,
        }
    }

    pub fn set(&mut self, position: Position, term: PatternTerm) {
        match position {
            Position::Subject => self.subject = term,
            Position::Predicate => self.predicate = term,
            Position::Object => self.object = term,
        }
    }

    pub fn with(&self, position: Position, term: PatternTerm) -> Self {
        let mut out = self.clone();
        out.set(position, term);
        out
    }

    pub fn matches(&self, triple: &Triple) -> bool {
        self.subject.matches(&triple.subject)
            && self.predicate.matches(&triple.predicate)
            && self.object.matches(&triple.object)
    }

    pub fn has_choices(&self) -> bool {
        self.subject.is_choices() || self.predicate.is_choices() || self.object.is_choices()
    }

    /// True when some position is an empty choice list.
    pub fn matches_nothing(&self) -> bool {
        [&self.subject, &self.predicate, &self.object]
            .into_iter()
            .any(|term| matches!(term, PatternTerm::Choices(list) if list.is_empty()))
    }
}

impl fmt::Display for TriplePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.subject, self.predicate, self.object)
    }
}
