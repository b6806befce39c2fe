//! Store-level values: terms, triples and the two traversal axes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque store value. Ordering is by variant first, then by value, so
/// mixed-kind sets still sort deterministically.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Term {
    Iri(String),
    Blank(String),
    Text(String),
    Integer(i64),
    Boolean(bool),
}

impl Term {
    pub fn iri(value: impl Into<String>) -> Self {
        Term::Iri(value.into())
    }

    pub fn blank(value: impl Into<String>) -> Self {
        Term::Blank(value.into())
    }

    pub fn text(value: impl Into<String>) -> Self {
        Term::Text(value.into())
    }

    pub fn integer(value: i64) -> Self {
        Term::Integer(value)
    }

    /// Short name of the variant. Two terms with the same kind are comparable
    /// in a range constraint.
    pub fn kind(&self) -> &'static str {
        match self {
            Term::Iri(_) => "iri",
            Term::Blank(_) => "blank",
            Term::Text(_) => "text",
            Term::Integer(_) => "integer",
            Term::Boolean(_) => "boolean",
        }
    }

    pub fn same_kind(&self, other: &Term) -> bool {
        self.kind() == other.kind()
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Text(_) | Term::Integer(_) | Term::Boolean(_))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::Blank(id) => write!(f, "_:{id}"),
            Term::Text(text) => write!(f, "{text:?}"),
            Term::Integer(value) => write!(f, "{value}"),
            Term::Boolean(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::Integer(value)
    }
}

impl From<bool> for Term {
    fn from(value: bool) -> Self {
        Term::Boolean(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    pub fn get(&self, position: Position) -> &Term {
        match position {
            Position::Subject => &self.subject,
            Position::Predicate => &self.predicate,
            Position::Object => &self.object,
        }
    }

    /// Copy of this triple with `position` replaced by `term`.
    pub fn with(&self, position: Position, term: Term) -> Self {
        let mut out = self.clone();
        match position {
            Position::Subject => out.subject = term,
            Position::Predicate => out.predicate = term,
            Position::Object => out.object = term,
        }
        out
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// Renders triples as a basic graph pattern, one statement per line.
pub fn triples_to_bgp<'a>(triples: impl IntoIterator<Item = &'a Triple>) -> String {
    let mut out = String::new();
    for triple in triples {
        out.push_str(&triple.to_string());
        out.push('\n');
    }
    out
}

/// `Down` follows subject to object, `Up` follows object to subject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Down,
    Up,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Subject,
    Predicate,
    Object,
}

impl Position {
    /// The other end of a statement; the predicate has none.
    pub fn other_end(self) -> Option<Position> {
        match self {
            Position::Subject => Some(Position::Object),
            Position::Object => Some(Position::Subject),
            Position::Predicate => None,
        }
    }
}
