use std::fmt;

use crate::{
    range::InRange,
    term::{Term, Triple},
};

/// Stable arena handle for a node of an [`super::ObjectGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Stable arena handle for a property edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(pub(crate) usize);

impl PropertyId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Placeholder token of an unbound node. Never used as a join key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(pub u32);

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?v{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Defined(Term),
    Undefined(Variable),
    Range(InRange),
}

/// Identity token of a node: two nodes are equal iff their tokens are.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
    Term(Term),
    Variable(Variable),
    Range(InRange),
}

impl Token {
    pub fn as_term(&self) -> Option<&Term> {
        match self {
            Token::Term(term) => Some(term),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Term(term) => write!(f, "{term}"),
            Token::Variable(var) => write!(f, "{var}"),
            Token::Range(range) => write!(f, "{range}"),
        }
    }
}

/// A statement whose ends may be unbound.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Statement {
    pub subject: Token,
    pub predicate: Term,
    pub object: Token,
}

impl Statement {
    /// The store triple, when both ends are defined terms.
    pub fn to_triple(&self) -> Option<Triple> {
        Some(Triple::new(
            self.subject.as_term()?.clone(),
            self.predicate.clone(),
            self.object.as_term()?.clone(),
        ))
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) properties: Vec<PropertyId>,
    pub(crate) owner_properties: Vec<PropertyId>,
}

#[derive(Clone, Debug)]
pub(crate) struct PropertyData {
    pub(crate) link: Term,
    pub(crate) owner: NodeId,
    pub(crate) values: Vec<NodeId>,
}
