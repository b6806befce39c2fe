use std::fmt;

use tracing::trace;

use crate::{
    graph::{NodeId, NodeKind, ObjectGraph, PropertyId, Variable},
    range::InRange,
    term::{Direction, Position, Term},
};

/// The known end of a [`Hop`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HopEnd {
    Term(Term),
    Variable(Variable),
    Range(InRange),
}

impl fmt::Display for HopEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HopEnd::Term(term) => write!(f, "{term}"),
            HopEnd::Variable(var) => write!(f, "{var}"),
            HopEnd::Range(range) => write!(f, "{range}"),
        }
    }
}

/// One statement of a query path.
///
/// `unknown` is the position held by `target`, the node being solved for;
/// the opposite end is `other`, which lies one step closer to an anchor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Hop {
    pub predicate: Term,
    pub other: HopEnd,
    pub unknown: Position,
    pub target: NodeId,
}

impl Hop {
    /// Position of `other`.
    pub fn other_position(&self) -> Position {
        match self.unknown {
            Position::Subject => Position::Object,
            _ => Position::Subject,
        }
    }
}

impl fmt::Display for Hop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unknown = format!("[n{}]", self.target.index());
        match self.unknown {
            Position::Subject => write!(f, "{unknown} {} {}", self.predicate, self.other),
            _ => write!(f, "{} {} {unknown}", self.other, self.predicate),
        }
    }
}

/// Hops from the start node (first) out to an anchor (last).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryPath(pub Vec<Hop>);

impl QueryPath {
    pub fn hops(&self) -> &[Hop] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for QueryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, hop) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, " / ")?;
            }
            write!(f, "{hop}")?;
        }
        Ok(())
    }
}

/// Every simple path from `start` to an anchor, in discovery order.
///
/// Walks owner edges before owned edges. The visited list is a stack: a node
/// may appear again on a sibling branch but never twice on one lineage. A
/// start node that is itself an anchor yields no paths.
pub fn prepare(graph: &ObjectGraph, start: NodeId) -> Vec<QueryPath> {
    let mut preparer = Preparer {
        graph,
        lineage: Vec::new(),
        hops: Vec::new(),
        paths: Vec::new(),
    };
    preparer.visit(start);
    preparer.paths
}

struct Preparer<'a> {
    graph: &'a ObjectGraph,
    lineage: Vec<NodeId>,
    hops: Vec<Hop>,
    paths: Vec<QueryPath>,
}

impl Preparer<'_> {
    fn visit(&mut self, node: NodeId) {
        if self.graph.is_anchor(node) {
            if !self.hops.is_empty() {
                self.paths.push(QueryPath(self.hops.clone()));
            }
            return;
        }
        if self.lineage.contains(&node) {
            return;
        }
        self.lineage.push(node);
        let graph = self.graph;
        self.follow(node, graph.owner_properties(node), Direction::Up);
        self.follow(node, graph.properties(node), Direction::Down);
        self.lineage.pop();
    }

    fn follow(&mut self, node: NodeId, edges: &[PropertyId], direction: Direction) {
        let graph = self.graph;
        for &edge in edges {
            let others = match direction {
                Direction::Up => vec![graph.owner(edge)],
                Direction::Down => graph.values(edge).to_vec(),
            };
            for other in others {
                // Ranges only constrain objects.
                if direction == Direction::Up && graph.is_range(other) {
                    continue;
                }
                let Some(end) = hop_end(graph, other) else {
                    continue;
                };
                let unknown = match direction {
                    Direction::Up => Position::Object,
                    Direction::Down => Position::Subject,
                };
                let hop = Hop {
                    predicate: graph.link(edge).clone(),
                    other: end,
                    unknown,
                    target: node,
                };
                trace!(%hop, "prepare: descending");
                self.hops.push(hop);
                self.visit(other);
                self.hops.pop();
            }
        }
    }
}

fn hop_end(graph: &ObjectGraph, node: NodeId) -> Option<HopEnd> {
    match graph.kind(node) {
        NodeKind::Defined(term) => Some(HopEnd::Term(term.clone())),
        NodeKind::Undefined(var) => Some(HopEnd::Variable(*var)),
        NodeKind::Range(range) if range.is_defined() => Some(HopEnd::Range(range.clone())),
        // An unbounded range constrains nothing.
        NodeKind::Range(_) => None,
    }
}
