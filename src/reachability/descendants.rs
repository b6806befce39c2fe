use std::collections::BTreeSet;

use ahash::AHashSet;
use tracing::trace;

use crate::{
    errors::ObjectGraphError,
    graph::{NodeId, ObjectGraph, PropertyId},
    pattern::{PatternTerm, TriplePattern},
    store::TripleStore,
    term::{Term, Triple},
};

/// Lazy downward walk over defined nodes.
///
/// Each property edge is reported once even when several paths reach its
/// owner. Single pass, like [`super::ComponentTriples`].
pub struct DescendantTriples<'a> {
    graph: &'a ObjectGraph,
    transitive: bool,
    seen: AHashSet<NodeId>,
    seen_edges: AHashSet<PropertyId>,
    stack: Vec<std::vec::IntoIter<(Triple, NodeId)>>,
}

impl<'a> DescendantTriples<'a> {
    pub fn new(graph: &'a ObjectGraph, start: NodeId, transitive: bool) -> Self {
        let mut walk = Self {
            graph,
            transitive,
            seen: AHashSet::new(),
            seen_edges: AHashSet::new(),
            stack: Vec::new(),
        };
        walk.enter(start);
        walk
    }

    fn enter(&mut self, node: NodeId) {
        if !self.seen.insert(node) {
            return;
        }
        let graph = self.graph;
        let Some(subject) = graph.identifier(node) else {
            return;
        };
        let mut steps = Vec::new();
        for &prop in graph.properties(node) {
            if !self.seen_edges.insert(prop) {
                continue;
            }
            for &value in graph.values(prop) {
                if let Some(object) = graph.identifier(value) {
                    let triple = Triple::new(subject.clone(), graph.link(prop).clone(), object.clone());
                    steps.push((triple, value));
                }
            }
        }
        self.stack.push(steps.into_iter());
    }
}

impl Iterator for DescendantTriples<'_> {
    type Item = Triple;

    fn next(&mut self) -> Option<Triple> {
        loop {
            let frame = self.stack.last_mut()?;
            match frame.next() {
                Some((triple, value)) => {
                    if self.transitive {
                        self.enter(value);
                    }
                    return Some(triple);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Statements below `start`, read from the object graph or, when `store` is
/// given, from the store starting at `start`'s identifier.
pub fn descendants(
    graph: &ObjectGraph,
    start: NodeId,
    transitive: bool,
    store: Option<&dyn TripleStore>,
) -> Result<BTreeSet<Triple>, ObjectGraphError> {
    match store {
        None => Ok(DescendantTriples::new(graph, start, transitive).collect()),
        Some(store) => {
            let Some(identifier) = graph.identifier(start) else {
                return Ok(BTreeSet::new());
            };
            store_descendants(store, identifier, transitive)
        }
    }
}

fn store_descendants(
    store: &dyn TripleStore,
    start: &Term,
    transitive: bool,
) -> Result<BTreeSet<Triple>, ObjectGraphError> {
    let mut results = BTreeSet::new();
    let mut seen: AHashSet<Term> = AHashSet::new();
    let mut pending = vec![start.clone()];
    while let Some(subject) = pending.pop() {
        if !seen.insert(subject.clone()) {
            continue;
        }
        let pattern = TriplePattern::new(subject, PatternTerm::Any, PatternTerm::Any);
        trace!(%pattern, "descendants: store query");
        for triple in store.triples(&pattern, None)? {
            if transitive && !triple.object.is_literal() && !seen.contains(&triple.object) {
                pending.push(triple.object.clone());
            }
            results.insert(triple);
        }
    }
    Ok(results)
}
