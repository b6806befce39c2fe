use std::collections::BTreeSet;

use ahash::AHashSet;

use crate::graph::{NodeId, ObjectGraph, Statement};

/// One statement waiting to be reported, and the node it leads to.
struct Step {
    statement: Statement,
    next: NodeId,
}

/// Lazy depth-first walk over the connected component of a node, following
/// owner edges before owned edges.
///
/// Single pass: once drained it yields nothing more; build a new one to walk
/// again. Each node is expanded at most once, so cyclic graphs terminate.
/// With `traverse_undefined == false` only defined nodes are entered and
/// reported, which makes every statement convertible to a store triple.
pub struct ComponentTriples<'a> {
    graph: &'a ObjectGraph,
    traverse_undefined: bool,
    seen: AHashSet<NodeId>,
    stack: Vec<std::vec::IntoIter<Step>>,
}

impl<'a> ComponentTriples<'a> {
    pub fn new(graph: &'a ObjectGraph, start: NodeId, traverse_undefined: bool) -> Self {
        let mut walk = Self {
            graph,
            traverse_undefined,
            seen: AHashSet::new(),
            stack: Vec::new(),
        };
        walk.enter(start);
        walk
    }

    fn admits(&self, node: NodeId) -> bool {
        self.traverse_undefined || self.graph.is_defined(node)
    }

    fn enter(&mut self, node: NodeId) {
        if !self.seen.insert(node) || !self.admits(node) {
            return;
        }
        let graph = self.graph;
        let mut steps = Vec::new();
        for &prop in graph.owner_properties(node) {
            let owner = graph.owner(prop);
            if self.admits(owner) {
                steps.push(Step {
                    statement: Statement {
                        subject: graph.token(owner),
                        predicate: graph.link(prop).clone(),
                        object: graph.token(node),
                    },
                    next: owner,
                });
            }
        }
        for &prop in graph.properties(node) {
            for &value in graph.values(prop) {
                if self.admits(value) {
                    steps.push(Step {
                        statement: Statement {
                            subject: graph.token(node),
                            predicate: graph.link(prop).clone(),
                            object: graph.token(value),
                        },
                        next: value,
                    });
                }
            }
        }
        self.stack.push(steps.into_iter());
    }
}

impl Iterator for ComponentTriples<'_> {
    type Item = Statement;

    fn next(&mut self) -> Option<Statement> {
        loop {
            let frame = self.stack.last_mut()?;
            match frame.next() {
                Some(step) => {
                    self.enter(step.next);
                    return Some(step.statement);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Every statement in the component of `start`.
pub fn component(graph: &ObjectGraph, start: NodeId, traverse_undefined: bool) -> BTreeSet<Statement> {
    ComponentTriples::new(graph, start, traverse_undefined).collect()
}
