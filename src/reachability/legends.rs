use std::collections::BTreeSet;

use ahash::{AHashMap, AHashSet};

use crate::{
    errors::ObjectGraphError,
    graph::{NodeId, ObjectGraph},
    pattern::{PatternTerm, TriplePattern},
    store::TripleStore,
};

/// Nodes below `start` that something besides the `start` subtree still
/// refers to. The mark phase of deleting `start`.
///
/// A node's reference count is the number of property edges pointing at it,
/// or the store's `(?, ?, node)` statements when `store` is given. Each time
/// the walk reaches the node through a counted edge the count drops by one; a
/// node with references left over is a legend. In store mode an edge from an
/// undefined owner has no row, so following it spends nothing.
pub fn legends(
    graph: &ObjectGraph,
    start: NodeId,
    store: Option<&dyn TripleStore>,
) -> Result<BTreeSet<NodeId>, ObjectGraphError> {
    let mut finder = LegendFinder {
        graph,
        start,
        store,
        remaining: AHashMap::new(),
        seen: AHashSet::new(),
    };
    finder.walk(start)?;
    Ok(finder
        .remaining
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(node, _)| node)
        .collect())
}

struct LegendFinder<'a> {
    graph: &'a ObjectGraph,
    start: NodeId,
    store: Option<&'a dyn TripleStore>,
    remaining: AHashMap<NodeId, i64>,
    seen: AHashSet<NodeId>,
}

impl LegendFinder<'_> {
    fn walk(&mut self, node: NodeId) -> Result<(), ObjectGraphError> {
        let mut pending = vec![node];
        while let Some(node) = pending.pop() {
            if !self.seen.insert(node) {
                continue;
            }
            let graph = self.graph;
            let mut below = Vec::new();
            for &prop in graph.properties(node) {
                for &value in graph.values(prop) {
                    if value == self.start {
                        continue;
                    }
                    let count = self.count(value)?;
                    let spent = i64::from(self.counted(node));
                    self.remaining.insert(value, count - spent);
                    below.push(value);
                }
            }
            pending.extend(below.into_iter().rev());
        }
        Ok(())
    }

    fn count(&self, node: NodeId) -> Result<i64, ObjectGraphError> {
        if let Some(count) = self.remaining.get(&node) {
            return Ok(*count);
        }
        let graph = self.graph;
        let count = match self.store {
            Some(store) => match graph.identifier(node) {
                Some(identifier) => {
                    let pattern =
                        TriplePattern::new(PatternTerm::Any, PatternTerm::Any, identifier.clone());
                    store.count(&pattern, None)?
                }
                None => 0,
            },
            None => graph.owner_properties(node).len(),
        };
        Ok(count as i64)
    }

    /// Whether an edge owned by `owner` is part of the reference count. Store
    /// rows only exist for defined owners; the object graph counts every edge.
    fn counted(&self, owner: NodeId) -> bool {
        self.store.is_none() || self.graph.is_defined(owner)
    }
}
