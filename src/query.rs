//! Star-query resolution over an [`ObjectGraph`].
//!
//! [`prepare`] lists every path from the query node to an anchor,
//! [`merge_paths`] folds them into a [`PathTrie`] and [`Querier`] executes the
//! trie against a layered store, intersecting sibling hops.

mod merge;
mod preparer;
mod resolver;
mod scorer;

pub use merge::{PathTrie, merge_paths};
pub use preparer::{Hop, HopEnd, QueryPath, prepare};
pub use resolver::{Querier, check_defined, resolve};
pub use scorer::{HopScorer, TypeLastScorer};

use std::collections::BTreeSet;

use tracing::debug;

use crate::{
    errors::ObjectGraphError,
    graph::{NodeId, ObjectGraph},
    layers::{LayerStack, ZeroOrMoreLayer, subclass_of_matcher_for},
    store::TripleStore,
    term::Term,
};

/// Identifiers matching `start` whose type is `target_type` or any of its
/// sub-classes.
pub fn load_terms<S: TripleStore>(
    store: S,
    graph: &ObjectGraph,
    start: NodeId,
    target_type: &Term,
) -> Result<BTreeSet<Term>, ObjectGraphError> {
    debug!(start = start.index(), %target_type, "load_terms");
    let layered = LayerStack::new(store)
        .with(ZeroOrMoreLayer::new(subclass_of_matcher_for(target_type.clone())));
    Querier::new(graph, layered)
        .with_scorer(TypeLastScorer)
        .resolve(start)
}
