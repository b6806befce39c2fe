use std::collections::BTreeSet;

use ahash::AHashSet;

use crate::{
    errors::ObjectGraphError,
    graph::{NodeId, ObjectGraph},
    pattern::{PatternTerm, TriplePattern},
    reachability::legends,
    store::TripleStore,
    term::Triple,
};

/// Statements that may be deleted together with `start`: the direct
/// statements of `start` and of every node below it that is not a legend.
/// The walk does not descend through legends.
pub fn heroes(
    graph: &ObjectGraph,
    start: NodeId,
    store: Option<&dyn TripleStore>,
) -> Result<BTreeSet<Triple>, ObjectGraphError> {
    let legends = legends(graph, start, store)?;
    heroes_with_legends(graph, start, store, &legends)
}

/// [`heroes`] with a legend set computed beforehand.
pub fn heroes_with_legends(
    graph: &ObjectGraph,
    start: NodeId,
    store: Option<&dyn TripleStore>,
    legends: &BTreeSet<NodeId>,
) -> Result<BTreeSet<Triple>, ObjectGraphError> {
    let mut results = BTreeSet::new();
    let mut seen = AHashSet::new();
    let mut heroes = AHashSet::new();
    let mut pending = vec![start];
    while let Some(node) = pending.pop() {
        if !seen.insert(node) {
            continue;
        }
        for &prop in graph.properties(node) {
            for &value in graph.values(prop) {
                if legends.contains(&value) {
                    continue;
                }
                pending.push(value);
                if heroes.insert(value) {
                    direct_triples(graph, value, store, &mut results)?;
                }
            }
        }
    }
    if heroes.insert(start) {
        direct_triples(graph, start, store, &mut results)?;
    }
    Ok(results)
}

fn direct_triples(
    graph: &ObjectGraph,
    node: NodeId,
    store: Option<&dyn TripleStore>,
    out: &mut BTreeSet<Triple>,
) -> Result<(), ObjectGraphError> {
    let Some(subject) = graph.identifier(node) else {
        return Ok(());
    };
    if let Some(store) = store {
        let pattern = TriplePattern::new(subject.clone(), PatternTerm::Any, PatternTerm::Any);
        out.extend(store.triples(&pattern, None)?);
        return Ok(());
    }
    for &prop in graph.properties(node) {
        for &value in graph.values(prop) {
            if let Some(object) = graph.identifier(value) {
                out.insert(Triple::new(
                    subject.clone(),
                    graph.link(prop).clone(),
                    object.clone(),
                ));
            }
        }
    }
    Ok(())
}
