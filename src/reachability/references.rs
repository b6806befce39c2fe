use std::collections::BTreeSet;

use crate::{
    errors::ObjectGraphError,
    graph::{NodeId, ObjectGraph},
    pattern::{PatternTerm, TriplePattern},
    store::TripleStore,
    term::Triple,
};

/// One-hop statements touching `start` in either direction.
///
/// An undefined `start` has no store statements, so the result is empty.
pub fn references(
    graph: &ObjectGraph,
    start: NodeId,
    store: Option<&dyn TripleStore>,
) -> Result<BTreeSet<Triple>, ObjectGraphError> {
    let Some(identifier) = graph.identifier(start) else {
        return Ok(BTreeSet::new());
    };
    let mut results = BTreeSet::new();
    if let Some(store) = store {
        let incoming = TriplePattern::new(PatternTerm::Any, PatternTerm::Any, identifier.clone());
        let outgoing = TriplePattern::new(identifier.clone(), PatternTerm::Any, PatternTerm::Any);
        results.extend(store.triples(&incoming, None)?);
        results.extend(store.triples(&outgoing, None)?);
        return Ok(results);
    }
    for &prop in graph.properties(start) {
        for &value in graph.values(prop) {
            if let Some(object) = graph.identifier(value) {
                results.insert(Triple::new(
                    identifier.clone(),
                    graph.link(prop).clone(),
                    object.clone(),
                ));
            }
        }
    }
    for &prop in graph.owner_properties(start) {
        if let Some(subject) = graph.identifier(graph.owner(prop)) {
            results.insert(Triple::new(
                subject.clone(),
                graph.link(prop).clone(),
                identifier.clone(),
            ));
        }
    }
    Ok(results)
}
