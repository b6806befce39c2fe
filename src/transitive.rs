//! Breadth-first zero-or-more closure over a single predicate.

use std::collections::BTreeSet;

use ahash::AHashSet;
use tracing::trace;

use crate::{
    errors::ObjectGraphError,
    pattern::{PatternTerm, TriplePattern},
    store::TripleStore,
    term::{Direction, Position, Term},
};

/// Every term reachable from `start` through zero or more `predicate` hops in
/// `direction`. `start` is always part of the result.
///
/// One batched `triples_choices` call is issued per frontier. Cycles terminate
/// because a term enters the result at most once. Passing `seen` seeds the
/// result for incremental reuse: frontier members already in `seen` are not
/// re-queried, but `start` itself always is.
pub fn transitive_lookup<S>(
    store: &S,
    start: &Term,
    predicate: &Term,
    context: Option<&Term>,
    direction: Direction,
    seen: Option<BTreeSet<Term>>,
) -> Result<BTreeSet<Term>, ObjectGraphError>
where
    S: TripleStore + ?Sized,
{
    let mut result: AHashSet<Term> = seen.map(|s| s.into_iter().collect()).unwrap_or_default();
    let mut frontier: AHashSet<Term> = AHashSet::new();
    frontier.insert(start.clone());
    let (query_position, other_position) = match direction {
        Direction::Down => (Position::Subject, Position::Object),
        Direction::Up => (Position::Object, Position::Subject),
    };
    while !frontier.is_empty() {
        let mut pattern = TriplePattern::new(
            PatternTerm::Any,
            predicate.clone(),
            PatternTerm::Any,
        );
        pattern.set(
            query_position,
            PatternTerm::choices(frontier.iter().cloned()),
        );
        trace!(%pattern, frontier = frontier.len(), "transitive_lookup step");
        let mut next = AHashSet::new();
        for triple in store.triples_choices(&pattern, context)? {
            let other = triple.get(other_position);
            if !result.contains(other) && !frontier.contains(other) {
                next.insert(other.clone());
            }
        }
        result.extend(frontier.drain());
        frontier = next;
    }
    Ok(result.into_iter().collect())
}

/// Union of the closures of several start terms.
pub fn transitive_lookup_all<'a, S, I>(
    store: &S,
    starts: I,
    predicate: &Term,
    context: Option<&Term>,
    direction: Direction,
) -> Result<BTreeSet<Term>, ObjectGraphError>
where
    S: TripleStore + ?Sized,
    I: IntoIterator<Item = &'a Term>,
{
    let mut acc = BTreeSet::new();
    for start in starts {
        if acc.contains(start) {
            continue;
        }
        let closure = transitive_lookup(store, start, predicate, context, direction, None)?;
        acc.extend(closure);
    }
    Ok(acc)
}
