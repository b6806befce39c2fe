use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::{
    errors::ObjectGraphError,
    graph::{NodeId, ObjectGraph},
    layers::{LayerStack, default_layers},
    pattern::{PatternTerm, TriplePattern},
    query::{
        merge::{PathTrie, merge_paths},
        preparer::{Hop, HopEnd, prepare},
        scorer::{HopScorer, TypeLastScorer},
    },
    reachability::ComponentTriples,
    store::TripleStore,
    term::Term,
};

/// Resolves star-shaped queries over one [`ObjectGraph`] against a store.
///
/// The store is wrapped in the default layers, so range constraints work
/// whether or not the store evaluates them natively.
pub struct Querier<'a, S> {
    graph: &'a ObjectGraph,
    store: LayerStack<S>,
    scorer: Box<dyn HopScorer + 'a>,
}

impl<'a, S: TripleStore> Querier<'a, S> {
    pub fn new(graph: &'a ObjectGraph, store: S) -> Self {
        Self {
            graph,
            store: default_layers(store),
            scorer: Box::new(TypeLastScorer),
        }
    }

    pub fn with_scorer<H: HopScorer + 'a>(mut self, scorer: H) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    /// Identifiers the store binds to `node`.
    ///
    /// A defined `node` is validated instead of searched: the result is its
    /// own identifier when every statement of its defined component is in the
    /// store, and empty otherwise. No anchor, or a hop without matches, gives
    /// an empty set.
    pub fn resolve(&self, node: NodeId) -> Result<BTreeSet<Term>, ObjectGraphError> {
        if let Some(identifier) = self.graph.identifier(node) {
            debug!(%identifier, "resolve: query object already defined");
            return if self.check(node)? {
                Ok(BTreeSet::from([identifier.clone()]))
            } else {
                debug!(%identifier, "resolve: object graph disagrees with store");
                Ok(BTreeSet::new())
            };
        }
        let paths = prepare(self.graph, node);
        if paths.is_empty() {
            debug!(node = node.index(), "resolve: no anchor reachable");
            return Ok(BTreeSet::new());
        }
        let trie = merge_paths(&paths);
        debug!(paths = paths.len(), "resolve: merged paths\n{trie}");
        self.resolve_trie(&trie)
    }

    /// Existence check for a defined node's component.
    pub fn check(&self, node: NodeId) -> Result<bool, ObjectGraphError> {
        for statement in ComponentTriples::new(self.graph, node, false) {
            let Some(triple) = statement.to_triple() else {
                continue;
            };
            if !self.store.contains(&triple, None)? {
                debug!(%triple, "check: missing statement");
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn resolve_trie(&self, trie: &PathTrie) -> Result<BTreeSet<Term>, ObjectGraphError> {
        let mut hops: Vec<&(Hop, PathTrie)> = trie.children().iter().collect();
        hops.sort_by_key(|(hop, _)| self.scorer.score(hop));

        let mut join_args: Vec<BTreeSet<Term>> = Vec::with_capacity(hops.len());
        for (hop, sub) in hops {
            let bound = self.resolve_hop(hop, sub, join_args.last())?;
            trace!(%hop, matches = bound.len(), "resolve: hop done");
            if bound.is_empty() {
                return Ok(BTreeSet::new());
            }
            join_args.push(bound);
        }
        Ok(intersect(join_args))
    }

    /// Bindings for `hop.target` along one hop. An anchored hop is narrowed
    /// by the previous sibling's bindings when there are any.
    fn resolve_hop(
        &self,
        hop: &Hop,
        sub: &PathTrie,
        previous: Option<&BTreeSet<Term>>,
    ) -> Result<BTreeSet<Term>, ObjectGraphError> {
        let known = match &hop.other {
            HopEnd::Variable(_) => {
                let below = self.resolve_trie(sub)?;
                if below.is_empty() {
                    return Ok(BTreeSet::new());
                }
                PatternTerm::choices(below)
            }
            HopEnd::Term(term) => PatternTerm::Exact(term.clone()),
            HopEnd::Range(range) => PatternTerm::Range(range.clone()),
        };
        let mut pattern =
            TriplePattern::new(PatternTerm::Any, hop.predicate.clone(), PatternTerm::Any);
        pattern.set(hop.other_position(), known);

        let narrowed = match (&hop.other, previous) {
            (HopEnd::Variable(_), _) | (_, None) => None,
            (_, Some(previous)) => Some(PatternTerm::choices(previous.iter().cloned())),
        };
        let rows = match narrowed {
            Some(choices) => {
                pattern.set(hop.unknown, choices);
                trace!(%pattern, "resolve: narrowed query");
                self.store.triples_choices(&pattern, None)?
            }
            None if pattern.has_choices() => {
                trace!(%pattern, "resolve: choices query");
                self.store.triples_choices(&pattern, None)?
            }
            None => {
                trace!(%pattern, "resolve: query");
                self.store.triples(&pattern, None)?
            }
        };
        Ok(rows
            .into_iter()
            .map(|row| row.get(hop.unknown).clone())
            .collect())
    }
}

/// Conjunction of sibling results, smallest first.
fn intersect(mut sets: Vec<BTreeSet<Term>>) -> BTreeSet<Term> {
    if sets.len() <= 1 {
        return sets.pop().unwrap_or_default();
    }
    sets.sort_by_key(BTreeSet::len);
    let mut iter = sets.into_iter();
    let mut acc = iter.next().unwrap_or_default();
    for other in iter {
        acc.retain(|term| other.contains(term));
        if acc.is_empty() {
            break;
        }
    }
    debug!(size = acc.len(), "resolve: joined");
    acc
}

/// Resolves `node` against `store` with the given scorer, or the type-last
/// default.
pub fn resolve<S: TripleStore>(
    graph: &ObjectGraph,
    node: NodeId,
    store: S,
    scorer: Option<&dyn HopScorer>,
) -> Result<BTreeSet<Term>, ObjectGraphError> {
    let querier = Querier::new(graph, store);
    match scorer {
        Some(scorer) => querier
            .with_scorer(move |hop: &Hop| scorer.score(hop))
            .resolve(node),
        None => querier.resolve(node),
    }
}

/// Validates a defined node's component against `store`.
pub fn check_defined<S: TripleStore>(
    graph: &ObjectGraph,
    node: NodeId,
    store: S,
) -> Result<bool, ObjectGraphError> {
    Querier::new(graph, store).check(node)
}
