use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::{
    errors::ObjectGraphError,
    pattern::{PatternTerm, TriplePattern},
    store::{TripleStore, finish, reject_choices, reject_range},
    term::{Term, Triple},
};

#[derive(Default)]
struct NamedGraph {
    triples: BTreeSet<Triple>,
    by_subject: AHashMap<Term, BTreeSet<Triple>>,
    by_predicate: AHashMap<Term, BTreeSet<Triple>>,
    by_object: AHashMap<Term, BTreeSet<Triple>>,
}

impl NamedGraph {
    fn insert(&mut self, triple: Triple) -> bool {
        if !self.triples.insert(triple.clone()) {
            return false;
        }
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .insert(triple.clone());
        self.by_predicate
            .entry(triple.predicate.clone())
            .or_default()
            .insert(triple.clone());
        self.by_object
            .entry(triple.object.clone())
            .or_default()
            .insert(triple);
        true
    }

    fn remove(&mut self, triple: &Triple) -> bool {
        if !self.triples.remove(triple) {
            return false;
        }
        unindex(&mut self.by_subject, &triple.subject, triple);
        unindex(&mut self.by_predicate, &triple.predicate, triple);
        unindex(&mut self.by_object, &triple.object, triple);
        true
    }

    fn collect(&self, pattern: &TriplePattern, out: &mut Vec<Triple>) {
        let candidates = self
            .candidates(&pattern.subject, &self.by_subject)
            .or_else(|| self.candidates(&pattern.object, &self.by_object))
            .or_else(|| self.candidates(&pattern.predicate, &self.by_predicate));
        match candidates {
            Some(sets) => {
                for set in sets {
                    out.extend(set.iter().filter(|t| pattern.matches(t)).cloned());
                }
            }
            None => out.extend(self.triples.iter().filter(|t| pattern.matches(t)).cloned()),
        }
    }

    fn candidates<'a>(
        &'a self,
        term: &PatternTerm,
        index: &'a AHashMap<Term, BTreeSet<Triple>>,
    ) -> Option<Vec<&'a BTreeSet<Triple>>> {
        match term {
            PatternTerm::Exact(key) => Some(index.get(key).into_iter().collect()),
            PatternTerm::Choices(keys) => Some(keys.iter().filter_map(|k| index.get(k)).collect()),
            _ => None,
        }
    }
}

fn unindex(index: &mut AHashMap<Term, BTreeSet<Triple>>, key: &Term, triple: &Triple) {
    if let Some(set) = index.get_mut(key) {
        set.remove(triple);
        if set.is_empty() {
            index.remove(key);
        }
    }
}

/// Indexed in-memory quad store. Mutation goes through `&self`.
#[derive(Default)]
pub struct MemoryStore {
    graphs: RwLock<BTreeMap<Option<Term>, NamedGraph>>,
    range_queries: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that evaluates range objects itself.
    pub fn with_range_queries() -> Self {
        Self {
            graphs: RwLock::new(BTreeMap::new()),
            range_queries: true,
        }
    }

    pub fn from_triples<I: IntoIterator<Item = Triple>>(triples: I) -> Self {
        let store = Self::new();
        store.extend(triples, None);
        store
    }

    /// Returns `false` when the triple was already present in that graph.
    pub fn add(&self, triple: Triple, context: Option<&Term>) -> bool {
        self.graphs
            .write()
            .entry(context.cloned())
            .or_default()
            .insert(triple)
    }

    pub fn extend<I: IntoIterator<Item = Triple>>(&self, triples: I, context: Option<&Term>) {
        let mut graphs = self.graphs.write();
        let graph = graphs.entry(context.cloned()).or_default();
        for triple in triples {
            graph.insert(triple);
        }
    }

    /// Removes from one graph, or from every graph when `context` is `None`.
    pub fn remove(&self, triple: &Triple, context: Option<&Term>) -> bool {
        let mut graphs = self.graphs.write();
        match context {
            Some(ctx) => graphs
                .get_mut(&Some(ctx.clone()))
                .is_some_and(|graph| graph.remove(triple)),
            None => graphs
                .values_mut()
                .fold(false, |removed, graph| graph.remove(triple) || removed),
        }
    }

    /// Number of distinct triples across all graphs.
    pub fn len(&self) -> usize {
        let graphs = self.graphs.read();
        let mut all = BTreeSet::new();
        for graph in graphs.values() {
            all.extend(graph.triples.iter());
        }
        all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.read().values().all(|graph| graph.triples.is_empty())
    }

    /// Named graphs holding at least one triple.
    pub fn contexts(&self) -> Vec<Term> {
        self.graphs
            .read()
            .iter()
            .filter(|(_, graph)| !graph.triples.is_empty())
            .filter_map(|(ctx, _)| ctx.clone())
            .collect()
    }

    fn run(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        if !self.range_queries {
            reject_range(pattern)?;
        }
        if pattern.matches_nothing() {
            return Ok(Vec::new());
        }
        let graphs = self.graphs.read();
        let mut out = Vec::new();
        match context {
            Some(ctx) => {
                if let Some(graph) = graphs.get(&Some(ctx.clone())) {
                    graph.collect(pattern, &mut out);
                }
            }
            None => {
                for graph in graphs.values() {
                    graph.collect(pattern, &mut out);
                }
            }
        }
        Ok(finish(out))
    }
}

impl TripleStore for MemoryStore {
    fn triples(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        reject_choices(pattern)?;
        self.run(pattern, context)
    }

    fn triples_choices(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        self.run(pattern, context)
    }

    fn supports_range_queries(&self) -> bool {
        self.range_queries
    }
}
