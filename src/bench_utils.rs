//! Seeded synthetic datasets for benchmarks and large tests.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    errors::ObjectGraphError,
    graph::{NodeId, ObjectGraph},
    range::InRange,
    store::MemoryStore,
    term::{Term, Triple},
    vocab,
};

const NS: &str = "http://example.org/bench/";

#[derive(Clone, Debug)]
pub struct QueryDataset {
    pub triples: Vec<Triple>,
    /// `classes[k + 1]` is a direct sub-class of `classes[k]`.
    pub classes: Vec<Term>,
    pub groups: Vec<Term>,
    pub instances: usize,
}

impl QueryDataset {
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn memory_store(&self) -> MemoryStore {
        MemoryStore::from_triples(self.triples.iter().cloned())
    }
}

pub fn instance(idx: usize) -> Term {
    Term::iri(format!("{NS}i{idx}"))
}

pub fn score_property() -> Term {
    Term::iri(format!("{NS}score"))
}

pub fn group_property() -> Term {
    Term::iri(format!("{NS}inGroup"))
}

/// `instances` objects, each typed with a random class from a chain of
/// `class_depth` classes, scored 0..100 and placed in one of `groups` groups.
pub fn generate_dataset(instances: usize, class_depth: usize, groups: usize, seed: u64) -> QueryDataset {
    assert!(class_depth > 0, "class_depth must be positive");
    assert!(groups > 0, "groups must be positive");
    let mut rng = StdRng::seed_from_u64(seed);
    let classes: Vec<Term> = (0..class_depth)
        .map(|k| Term::iri(format!("{NS}C{k}")))
        .collect();
    let group_terms: Vec<Term> = (0..groups).map(|g| Term::iri(format!("{NS}g{g}"))).collect();

    let mut triples = Vec::with_capacity(instances * 3 + class_depth);
    for pair in classes.windows(2) {
        triples.push(Triple::new(
            pair[1].clone(),
            vocab::rdfs_sub_class_of(),
            pair[0].clone(),
        ));
    }
    for idx in 0..instances {
        let subject = instance(idx);
        let class = &classes[rng.gen_range(0..class_depth)];
        let group = &group_terms[rng.gen_range(0..groups)];
        triples.push(Triple::new(subject.clone(), vocab::rdf_type(), class.clone()));
        triples.push(Triple::new(
            subject.clone(),
            score_property(),
            Term::integer(rng.gen_range(0..100)),
        ));
        triples.push(Triple::new(subject, group_property(), group.clone()));
    }
    triples.sort();
    QueryDataset {
        triples,
        classes,
        groups: group_terms,
        instances,
    }
}

/// "Typed as `class`, in `group`, scored strictly between `low` and `high`."
pub fn star_query(
    class: &Term,
    group: &Term,
    low: i64,
    high: i64,
) -> Result<(ObjectGraph, NodeId), ObjectGraphError> {
    let mut graph = ObjectGraph::new();
    let start = graph.add_undefined();
    let class_node = graph.add_defined(class.clone());
    let group_node = graph.add_defined(group.clone());
    let range = graph.add_range(InRange::new(
        Some(Term::integer(low)),
        Some(Term::integer(high)),
    )?);
    graph.relate(start, vocab::rdf_type(), class_node);
    graph.relate(start, group_property(), group_node);
    graph.relate(start, score_property(), range);
    Ok((graph, start))
}
