use std::cell::Cell;
use std::collections::BTreeSet;

use objectgraph::{
    InRange, MemoryStore, ObjectGraph, Term, Triple, check_defined, load_terms,
    query::{Hop, Querier},
    resolve,
    vocab::{rdf_type, rdfs_sub_class_of},
};
use proptest::prelude::*;

fn t(name: &str) -> Term {
    Term::iri(format!("http://example.org/{name}"))
}

fn people() -> MemoryStore {
    MemoryStore::from_triples([
        Triple::new(t("alice"), rdf_type(), t("Person")),
        Triple::new(t("alice"), t("name"), Term::text("Alice")),
        Triple::new(t("alice"), t("knows"), t("bob")),
        Triple::new(t("bob"), rdf_type(), t("Person")),
        Triple::new(t("bob"), t("name"), Term::text("Bob")),
        Triple::new(t("carol"), rdf_type(), t("Person")),
        Triple::new(t("carol"), t("knows"), t("dan")),
        Triple::new(t("dan"), t("name"), Term::text("Dan")),
    ])
}

#[test]
fn test_star_query_intersects_branches() {
    let store = people();
    let mut graph = ObjectGraph::new();
    let start = graph.add_undefined();
    let person = graph.add_defined(t("Person"));
    let name = graph.add_defined(Term::text("Alice"));
    graph.relate(start, rdf_type(), person);
    graph.relate(start, t("name"), name);

    let found = resolve(&graph, start, &store, None).expect("resolve");
    assert_eq!(found, BTreeSet::from([t("alice")]));
}

#[test]
fn test_two_hop_path_through_undefined_node() {
    let store = people();
    let mut graph = ObjectGraph::new();
    let start = graph.add_undefined();
    let friend = graph.add_undefined();
    let name = graph.add_defined(Term::text("Dan"));
    graph.relate(start, t("knows"), friend);
    graph.relate(friend, t("name"), name);

    let found = resolve(&graph, start, &store, None).expect("resolve");
    assert_eq!(found, BTreeSet::from([t("carol")]));
}

#[test]
fn test_upward_hop_resolves_values_of_a_defined_owner() {
    let store = people();
    let mut graph = ObjectGraph::new();
    let alice = graph.add_defined(t("alice"));
    let target = graph.add_undefined();
    graph.relate(alice, t("knows"), target);

    let found = resolve(&graph, target, &store, None).expect("resolve");
    assert_eq!(found, BTreeSet::from([t("bob")]));
}

#[test]
fn test_no_anchor_resolves_empty() {
    let store = people();
    let mut graph = ObjectGraph::new();
    let start = graph.add_undefined();
    let other = graph.add_undefined();
    graph.relate(start, t("knows"), other);
    assert!(resolve(&graph, start, &store, None).unwrap().is_empty());
}

#[test]
fn test_unsatisfiable_query_resolves_empty() {
    let store = people();
    let mut graph = ObjectGraph::new();
    let start = graph.add_undefined();
    let person = graph.add_defined(t("Person"));
    let name = graph.add_defined(Term::text("Nobody"));
    graph.relate(start, rdf_type(), person);
    graph.relate(start, t("name"), name);
    assert!(resolve(&graph, start, &store, None).unwrap().is_empty());
}

#[test]
fn test_cyclic_query_graph_terminates() {
    let store = people();
    let mut graph = ObjectGraph::new();
    let start = graph.add_undefined();
    let friend = graph.add_undefined();
    let bob_name = graph.add_defined(Term::text("Bob"));
    graph.relate(start, t("knows"), friend);
    graph.relate(friend, t("knows"), start);
    graph.relate(friend, t("name"), bob_name);
    // alice knows bob, but bob knows nobody back.
    assert!(resolve(&graph, start, &store, None).unwrap().is_empty());
}

#[test]
fn test_defined_object_validation_is_idempotent() {
    let store = people();
    let mut graph = ObjectGraph::new();
    let alice = graph.add_defined(t("alice"));
    let person = graph.add_defined(t("Person"));
    graph.relate(alice, rdf_type(), person);

    let first = resolve(&graph, alice, &store, None).unwrap();
    let second = resolve(&graph, alice, &store, None).unwrap();
    assert_eq!(first, BTreeSet::from([t("alice")]));
    assert_eq!(first, second);
}

#[test]
fn test_defined_object_with_missing_edge_fails_validation() {
    let store = people();
    let mut graph = ObjectGraph::new();
    let alice = graph.add_defined(t("alice"));
    let carol = graph.add_defined(t("carol"));
    graph.relate(alice, t("knows"), carol);

    assert!(!check_defined(&graph, alice, &store).unwrap());
    assert!(resolve(&graph, alice, &store, None).unwrap().is_empty());
}

#[test]
fn test_validation_ignores_undefined_neighbours() {
    let store = people();
    let mut graph = ObjectGraph::new();
    let alice = graph.add_defined(t("alice"));
    let unknown = graph.add_undefined();
    graph.relate(alice, t("likes"), unknown);
    assert!(check_defined(&graph, alice, &store).unwrap());
}

fn scored() -> MemoryStore {
    MemoryStore::from_triples(
        [5, 10, 15, 20]
            .into_iter()
            .map(|n| Triple::new(t(&format!("s{n}")), t("score"), Term::integer(n))),
    )
}

#[test]
fn test_range_node_filters_exclusively() {
    let store = scored();
    let mut graph = ObjectGraph::new();
    let start = graph.add_undefined();
    let range = graph.add_range(
        InRange::new(Some(Term::integer(10)), Some(Term::integer(20))).unwrap(),
    );
    graph.relate(start, t("score"), range);
    let found = resolve(&graph, start, &store, None).unwrap();
    assert_eq!(found, BTreeSet::from([t("s15")]));
}

#[test]
fn test_unbounded_range_is_not_an_anchor() {
    let store = scored();
    let mut graph = ObjectGraph::new();
    let start = graph.add_undefined();
    let range = graph.add_range(InRange::unbounded());
    graph.relate(start, t("score"), range);
    assert!(resolve(&graph, start, &store, None).unwrap().is_empty());
}

#[test]
fn test_custom_scorer_is_consulted() {
    let store = people();
    let mut graph = ObjectGraph::new();
    let start = graph.add_undefined();
    let person = graph.add_defined(t("Person"));
    let bob = graph.add_defined(t("bob"));
    graph.relate(start, rdf_type(), person);
    graph.relate(start, t("knows"), bob);

    let calls = Cell::new(0);
    let scorer = |hop: &Hop| -> i64 {
        calls.set(calls.get() + 1);
        if hop.predicate == rdf_type() { 0 } else { 1 }
    };
    let found = Querier::new(&graph, &store)
        .with_scorer(scorer)
        .resolve(start)
        .unwrap();
    assert_eq!(found, BTreeSet::from([t("alice")]));
    assert!(calls.get() >= 2);
}

#[test]
fn test_load_terms_includes_subclass_instances() {
    let store = MemoryStore::from_triples([
        Triple::new(t("Employee"), rdfs_sub_class_of(), t("Person")),
        Triple::new(t("erin"), rdf_type(), t("Employee")),
        Triple::new(t("erin"), t("name"), Term::text("Erin")),
        Triple::new(t("frank"), rdf_type(), t("Person")),
        Triple::new(t("frank"), t("name"), Term::text("Frank")),
    ]);
    let mut graph = ObjectGraph::new();
    let start = graph.add_undefined();
    let person = graph.add_defined(t("Person"));
    graph.relate(start, rdf_type(), person);

    let all = load_terms(&store, &graph, start, &t("Person")).unwrap();
    assert_eq!(all, BTreeSet::from([t("erin"), t("frank")]));

    let name = graph.add_defined(Term::text("Erin"));
    graph.relate(start, t("name"), name);
    let erin = load_terms(&store, &graph, start, &t("Person")).unwrap();
    assert_eq!(erin, BTreeSet::from([t("erin")]));

    // Without the closure layer only direct instances match.
    let direct = resolve(&graph, start, &store, None).unwrap();
    assert!(direct.is_empty());
}

#[cfg(feature = "sqlite-backend")]
#[test]
fn test_resolve_against_sqlite_store() {
    let store = objectgraph::SqliteTripleStore::open_in_memory().unwrap();
    let triples: Vec<Triple> = [5, 10, 15, 20]
        .into_iter()
        .map(|n| Triple::new(t(&format!("s{n}")), t("score"), Term::integer(n)))
        .collect();
    store.add_all(triples.iter(), None).unwrap();

    let mut graph = ObjectGraph::new();
    let start = graph.add_undefined();
    let range = graph.add_range(InRange::greater_than(Term::integer(10)));
    graph.relate(start, t("score"), range);
    let found = resolve(&graph, start, &store, None).unwrap();
    assert_eq!(found, BTreeSet::from([t("s15"), t("s20")]));
}

#[derive(Clone, Debug)]
enum Edge {
    Literal(u8, i64),
    Nested(u8, u8, i64),
}

fn edge_strategy() -> impl Strategy<Value = Edge> {
    prop_oneof![
        (0u8..4, 0i64..50).prop_map(|(p, v)| Edge::Literal(p, v)),
        (0u8..4, 0u8..4, 0i64..50).prop_map(|(p, q, v)| Edge::Nested(p, q, v)),
    ]
}

proptest! {
    #[test]
    fn prop_stored_instance_is_found(edges in proptest::collection::vec(edge_strategy(), 1..6)) {
        let inst = t("inst");
        let mut triples = Vec::new();
        let mut graph = ObjectGraph::new();
        let start = graph.add_undefined();
        for (idx, edge) in edges.iter().enumerate() {
            match edge {
                Edge::Literal(p, v) => {
                    triples.push(Triple::new(inst.clone(), t(&format!("p{p}")), Term::integer(*v)));
                    let value = graph.add_defined(Term::integer(*v));
                    graph.relate(start, t(&format!("p{p}")), value);
                }
                Edge::Nested(p, q, v) => {
                    let mid = t(&format!("mid{idx}"));
                    triples.push(Triple::new(inst.clone(), t(&format!("p{p}")), mid.clone()));
                    triples.push(Triple::new(mid, t(&format!("q{q}")), Term::integer(*v)));
                    let mid_node = graph.add_undefined();
                    let value = graph.add_defined(Term::integer(*v));
                    graph.relate(start, t(&format!("p{p}")), mid_node);
                    graph.relate(mid_node, t(&format!("q{q}")), value);
                }
            }
        }
        let store = MemoryStore::from_triples(triples);
        let found = resolve(&graph, start, &store, None).unwrap();
        prop_assert!(found.contains(&inst));
    }
}
