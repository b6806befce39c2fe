use std::collections::BTreeSet;

use objectgraph::{
    MemoryStore, ObjectGraph, Term, Token, Triple, component, descendants, heroes,
    heroes_with_legends, legends, reachability::ComponentTriples, references,
};

fn t(name: &str) -> Term {
    Term::iri(format!("http://example.org/{name}"))
}

fn triple(s: &str, p: &str, o: &str) -> Triple {
    Triple::new(t(s), t(p), t(o))
}

#[test]
fn test_component_skips_undefined_nodes_by_default() {
    let mut graph = ObjectGraph::new();
    let s = graph.add_defined(t("s"));
    let a = graph.add_defined(t("a"));
    let hole = graph.add_undefined();
    let far = graph.add_defined(t("far"));
    graph.relate(s, t("p"), a);
    graph.relate(s, t("q"), hole);
    graph.relate(hole, t("r"), far);

    let defined = component(&graph, s, false);
    assert_eq!(defined.len(), 1);
    let only = defined.iter().next().unwrap();
    assert_eq!(only.to_triple(), Some(triple("s", "p", "a")));

    let everything = component(&graph, s, true);
    assert_eq!(everything.len(), 3);
    assert!(everything.iter().any(|st| st.subject == Token::Variable(graph.variable(hole).unwrap())));
}

#[test]
fn test_component_follows_owner_edges() {
    let mut graph = ObjectGraph::new();
    let owner = graph.add_defined(t("owner"));
    let s = graph.add_defined(t("s"));
    let sibling = graph.add_defined(t("sibling"));
    graph.relate(owner, t("has"), s);
    graph.relate(owner, t("has"), sibling);

    let triples: BTreeSet<Triple> = component(&graph, s, false)
        .iter()
        .filter_map(|st| st.to_triple())
        .collect();
    assert_eq!(
        triples,
        BTreeSet::from([triple("owner", "has", "s"), triple("owner", "has", "sibling")])
    );
}

#[test]
fn test_component_iterator_is_lazy_and_terminates_on_cycles() {
    let mut graph = ObjectGraph::new();
    let a = graph.add_defined(t("a"));
    let b = graph.add_defined(t("b"));
    graph.relate(a, t("next"), b);
    graph.relate(b, t("next"), a);

    let first: Vec<_> = ComponentTriples::new(&graph, a, false).take(1).collect();
    assert_eq!(first.len(), 1);

    let all: Vec<_> = ComponentTriples::new(&graph, a, false).collect();
    let distinct: BTreeSet<_> = all.iter().cloned().collect();
    assert_eq!(distinct.len(), 2);
}

fn shared_tree() -> (ObjectGraph, [objectgraph::NodeId; 3]) {
    let mut graph = ObjectGraph::new();
    let s = graph.add_defined(t("s"));
    let a = graph.add_defined(t("a"));
    let b = graph.add_defined(t("b"));
    graph.relate(s, t("p"), a);
    graph.relate(a, t("q"), b);
    graph.relate(s, t("r"), b);
    (graph, [s, a, b])
}

#[test]
fn test_descendants_transitive_and_direct() {
    let (graph, [s, _, _]) = shared_tree();
    let all = descendants(&graph, s, true, None).unwrap();
    assert_eq!(
        all,
        BTreeSet::from([triple("s", "p", "a"), triple("a", "q", "b"), triple("s", "r", "b")])
    );
    let direct = descendants(&graph, s, false, None).unwrap();
    assert_eq!(direct, BTreeSet::from([triple("s", "p", "a"), triple("s", "r", "b")]));
}

#[test]
fn test_descendants_from_store() {
    let store = MemoryStore::from_triples([
        triple("s", "p", "a"),
        triple("a", "q", "b"),
        Triple::new(t("b"), t("label"), Term::text("leaf")),
        triple("other", "p", "s"),
    ]);
    let mut graph = ObjectGraph::new();
    let s = graph.add_defined(t("s"));

    let all = descendants(&graph, s, true, Some(&store)).unwrap();
    assert_eq!(all.len(), 3);
    assert!(!all.contains(&triple("other", "p", "s")));

    let direct = descendants(&graph, s, false, Some(&store)).unwrap();
    assert_eq!(direct, BTreeSet::from([triple("s", "p", "a")]));

    let hole = graph.add_undefined();
    assert!(descendants(&graph, hole, true, Some(&store)).unwrap().is_empty());
}

#[test]
fn test_references_one_hop_both_directions() {
    let (graph, [_, a, _]) = shared_tree();
    let found = references(&graph, a, None).unwrap();
    assert_eq!(found, BTreeSet::from([triple("s", "p", "a"), triple("a", "q", "b")]));

    let store = MemoryStore::from_triples([
        triple("s", "p", "a"),
        triple("x", "p", "a"),
        triple("a", "q", "b"),
        triple("b", "q", "c"),
    ]);
    let stored = references(&graph, a, Some(&store)).unwrap();
    assert_eq!(stored.len(), 3);
    assert!(!stored.contains(&triple("b", "q", "c")));
}

#[test]
fn test_references_of_undefined_node_is_empty() {
    let mut graph = ObjectGraph::new();
    let hole = graph.add_undefined();
    let value = graph.add_defined(t("v"));
    graph.relate(hole, t("p"), value);
    assert!(references(&graph, hole, None).unwrap().is_empty());
}

/// `s` owns `x` and `y`; `r` also refers to `y`.
fn shared_value() -> (ObjectGraph, objectgraph::NodeId, objectgraph::NodeId, objectgraph::NodeId) {
    let mut graph = ObjectGraph::new();
    let s = graph.add_defined(t("s"));
    let r = graph.add_defined(t("r"));
    let x = graph.add_defined(t("x"));
    let y = graph.add_defined(t("y"));
    let x_name = graph.add_defined(Term::text("X"));
    let y_name = graph.add_defined(Term::text("Y"));
    graph.relate(s, t("p"), x);
    graph.relate(s, t("q"), y);
    graph.relate(r, t("k"), y);
    graph.relate(x, t("name"), x_name);
    graph.relate(y, t("name"), y_name);
    (graph, s, x, y)
}

#[test]
fn test_legends_are_referenced_from_outside() {
    let (graph, s, x, y) = shared_value();
    let found = legends(&graph, s, None).unwrap();
    assert!(found.contains(&y));
    assert!(!found.contains(&x));
    assert!(!found.contains(&s));
}

#[test]
fn test_heroes_and_legends_partition_the_subtree() {
    let (graph, s, _, _) = shared_value();
    let legend_set = legends(&graph, s, None).unwrap();
    let found = heroes_with_legends(&graph, s, None, &legend_set).unwrap();
    assert_eq!(found, heroes(&graph, s, None).unwrap());

    assert!(found.contains(&Triple::new(t("x"), t("name"), Term::text("X"))));
    assert!(found.contains(&triple("s", "p", "x")));
    assert!(found.iter().all(|row| row.subject != t("y")));
    assert!(!found.contains(&Triple::new(t("y"), t("name"), Term::text("Y"))));
}

#[test]
fn test_legends_and_heroes_from_store_counts() {
    let store = MemoryStore::from_triples([
        triple("s", "p", "x"),
        triple("s", "q", "y"),
        triple("r", "k", "y"),
        Triple::new(t("x"), t("name"), Term::text("X")),
        Triple::new(t("y"), t("name"), Term::text("Y")),
    ]);
    let mut graph = ObjectGraph::new();
    let s = graph.add_defined(t("s"));
    let x = graph.add_defined(t("x"));
    let y = graph.add_defined(t("y"));
    graph.relate(s, t("p"), x);
    graph.relate(s, t("q"), y);

    // Only the store knows about r.
    assert!(legends(&graph, s, None).unwrap().is_empty());
    let found = legends(&graph, s, Some(&store)).unwrap();
    assert_eq!(found, BTreeSet::from([y]));

    let doomed = heroes(&graph, s, Some(&store)).unwrap();
    assert_eq!(
        doomed,
        BTreeSet::from([
            triple("s", "p", "x"),
            triple("s", "q", "y"),
            Triple::new(t("x"), t("name"), Term::text("X")),
        ])
    );
}

#[test]
fn test_cycle_back_to_start_is_not_a_legend() {
    let mut graph = ObjectGraph::new();
    let s = graph.add_defined(t("s"));
    let a = graph.add_defined(t("a"));
    graph.relate(s, t("p"), a);
    graph.relate(a, t("back"), s);

    assert!(legends(&graph, s, None).unwrap().is_empty());
    let found = heroes(&graph, s, None).unwrap();
    assert_eq!(found, BTreeSet::from([triple("s", "p", "a"), triple("a", "back", "s")]));
}

#[test]
fn test_value_reached_twice_inside_subtree_is_not_a_legend() {
    let (graph, [s, _, b]) = shared_tree();
    let found = legends(&graph, s, None).unwrap();
    assert!(!found.contains(&b));
    let doomed = heroes(&graph, s, None).unwrap();
    assert_eq!(doomed.len(), 3);
}

/// `s -p-> u -q-> y` with `u` undefined; `r` also refers to `y`.
fn shared_behind_undefined() -> (ObjectGraph, objectgraph::NodeId, objectgraph::NodeId) {
    let mut graph = ObjectGraph::new();
    let s = graph.add_defined(t("s"));
    let u = graph.add_undefined();
    let r = graph.add_defined(t("r"));
    let y = graph.add_defined(t("y"));
    let y_name = graph.add_defined(Term::text("Y"));
    graph.relate(s, t("p"), u);
    graph.relate(u, t("q"), y);
    graph.relate(r, t("k"), y);
    graph.relate(y, t("name"), y_name);
    (graph, s, y)
}

#[test]
fn test_legend_behind_undefined_node_is_kept() {
    let (graph, s, y) = shared_behind_undefined();
    let found = legends(&graph, s, None).unwrap();
    assert!(found.contains(&y));
    let doomed = heroes(&graph, s, None).unwrap();
    assert!(!doomed.contains(&Triple::new(t("y"), t("name"), Term::text("Y"))));
}

#[test]
fn test_legend_behind_undefined_node_from_store() {
    let (graph, s, y) = shared_behind_undefined();
    let store = MemoryStore::from_triples([
        triple("r", "k", "y"),
        Triple::new(t("y"), t("name"), Term::text("Y")),
    ]);
    let found = legends(&graph, s, Some(&store)).unwrap();
    assert_eq!(found, BTreeSet::from([y]));
    let doomed = heroes(&graph, s, Some(&store)).unwrap();
    assert!(doomed.iter().all(|row| row.subject != t("y")));
}

#[test]
fn test_undefined_owner_inside_subtree_still_releases_value() {
    let mut graph = ObjectGraph::new();
    let s = graph.add_defined(t("s"));
    let u = graph.add_undefined();
    let x = graph.add_defined(t("x"));
    graph.relate(s, t("p"), u);
    graph.relate(u, t("q"), x);
    assert!(legends(&graph, s, None).unwrap().is_empty());
}
