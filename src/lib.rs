//! Object graphs mapped onto triple stores: star-query resolution, closure
//! entailment layers and ownership analysis.
//! Run Criterion benchmarks with `cargo bench` to inspect reports under `target/criterion`.

pub mod bench_utils;
pub mod config;
pub mod errors;
pub mod graph;
pub mod layers;
pub mod pattern;
pub mod query;
pub mod range;
pub mod reachability;
#[cfg(feature = "sqlite-backend")]
pub mod schema;
pub mod store;
pub mod term;
pub mod transitive;
pub mod vocab;

pub use crate::config::{ClosureRule, QueryConfig, SqliteConfig, StoreConfig, StoreKind, open_store};
pub use crate::errors::ObjectGraphError;
pub use crate::graph::{
    NodeId, NodeKind, ObjectGraph, PropertyDescriptor, PropertyId, PropertyRegistry, Statement,
    Token, Variable,
};
pub use crate::layers::{
    ClosureRequest, ContainerMembershipLayer, LayerStack, QueryLayer, RangeLayer, ZeroOrMoreLayer,
    default_layers, layer,
};
pub use crate::pattern::{PatternTerm, TriplePattern};
pub use crate::query::{HopScorer, Querier, TypeLastScorer, check_defined, load_terms, resolve};
pub use crate::range::InRange;
pub use crate::reachability::{
    component, descendants, heroes, heroes_with_legends, legends, references,
};
#[cfg(feature = "sqlite-backend")]
pub use crate::store::SqliteTripleStore;
pub use crate::store::{AggregateStore, ContextSubsetStore, MemoryStore, TripleStore};
pub use crate::term::{Direction, Position, Term, Triple};
pub use crate::transitive::{transitive_lookup, transitive_lookup_all};
