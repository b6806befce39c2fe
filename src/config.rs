//! Store selection and layer-stack configuration.
//!
//! [`StoreConfig`] picks the backing store for [`open_store`];
//! [`QueryConfig`] describes which layers wrap it and can be loaded from JSON.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    errors::ObjectGraphError,
    layers::{
        ContainerMembershipLayer, LayerStack, RangeLayer, ZeroOrMoreLayer, subclass_of_matcher,
        subclass_of_matcher_for, subclass_of_subclass_of_matcher, subproperty_of_matcher,
    },
    store::{MemoryStore, TripleStore},
    term::Term,
};

/// Which store [`open_store`] builds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    Memory,
    /// Requires the `sqlite-backend` feature.
    #[default]
    Sqlite,
}

/// Options for the SQLite store.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteConfig {
    /// Capacity of the prepared statement cache. `None` keeps the store's
    /// default.
    pub cache_size: Option<usize>,

    /// `PRAGMA key = value` statements run right after opening, e.g.
    /// `journal_mode = WAL`.
    pub pragma_settings: HashMap<String, String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub kind: StoreKind,
    pub sqlite: SqliteConfig,
    /// Whether a memory store answers range patterns itself instead of
    /// leaving them to the range layer.
    pub memory_range_queries: bool,
}

impl StoreConfig {
    pub fn new(kind: StoreKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn memory() -> Self {
        Self::new(StoreKind::Memory)
    }

    pub fn sqlite() -> Self {
        Self::new(StoreKind::Sqlite)
    }
}

/// Opens the configured store. `path` is ignored for memory stores.
pub fn open_store<P: AsRef<Path>>(
    path: P,
    cfg: &StoreConfig,
) -> Result<Box<dyn TripleStore>, ObjectGraphError> {
    match cfg.kind {
        StoreKind::Memory => {
            let store = if cfg.memory_range_queries {
                MemoryStore::with_range_queries()
            } else {
                MemoryStore::new()
            };
            Ok(Box::new(store))
        }
        #[cfg(feature = "sqlite-backend")]
        StoreKind::Sqlite => {
            let store = crate::store::SqliteTripleStore::open(path)?;
            let conn = store.connection();
            if let Some(capacity) = cfg.sqlite.cache_size {
                conn.set_prepared_statement_cache_capacity(capacity);
            }
            for (key, value) in &cfg.sqlite.pragma_settings {
                let sql = format!("PRAGMA {key} = {value}");
                match conn.execute(&sql, []) {
                    Ok(_) | Err(rusqlite::Error::ExecuteReturnedResults) => {}
                    Err(e) => {
                        return Err(ObjectGraphError::connection(format!("{sql}: {e}")));
                    }
                }
            }
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "sqlite-backend"))]
        StoreKind::Sqlite => {
            let _ = path;
            Err(ObjectGraphError::configuration(
                "sqlite store requested but the sqlite-backend feature is disabled",
            ))
        }
    }
}

/// A zero-or-more closure layer, by the matcher it uses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ClosureRule {
    /// Any `rdf:type` query with a bound class.
    SubClassOf {
        #[serde(default = "reflexive_default")]
        reflexive: bool,
    },
    /// `rdf:type` queries naming `class`.
    SubClassOfTarget {
        class: Term,
        #[serde(default = "reflexive_default")]
        reflexive: bool,
    },
    /// `rdfs:subClassOf` queries naming `class`.
    SubClassOfSubClassOf {
        class: Term,
        #[serde(default = "reflexive_default")]
        reflexive: bool,
    },
    /// Queries whose predicate is `property`.
    SubPropertyOf {
        property: Term,
        #[serde(default = "reflexive_default")]
        reflexive: bool,
    },
}

fn reflexive_default() -> bool {
    true
}

impl ClosureRule {
    pub fn layer(&self) -> ZeroOrMoreLayer {
        match self {
            ClosureRule::SubClassOf { reflexive } => {
                ZeroOrMoreLayer::new(subclass_of_matcher()).reflexive(*reflexive)
            }
            ClosureRule::SubClassOfTarget { class, reflexive } => {
                ZeroOrMoreLayer::new(subclass_of_matcher_for(class.clone())).reflexive(*reflexive)
            }
            ClosureRule::SubClassOfSubClassOf { class, reflexive } => {
                ZeroOrMoreLayer::new(subclass_of_subclass_of_matcher(class.clone()))
                    .reflexive(*reflexive)
            }
            ClosureRule::SubPropertyOf {
                property,
                reflexive,
            } => ZeroOrMoreLayer::new(subproperty_of_matcher(property.clone()))
                .reflexive(*reflexive),
        }
    }
}

/// Layers to put between callers and a store, top to bottom: range handling,
/// container membership, then closures in the listed order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub range_layer: bool,
    pub container_membership: bool,
    pub closures: Vec<ClosureRule>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            range_layer: true,
            container_membership: false,
            closures: Vec::new(),
        }
    }
}

impl QueryConfig {
    pub fn from_json(raw: &str) -> Result<Self, ObjectGraphError> {
        serde_json::from_str(raw).map_err(|e| ObjectGraphError::configuration(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ObjectGraphError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ObjectGraphError::configuration(e.to_string()))
    }

    pub fn build<S: TripleStore>(&self, store: S) -> LayerStack<S> {
        let mut stack = LayerStack::new(store);
        if self.range_layer {
            stack = stack.with(RangeLayer);
        }
        if self.container_membership {
            stack = stack.with(ContainerMembershipLayer);
        }
        for rule in &self.closures {
            stack = stack.with(rule.layer());
        }
        stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "sqlite-backend")]
    use tempfile::tempdir;

    #[test]
    fn test_store_config_default() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.kind, StoreKind::Sqlite);
        assert!(cfg.sqlite.cache_size.is_none());
        assert!(cfg.sqlite.pragma_settings.is_empty());
        assert!(!cfg.memory_range_queries);
    }

    #[test]
    fn test_open_store_memory() {
        let mut cfg = StoreConfig::memory();
        cfg.memory_range_queries = true;
        let store = open_store("unused", &cfg).unwrap();
        assert!(store.supports_range_queries());
    }

    #[cfg(feature = "sqlite-backend")]
    #[test]
    fn test_open_store_sqlite_with_pragmas() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("store.db");
        let mut cfg = StoreConfig::sqlite();
        cfg.sqlite.cache_size = Some(32);
        cfg.sqlite
            .pragma_settings
            .insert("journal_mode".to_string(), "WAL".to_string());
        cfg.sqlite
            .pragma_settings
            .insert("synchronous".to_string(), "NORMAL".to_string());

        let store = open_store(&db_path, &cfg).unwrap();
        assert!(store.supports_range_queries());
        assert!(db_path.exists());
    }

    #[cfg(feature = "sqlite-backend")]
    #[test]
    fn test_open_store_rejects_bad_pragma() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("bad.db");
        let mut cfg = StoreConfig::sqlite();
        cfg.sqlite
            .pragma_settings
            .insert("journal_mode".to_string(), "(".to_string());
        assert!(matches!(
            open_store(&db_path, &cfg),
            Err(ObjectGraphError::ConnectionError(_))
        ));
    }

    #[test]
    fn test_query_config_from_json() {
        let raw = r#"{
            "container_membership": true,
            "closures": [
                {"rule": "sub_class_of"},
                {"rule": "sub_property_of",
                 "property": {"kind": "iri", "value": "http://example.org/d"},
                 "reflexive": false}
            ]
        }"#;
        let cfg = QueryConfig::from_json(raw).unwrap();
        assert!(cfg.range_layer);
        assert!(cfg.container_membership);
        assert_eq!(cfg.closures.len(), 2);
        assert_eq!(
            cfg.closures[1],
            ClosureRule::SubPropertyOf {
                property: Term::iri("http://example.org/d"),
                reflexive: false,
            }
        );

        let stack = cfg.build(MemoryStore::new());
        assert_eq!(
            stack.layer_names(),
            vec!["range", "container_membership", "zero_or_more", "zero_or_more"]
        );
    }

    #[test]
    fn test_query_config_round_trips_through_json() {
        let cfg = QueryConfig {
            range_layer: false,
            container_membership: false,
            closures: vec![ClosureRule::SubClassOfSubClassOf {
                class: Term::iri("c"),
                reflexive: true,
            }],
        };
        let parsed = QueryConfig::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn test_query_config_rejects_unknown_rule() {
        let err = QueryConfig::from_json(r#"{"closures": [{"rule": "bogus"}]}"#).unwrap_err();
        assert!(matches!(err, ObjectGraphError::Configuration(_)));
    }
}
