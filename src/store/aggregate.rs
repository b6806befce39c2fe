use crate::{
    errors::ObjectGraphError,
    pattern::TriplePattern,
    store::{TripleStore, finish},
    term::{Term, Triple},
};

/// Read-only union of several stores.
///
/// Queries fan out to every member in order and the rows are merged. Ranges
/// are evaluated natively only when every member can do so; otherwise a range
/// layer has to sit above the aggregate.
#[derive(Default)]
pub struct AggregateStore {
    stores: Vec<Box<dyn TripleStore>>,
}

impl AggregateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<S: TripleStore + 'static>(mut self, store: S) -> Self {
        self.stores.push(Box::new(store));
        self
    }

    pub fn push(&mut self, store: Box<dyn TripleStore>) {
        self.stores.push(store);
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    fn each_store<F>(&self, mut query: F) -> Result<Vec<Triple>, ObjectGraphError>
    where
        F: FnMut(&dyn TripleStore) -> Result<Vec<Triple>, ObjectGraphError>,
    {
        let mut out = Vec::new();
        for store in &self.stores {
            out.extend(query(store.as_ref())?);
        }
        Ok(finish(out))
    }
}

impl TripleStore for AggregateStore {
    fn triples(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        self.each_store(|store| store.triples(pattern, context))
    }

    fn triples_choices(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        self.each_store(|store| store.triples_choices(pattern, context))
    }

    fn supports_range_queries(&self) -> bool {
        !self.stores.is_empty() && self.stores.iter().all(|store| store.supports_range_queries())
    }
}
