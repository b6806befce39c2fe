//! Store contract consumed by the engine, plus the bundled implementations.
//!
//! Every implementation returns triples sorted and deduplicated, so a call is
//! deterministic for a fixed store snapshot. Store errors are returned as-is;
//! the engine never retries or masks them.

mod aggregate;
mod memory;
#[cfg(feature = "sqlite-backend")]
mod sqlite;
mod subset;

pub use aggregate::AggregateStore;
pub use memory::MemoryStore;
#[cfg(feature = "sqlite-backend")]
pub use sqlite::SqliteTripleStore;
pub use subset::ContextSubsetStore;

use crate::{
    errors::ObjectGraphError,
    pattern::{PatternTerm, TriplePattern},
    term::{Term, Triple},
};

/// A queryable set of triples, optionally partitioned into named graphs.
///
/// `context == None` addresses the union of every graph.
pub trait TripleStore {
    /// Matches a pattern whose positions are wildcards, exact terms or ranges.
    fn triples(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError>;

    /// Like [`TripleStore::triples`], but positions may also hold choice lists.
    fn triples_choices(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError>;

    /// Whether a [`PatternTerm::Range`] object is evaluated by the store itself.
    fn supports_range_queries(&self) -> bool {
        false
    }

    fn contains(&self, triple: &Triple, context: Option<&Term>) -> Result<bool, ObjectGraphError> {
        Ok(!self
            .triples(&TriplePattern::exact(triple), context)?
            .is_empty())
    }

    fn count(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<usize, ObjectGraphError> {
        Ok(self.triples(pattern, context)?.len())
    }
}

impl<'a, S> TripleStore for &'a S
where
    S: TripleStore + ?Sized,
{
    fn triples(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        (*self).triples(pattern, context)
    }

    fn triples_choices(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        (*self).triples_choices(pattern, context)
    }

    fn supports_range_queries(&self) -> bool {
        (*self).supports_range_queries()
    }

    fn contains(&self, triple: &Triple, context: Option<&Term>) -> Result<bool, ObjectGraphError> {
        (*self).contains(triple, context)
    }

    fn count(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<usize, ObjectGraphError> {
        (*self).count(pattern, context)
    }
}

impl<S> TripleStore for Box<S>
where
    S: TripleStore + ?Sized,
{
    fn triples(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        (**self).triples(pattern, context)
    }

    fn triples_choices(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        (**self).triples_choices(pattern, context)
    }

    fn supports_range_queries(&self) -> bool {
        (**self).supports_range_queries()
    }

    fn contains(&self, triple: &Triple, context: Option<&Term>) -> Result<bool, ObjectGraphError> {
        (**self).contains(triple, context)
    }

    fn count(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<usize, ObjectGraphError> {
        (**self).count(pattern, context)
    }
}

/// `triples` takes no choice lists; those go through `triples_choices`.
pub(crate) fn reject_choices(pattern: &TriplePattern) -> Result<(), ObjectGraphError> {
    if pattern.has_choices() {
        return Err(ObjectGraphError::invalid_input(format!(
            "choice lists require triples_choices: {pattern}"
        )));
    }
    Ok(())
}

/// Base stores without native range support refuse range patterns rather than
/// silently treating them as wildcards.
pub(crate) fn reject_range(pattern: &TriplePattern) -> Result<(), ObjectGraphError> {
    let has_range = [&pattern.subject, &pattern.predicate, &pattern.object]
        .into_iter()
        .any(|term| matches!(term, PatternTerm::Range(_)));
    if has_range {
        return Err(ObjectGraphError::invalid_input(format!(
            "store does not evaluate ranges: {pattern}"
        )));
    }
    Ok(())
}

pub(crate) fn finish(mut triples: Vec<Triple>) -> Vec<Triple> {
    triples.sort();
    triples.dedup();
    triples
}
