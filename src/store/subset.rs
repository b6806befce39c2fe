use std::collections::BTreeSet;

use crate::{
    errors::ObjectGraphError,
    pattern::TriplePattern,
    store::{TripleStore, finish},
    term::{Term, Triple},
};

/// Exposes only the named graphs in `contexts` from an inner store.
///
/// A `None` context queries the union of the allowed graphs, so the unnamed
/// graph stays hidden; a context outside the set yields nothing. With no
/// contexts configured every query passes straight through.
pub struct ContextSubsetStore<S> {
    inner: S,
    contexts: BTreeSet<Term>,
}

impl<S: TripleStore> ContextSubsetStore<S> {
    pub fn new<I: IntoIterator<Item = Term>>(inner: S, contexts: I) -> Self {
        Self {
            inner,
            contexts: contexts.into_iter().collect(),
        }
    }

    pub fn contexts(&self) -> &BTreeSet<Term> {
        &self.contexts
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn each_context<F>(
        &self,
        context: Option<&Term>,
        mut query: F,
    ) -> Result<Vec<Triple>, ObjectGraphError>
    where
        F: FnMut(Option<&Term>) -> Result<Vec<Triple>, ObjectGraphError>,
    {
        if self.contexts.is_empty() {
            return query(context);
        }
        match context {
            Some(ctx) if self.contexts.contains(ctx) => query(Some(ctx)),
            Some(_) => Ok(Vec::new()),
            None => {
                let mut out = Vec::new();
                for ctx in &self.contexts {
                    out.extend(query(Some(ctx))?);
                }
                Ok(finish(out))
            }
        }
    }
}

impl<S: TripleStore> TripleStore for ContextSubsetStore<S> {
    fn triples(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        self.each_context(context, |ctx| self.inner.triples(pattern, ctx))
    }

    fn triples_choices(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        self.each_context(context, |ctx| self.inner.triples_choices(pattern, ctx))
    }

    fn supports_range_queries(&self) -> bool {
        self.inner.supports_range_queries()
    }
}
