use std::collections::BTreeSet;

use ahash::AHashMap;
use tracing::debug;

use crate::{
    errors::ObjectGraphError,
    layers::QueryLayer,
    pattern::{PatternTerm, TriplePattern},
    store::{TripleStore, finish},
    term::{Direction, Position, Term, Triple},
    transitive::{transitive_lookup, transitive_lookup_all},
};

/// What a [`Matcher`] asks the layer to expand.
///
/// The closure of `start` along `predicate`/`direction` replaces the pattern
/// at `position`. An empty `start` leaves the query as-is but still entails
/// results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClosureRequest {
    pub start: Vec<Term>,
    pub predicate: Term,
    pub direction: Direction,
    pub position: Position,
}

pub type Matcher = Box<dyn Fn(&TriplePattern) -> Option<ClosureRequest> + Send + Sync>;

/// Generic zero-or-more closure entailment.
///
/// A matched query is widened to the closure of the requested start terms.
/// Each result row is then expanded along the opposite direction, bounded by
/// that closure, so "typed as X" also yields rows typed with X for instances
/// of X's sub-classes.
pub struct ZeroOrMoreLayer {
    matcher: Matcher,
    reflexive: bool,
}

impl ZeroOrMoreLayer {
    pub fn new<F>(matcher: F) -> Self
    where
        F: Fn(&TriplePattern) -> Option<ClosureRequest> + Send + Sync + 'static,
    {
        Self {
            matcher: Box::new(matcher),
            reflexive: true,
        }
    }

    /// When enabled (the default), a query over the closure predicate itself
    /// also yields `(x, predicate, x)` for every `x` in the closure.
    pub fn reflexive(mut self, reflexive: bool) -> Self {
        self.reflexive = reflexive;
        self
    }

    fn entail(
        &self,
        next: &dyn TripleStore,
        rows: Vec<Triple>,
        request: &ClosureRequest,
        pattern: &TriplePattern,
        context: Option<&Term>,
        limit: Option<&BTreeSet<Term>>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        let back = request.direction.opposite();
        let mut expansions: AHashMap<Term, Vec<Term>> = AHashMap::new();
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let value = row.get(request.position);
            if !expansions.contains_key(value) {
                let closure =
                    transitive_lookup(next, value, &request.predicate, context, back, None)?;
                let bounded = match limit {
                    Some(limit) => closure.intersection(limit).cloned().collect(),
                    None => closure.into_iter().collect(),
                };
                expansions.insert(value.clone(), bounded);
            }
            for entailed in &expansions[value] {
                out.push(row.with(request.position, entailed.clone()));
            }
        }
        if self.reflexive {
            if let Some(limit) = limit {
                out.extend(reflexive_rows(request, pattern, limit));
            }
        }
        Ok(finish(out))
    }
}

/// Several start terms only make sense when the query lists choices at the
/// closure position.
fn single_start<'r>(
    request: &'r ClosureRequest,
    pattern: &TriplePattern,
) -> Result<&'r Term, ObjectGraphError> {
    match request.start.as_slice() {
        [start] => Ok(start),
        _ => Err(ObjectGraphError::configuration(format!(
            "closure over {} start terms needs a choice list at {:?} in {pattern}",
            request.start.len(),
            request.position
        ))),
    }
}

fn reflexive_rows(
    request: &ClosureRequest,
    pattern: &TriplePattern,
    limit: &BTreeSet<Term>,
) -> Vec<Triple> {
    let Some(other) = request.position.other_end() else {
        return Vec::new();
    };
    if pattern.predicate.as_exact() != Some(&request.predicate) {
        return Vec::new();
    }
    limit
        .iter()
        .filter(|term| pattern.get(other).matches(term))
        .map(|term| Triple::new(term.clone(), request.predicate.clone(), term.clone()))
        .collect()
}

impl QueryLayer for ZeroOrMoreLayer {
    fn name(&self) -> &'static str {
        "zero_or_more"
    }

    fn triples(
        &self,
        next: &dyn TripleStore,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        let Some(request) = (self.matcher)(pattern) else {
            return next.triples(pattern, context);
        };
        debug!(%pattern, ?request, "zero_or_more: expanding triples");
        if request.start.is_empty() {
            let rows = next.triples_choices(pattern, context)?;
            return self.entail(next, rows, &request, pattern, context, None);
        }
        single_start(&request, pattern)?;
        let closure = transitive_lookup_all(
            next,
            &request.start,
            &request.predicate,
            context,
            request.direction,
        )?;
        let widened = pattern.with(
            request.position,
            PatternTerm::choices(closure.iter().cloned()),
        );
        let rows = next.triples_choices(&widened, context)?;
        self.entail(next, rows, &request, pattern, context, Some(&closure))
    }

    fn triples_choices(
        &self,
        next: &dyn TripleStore,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        let Some(request) = (self.matcher)(pattern) else {
            return next.triples_choices(pattern, context);
        };
        debug!(%pattern, ?request, "zero_or_more: expanding triples_choices");
        if request.start.is_empty() {
            let rows = next.triples_choices(pattern, context)?;
            return self.entail(next, rows, &request, pattern, context, None);
        }
        if let PatternTerm::Choices(listed) = pattern.get(request.position) {
            let seeds: BTreeSet<&Term> = listed.iter().chain(&request.start).collect();
            let matches = transitive_lookup_all(
                next,
                seeds,
                &request.predicate,
                context,
                request.direction,
            )?;
            let widened = pattern.with(
                request.position,
                PatternTerm::choices(matches.iter().cloned()),
            );
            let rows = next.triples_choices(&widened, context)?;
            return self.entail(next, rows, &request, pattern, context, Some(&matches));
        }
        let start = single_start(&request, pattern)?;
        let closure = transitive_lookup(
            next,
            start,
            &request.predicate,
            context,
            request.direction,
            None,
        )?;
        let mut rows = Vec::new();
        for member in &closure {
            let narrowed = pattern.with(request.position, PatternTerm::Exact(member.clone()));
            rows.extend(next.triples_choices(&narrowed, context)?);
        }
        self.entail(next, finish(rows), &request, pattern, context, Some(&closure))
    }
}
