use crate::{
    errors::ObjectGraphError,
    layers::QueryLayer,
    pattern::{PatternTerm, TriplePattern},
    store::TripleStore,
    term::{Position, Term, Triple},
};

/// Handles [`PatternTerm::Range`] in the object position.
///
/// Stores that evaluate ranges natively receive the pattern unchanged. For the
/// rest the object becomes a wildcard and results are filtered here. An
/// unbounded range is always treated as a wildcard.
pub struct RangeLayer;

impl RangeLayer {
    fn rewrite(
        &self,
        next: &dyn TripleStore,
        pattern: &TriplePattern,
        context: Option<&Term>,
        choices: bool,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        let PatternTerm::Range(range) = &pattern.object else {
            return query(next, pattern, context, choices);
        };
        let open = pattern.with(Position::Object, PatternTerm::Any);
        if !range.is_defined() {
            return query(next, &open, context, choices);
        }
        if next.supports_range_queries() {
            return query(next, pattern, context, choices);
        }
        let rows = query(next, &open, context, choices)?;
        Ok(rows
            .into_iter()
            .filter(|row| range.contains(&row.object))
            .collect())
    }
}

fn query(
    next: &dyn TripleStore,
    pattern: &TriplePattern,
    context: Option<&Term>,
    choices: bool,
) -> Result<Vec<Triple>, ObjectGraphError> {
    if choices {
        next.triples_choices(pattern, context)
    } else {
        next.triples(pattern, context)
    }
}

impl QueryLayer for RangeLayer {
    fn name(&self) -> &'static str {
        "range"
    }

    fn triples(
        &self,
        next: &dyn TripleStore,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        self.rewrite(next, pattern, context, false)
    }

    fn triples_choices(
        &self,
        next: &dyn TripleStore,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        self.rewrite(next, pattern, context, true)
    }

    fn supports_range_queries(&self, _next: &dyn TripleStore) -> bool {
        true
    }
}
