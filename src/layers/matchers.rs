//! Ready-made matchers for [`ZeroOrMoreLayer`](super::ZeroOrMoreLayer).

use crate::{
    layers::ClosureRequest,
    pattern::{PatternTerm, TriplePattern},
    term::{Direction, Position, Term},
    vocab,
};

fn bound_terms(term: &PatternTerm) -> Option<Vec<Term>> {
    match term {
        PatternTerm::Exact(term) => Some(vec![term.clone()]),
        PatternTerm::Choices(list) => Some(list.clone()),
        _ => None,
    }
}

fn sub_class_request(start: Vec<Term>) -> ClosureRequest {
    ClosureRequest {
        start,
        predicate: vocab::rdfs_sub_class_of(),
        direction: Direction::Up,
        position: Position::Object,
    }
}

/// `(?, rdf:type, C)` for any bound `C`: also returns instances of every
/// sub-class of `C`.
pub fn subclass_of_matcher() -> impl Fn(&TriplePattern) -> Option<ClosureRequest> + Send + Sync {
    |pattern| {
        if !pattern.predicate.mentions(&vocab::rdf_type()) {
            return None;
        }
        bound_terms(&pattern.object).map(sub_class_request)
    }
}

/// Like [`subclass_of_matcher`] but only for queries naming `target`.
pub fn subclass_of_matcher_for(
    target: Term,
) -> impl Fn(&TriplePattern) -> Option<ClosureRequest> + Send + Sync {
    move |pattern| {
        if pattern.predicate.mentions(&vocab::rdf_type()) && pattern.object.mentions(&target) {
            Some(sub_class_request(vec![target.clone()]))
        } else {
            None
        }
    }
}

/// `(?, rdfs:subClassOf, class)`: every transitive sub-class of `class`,
/// `class` included.
pub fn subclass_of_subclass_of_matcher(
    class: Term,
) -> impl Fn(&TriplePattern) -> Option<ClosureRequest> + Send + Sync {
    move |pattern| {
        if pattern.predicate.mentions(&vocab::rdfs_sub_class_of())
            && pattern.object.mentions(&class)
        {
            Some(sub_class_request(vec![class.clone()]))
        } else {
            None
        }
    }
}

/// `(?, super_property, ?)`: statements made with any sub-property of
/// `super_property` are reported under `super_property` as well.
pub fn subproperty_of_matcher(
    super_property: Term,
) -> impl Fn(&TriplePattern) -> Option<ClosureRequest> + Send + Sync {
    move |pattern| {
        if pattern.predicate.as_exact() != Some(&super_property) {
            return None;
        }
        Some(ClosureRequest {
            start: vec![super_property.clone()],
            predicate: vocab::rdfs_sub_property_of(),
            direction: Direction::Up,
            position: Position::Predicate,
        })
    }
}
