use crate::{query::preparer::Hop, vocab};

/// Selectivity hint for a hop: lower runs first.
///
/// A score should depend only on the hop itself, not on hops resolved
/// before it.
pub trait HopScorer {
    fn score(&self, hop: &Hop) -> i64;
}

impl<F> HopScorer for F
where
    F: Fn(&Hop) -> i64,
{
    fn score(&self, hop: &Hop) -> i64 {
        self(hop)
    }
}

/// Runs `rdf:type` hops after every other hop.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeLastScorer;

impl HopScorer for TypeLastScorer {
    fn score(&self, hop: &Hop) -> i64 {
        if hop.predicate == vocab::rdf_type() { 1 } else { 0 }
    }
}
