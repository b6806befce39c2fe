use crate::{
    errors::ObjectGraphError,
    layers::QueryLayer,
    pattern::TriplePattern,
    store::{TripleStore, finish},
    term::{Term, Triple},
    vocab,
};

/// Entails `(p, rdfs:subPropertyOf, rdfs:member)` for every `p` typed as an
/// `rdfs:ContainerMembershipProperty` when a query asks for sub-properties
/// of `rdfs:member`.
pub struct ContainerMembershipLayer;

impl ContainerMembershipLayer {
    fn asks_for_members(pattern: &TriplePattern) -> bool {
        pattern.predicate.mentions(&vocab::rdfs_sub_property_of())
            && pattern.object.mentions(&vocab::rdfs_member())
    }

    fn membership_rows(
        next: &dyn TripleStore,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        let typed = TriplePattern::new(
            pattern.subject.clone(),
            vocab::rdf_type(),
            vocab::rdfs_container_membership_property(),
        );
        let rows = if typed.has_choices() {
            next.triples_choices(&typed, context)?
        } else {
            next.triples(&typed, context)?
        };
        Ok(rows
            .into_iter()
            .map(|row| {
                Triple::new(
                    row.subject,
                    vocab::rdfs_sub_property_of(),
                    vocab::rdfs_member(),
                )
            })
            .collect())
    }
}

impl QueryLayer for ContainerMembershipLayer {
    fn name(&self) -> &'static str {
        "container_membership"
    }

    fn triples(
        &self,
        next: &dyn TripleStore,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        let mut rows = next.triples(pattern, context)?;
        if Self::asks_for_members(pattern) {
            rows.extend(Self::membership_rows(next, pattern, context)?);
        }
        Ok(finish(rows))
    }

    fn triples_choices(
        &self,
        next: &dyn TripleStore,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        let mut rows = next.triples_choices(pattern, context)?;
        if Self::asks_for_members(pattern) {
            rows.extend(Self::membership_rows(next, pattern, context)?);
        }
        Ok(finish(rows))
    }
}
