//! RDF and RDFS terms the layers reason over.

use crate::term::Term;

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";

pub fn rdf_type() -> Term {
    Term::iri(format!("{RDF_NS}type"))
}

pub fn rdfs_sub_class_of() -> Term {
    Term::iri(format!("{RDFS_NS}subClassOf"))
}

pub fn rdfs_sub_property_of() -> Term {
    Term::iri(format!("{RDFS_NS}subPropertyOf"))
}

pub fn rdfs_member() -> Term {
    Term::iri(format!("{RDFS_NS}member"))
}

pub fn rdfs_container_membership_property() -> Term {
    Term::iri(format!("{RDFS_NS}ContainerMembershipProperty"))
}
