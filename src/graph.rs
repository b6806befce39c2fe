//! In-memory property graph handed to the query and reachability engines.
//!
//! Nodes and property edges live in an arena and are addressed by
//! [`NodeId`] / [`PropertyId`]. Traversals track visited nodes by handle, so
//! two distinct undefined nodes are never merged even though both are
//! "unknown".

mod registry;
mod types;

pub use registry::{PropertyDescriptor, PropertyRegistry};
pub use types::{NodeId, NodeKind, PropertyId, Statement, Token, Variable};

use types::{NodeData, PropertyData};

use crate::{range::InRange, term::Term};

#[derive(Clone, Debug, Default)]
pub struct ObjectGraph {
    nodes: Vec<NodeData>,
    properties: Vec<PropertyData>,
    next_variable: u32,
}

impl ObjectGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_defined(&mut self, identifier: Term) -> NodeId {
        self.push_node(NodeKind::Defined(identifier))
    }

    /// Adds an unbound node with a fresh variable token.
    pub fn add_undefined(&mut self) -> NodeId {
        let var = Variable(self.next_variable);
        self.next_variable += 1;
        self.push_node(NodeKind::Undefined(var))
    }

    pub fn add_range(&mut self, range: InRange) -> NodeId {
        self.push_node(NodeKind::Range(range))
    }

    /// Declares a new, empty property edge on `owner`.
    pub fn add_property(&mut self, owner: NodeId, link: Term) -> PropertyId {
        let id = PropertyId(self.properties.len());
        self.properties.push(PropertyData {
            link,
            owner,
            values: Vec::new(),
        });
        self.nodes[owner.0].properties.push(id);
        id
    }

    pub fn add_value(&mut self, property: PropertyId, value: NodeId) {
        let data = &mut self.properties[property.0];
        if data.values.contains(&value) {
            return;
        }
        data.values.push(value);
        let owners = &mut self.nodes[value.0].owner_properties;
        if !owners.contains(&property) {
            owners.push(property);
        }
    }

    /// Replaces every value of `property` with `value`.
    pub fn set_value(&mut self, property: PropertyId, value: NodeId) {
        let old = std::mem::take(&mut self.properties[property.0].values);
        for prev in old {
            self.nodes[prev.0]
                .owner_properties
                .retain(|candidate| *candidate != property);
        }
        self.add_value(property, value);
    }

    /// Convenience for a single statement `owner --link--> value` on a fresh edge.
    pub fn relate(&mut self, owner: NodeId, link: Term, value: NodeId) -> PropertyId {
        let property = self.add_property(owner, link);
        self.add_value(property, value);
        property
    }

    /// The property of `owner` carrying `descriptor`'s predicate, created on
    /// first use.
    pub fn attach(&mut self, owner: NodeId, descriptor: &PropertyDescriptor) -> PropertyId {
        match self.property_with_link(owner, &descriptor.link) {
            Some(existing) => existing,
            None => self.add_property(owner, descriptor.link.clone()),
        }
    }

    /// Sets or appends `value` depending on the descriptor's cardinality.
    pub fn set(
        &mut self,
        owner: NodeId,
        descriptor: &PropertyDescriptor,
        value: NodeId,
    ) -> PropertyId {
        let property = self.attach(owner, descriptor);
        if descriptor.multiple {
            self.add_value(property, value);
        } else {
            self.set_value(property, value);
        }
        property
    }

    pub fn property_with_link(&self, owner: NodeId, link: &Term) -> Option<PropertyId> {
        self.nodes[owner.0]
            .properties
            .iter()
            .copied()
            .find(|prop| &self.properties[prop.0].link == link)
    }

    /// Looks a property up through the registry by accessor name.
    pub fn property_named(
        &self,
        owner: NodeId,
        registry: &PropertyRegistry,
        name: &str,
    ) -> Option<PropertyId> {
        let descriptor = registry.by_name(name)?;
        self.property_with_link(owner, &descriptor.link)
    }

    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.0].kind
    }

    pub fn is_defined(&self, node: NodeId) -> bool {
        matches!(self.kind(node), NodeKind::Defined(_))
    }

    pub fn is_range(&self, node: NodeId) -> bool {
        matches!(self.kind(node), NodeKind::Range(_))
    }

    /// Defined nodes and bounded ranges are the anchors queries resolve from.
    pub fn is_anchor(&self, node: NodeId) -> bool {
        match self.kind(node) {
            NodeKind::Defined(_) => true,
            NodeKind::Range(range) => range.is_defined(),
            NodeKind::Undefined(_) => false,
        }
    }

    pub fn identifier(&self, node: NodeId) -> Option<&Term> {
        match self.kind(node) {
            NodeKind::Defined(term) => Some(term),
            _ => None,
        }
    }

    pub fn variable(&self, node: NodeId) -> Option<Variable> {
        match self.kind(node) {
            NodeKind::Undefined(var) => Some(*var),
            _ => None,
        }
    }

    pub fn token(&self, node: NodeId) -> Token {
        match self.kind(node) {
            NodeKind::Defined(term) => Token::Term(term.clone()),
            NodeKind::Undefined(var) => Token::Variable(*var),
            NodeKind::Range(range) => Token::Range(range.clone()),
        }
    }

    /// Value equality of two nodes: equal identity tokens.
    pub fn same_identity(&self, a: NodeId, b: NodeId) -> bool {
        a == b || self.token(a) == self.token(b)
    }

    pub fn properties(&self, node: NodeId) -> &[PropertyId] {
        &self.nodes[node.0].properties
    }

    pub fn owner_properties(&self, node: NodeId) -> &[PropertyId] {
        &self.nodes[node.0].owner_properties
    }

    pub fn link(&self, property: PropertyId) -> &Term {
        &self.properties[property.0].link
    }

    pub fn owner(&self, property: PropertyId) -> NodeId {
        self.properties[property.0].owner
    }

    pub fn values(&self, property: PropertyId) -> &[NodeId] {
        &self.properties[property.0].values
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// First defined node carrying `identifier`.
    pub fn find(&self, identifier: &Term) -> Option<NodeId> {
        self.node_ids()
            .find(|node| self.identifier(*node) == Some(identifier))
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            properties: Vec::new(),
            owner_properties: Vec::new(),
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(name: &str) -> Term {
        Term::iri(format!("http://example.org/{name}"))
    }

    #[test]
    fn edges_are_registered_on_both_ends() {
        let mut graph = ObjectGraph::new();
        let a = graph.add_defined(iri("a"));
        let b = graph.add_undefined();
        let prop = graph.relate(a, iri("p"), b);
        assert_eq!(graph.properties(a), &[prop]);
        assert_eq!(graph.owner_properties(b), &[prop]);
        assert_eq!(graph.owner(prop), a);
        assert_eq!(graph.values(prop), &[b]);
    }

    #[test]
    fn appending_to_one_edge_leaves_others_untouched() {
        let mut graph = ObjectGraph::new();
        let a = graph.add_defined(iri("a"));
        let b = graph.add_defined(iri("b"));
        let c = graph.add_defined(iri("c"));
        let first = graph.relate(a, iri("p"), b);
        let second = graph.relate(a, iri("p"), b);
        graph.add_value(first, c);
        assert_eq!(graph.values(first), &[b, c]);
        assert_eq!(graph.values(second), &[b]);
    }

    #[test]
    fn undefined_nodes_get_distinct_variables() {
        let mut graph = ObjectGraph::new();
        let x = graph.add_undefined();
        let y = graph.add_undefined();
        assert_ne!(graph.variable(x), graph.variable(y));
        assert!(!graph.same_identity(x, y));
    }

    #[test]
    fn defined_nodes_with_same_identifier_are_equal() {
        let mut graph = ObjectGraph::new();
        let x = graph.add_defined(iri("same"));
        let y = graph.add_defined(iri("same"));
        assert!(graph.same_identity(x, y));
        assert_ne!(x, y);
    }

    #[test]
    fn single_valued_descriptor_replaces_value() {
        let mut graph = ObjectGraph::new();
        let descriptor = PropertyDescriptor::single("name", iri("name"));
        let owner = graph.add_defined(iri("owner"));
        let first = graph.add_defined(Term::text("first"));
        let second = graph.add_defined(Term::text("second"));
        let prop = graph.set(owner, &descriptor, first);
        let again = graph.set(owner, &descriptor, second);
        assert_eq!(prop, again);
        assert_eq!(graph.values(prop), &[second]);
        assert!(graph.owner_properties(first).is_empty());
    }

    #[test]
    fn multi_valued_descriptor_appends() {
        let mut graph = ObjectGraph::new();
        let registry = PropertyRegistry::new()
            .with(PropertyDescriptor::multiple("friend", iri("friend")))
            .unwrap();
        let descriptor = registry.by_name("friend").unwrap().clone();
        let owner = graph.add_defined(iri("owner"));
        let a = graph.add_defined(iri("a"));
        let b = graph.add_defined(iri("b"));
        graph.set(owner, &descriptor, a);
        graph.set(owner, &descriptor, b);
        let prop = graph.property_named(owner, &registry, "friend").unwrap();
        assert_eq!(graph.values(prop), &[a, b]);
    }
}
