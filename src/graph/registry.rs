//! Predicate registry: maps accessor names and predicates to edge descriptors.

use ahash::AHashMap;

use crate::{errors::ObjectGraphError, term::Term};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Accessor name used by the object layer.
    pub name: String,
    pub link: Term,
    /// Multi-valued descriptors append; single-valued ones replace.
    pub multiple: bool,
}

impl PropertyDescriptor {
    pub fn single(name: impl Into<String>, link: Term) -> Self {
        Self {
            name: name.into(),
            link,
            multiple: false,
        }
    }

    pub fn multiple(name: impl Into<String>, link: Term) -> Self {
        Self {
            name: name.into(),
            link,
            multiple: true,
        }
    }
}

/// Descriptors for one node type, built once and looked up by key.
#[derive(Clone, Debug, Default)]
pub struct PropertyRegistry {
    class: Option<Term>,
    descriptors: Vec<PropertyDescriptor>,
    by_name: AHashMap<String, usize>,
    by_link: AHashMap<Term, usize>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_class(class: Term) -> Self {
        Self {
            class: Some(class),
            ..Self::default()
        }
    }

    pub fn class(&self) -> Option<&Term> {
        self.class.as_ref()
    }

    pub fn register(&mut self, descriptor: PropertyDescriptor) -> Result<(), ObjectGraphError> {
        if descriptor.name.trim().is_empty() {
            return Err(ObjectGraphError::configuration(
                "property name must be set",
            ));
        }
        if self.by_name.contains_key(&descriptor.name) {
            return Err(ObjectGraphError::configuration(format!(
                "property {} registered twice",
                descriptor.name
            )));
        }
        if self.by_link.contains_key(&descriptor.link) {
            return Err(ObjectGraphError::configuration(format!(
                "predicate {} already has a descriptor",
                descriptor.link
            )));
        }
        let idx = self.descriptors.len();
        self.by_name.insert(descriptor.name.clone(), idx);
        self.by_link.insert(descriptor.link.clone(), idx);
        self.descriptors.push(descriptor);
        Ok(())
    }

    pub fn with(mut self, descriptor: PropertyDescriptor) -> Result<Self, ObjectGraphError> {
        self.register(descriptor)?;
        Ok(self)
    }

    pub fn by_name(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.by_name.get(name).map(|idx| &self.descriptors[*idx])
    }

    pub fn by_link(&self, link: &Term) -> Option<&PropertyDescriptor> {
        self.by_link.get(link).map(|idx| &self.descriptors[*idx])
    }

    pub fn descriptors(&self) -> &[PropertyDescriptor] {
        &self.descriptors
    }
}
