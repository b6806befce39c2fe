//! Composable request/response transformers over a [`TripleStore`].
//!
//! A [`LayerStack`] owns a base store and an ordered list of layers. Layers
//! are consulted in the order they were added: the first one sees the caller's
//! query, the last one talks to the base store. Each layer only ever reads
//! through the stage below it; none mutates the store.
//!
//! Put the range layer above closure layers so range rewriting happens before
//! closure expansion.

mod container;
mod matchers;
mod range;
mod zero_or_more;

pub use container::ContainerMembershipLayer;
pub use matchers::{
    subclass_of_matcher, subclass_of_matcher_for, subclass_of_subclass_of_matcher,
    subproperty_of_matcher,
};
pub use range::RangeLayer;
pub use zero_or_more::{ClosureRequest, Matcher, ZeroOrMoreLayer};

use crate::{
    errors::ObjectGraphError,
    pattern::TriplePattern,
    store::TripleStore,
    term::{Term, Triple},
};

/// One transformer in a [`LayerStack`]. `next` is the stage directly below.
pub trait QueryLayer {
    fn name(&self) -> &'static str;

    fn triples(
        &self,
        next: &dyn TripleStore,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError>;

    fn triples_choices(
        &self,
        next: &dyn TripleStore,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError>;

    fn supports_range_queries(&self, next: &dyn TripleStore) -> bool {
        next.supports_range_queries()
    }
}

pub struct LayerStack<S> {
    base: S,
    layers: Vec<Box<dyn QueryLayer>>,
}

impl<S: TripleStore> LayerStack<S> {
    pub fn new(base: S) -> Self {
        Self {
            base,
            layers: Vec::new(),
        }
    }

    /// Appends `layer` below the layers already present.
    pub fn with<L: QueryLayer + 'static>(mut self, layer: L) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    pub fn push(&mut self, layer: Box<dyn QueryLayer>) {
        self.layers.push(layer);
    }

    pub fn base(&self) -> &S {
        &self.base
    }

    pub fn into_base(self) -> S {
        self.base
    }

    /// Layer names from top to bottom.
    pub fn layer_names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }

    fn stage(&self, index: usize) -> Stage<'_, S> {
        Stage { stack: self, index }
    }
}

/// The view of a stack from layer `index` downwards.
struct Stage<'a, S> {
    stack: &'a LayerStack<S>,
    index: usize,
}

impl<S: TripleStore> TripleStore for Stage<'_, S> {
    fn triples(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        match self.stack.layers.get(self.index) {
            Some(layer) => layer.triples(&self.stack.stage(self.index + 1), pattern, context),
            None => self.stack.base.triples(pattern, context),
        }
    }

    fn triples_choices(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        match self.stack.layers.get(self.index) {
            Some(layer) => {
                layer.triples_choices(&self.stack.stage(self.index + 1), pattern, context)
            }
            None => self.stack.base.triples_choices(pattern, context),
        }
    }

    fn supports_range_queries(&self) -> bool {
        match self.stack.layers.get(self.index) {
            Some(layer) => layer.supports_range_queries(&self.stack.stage(self.index + 1)),
            None => self.stack.base.supports_range_queries(),
        }
    }
}

impl<S: TripleStore> TripleStore for LayerStack<S> {
    fn triples(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        self.stage(0).triples(pattern, context)
    }

    fn triples_choices(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        self.stage(0).triples_choices(pattern, context)
    }

    fn supports_range_queries(&self) -> bool {
        self.stage(0).supports_range_queries()
    }
}

/// Wraps `store` in a single layer.
pub fn layer<S, L>(store: S, layer: L) -> LayerStack<S>
where
    S: TripleStore,
    L: QueryLayer + 'static,
{
    LayerStack::new(store).with(layer)
}

/// The stack every query runs through unless told otherwise: range handling
/// only.
pub fn default_layers<S: TripleStore>(store: S) -> LayerStack<S> {
    LayerStack::new(store).with(RangeLayer)
}
