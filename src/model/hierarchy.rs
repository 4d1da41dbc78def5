//! Validated hierarchy table.

use super::descriptor::{StateDescriptor, StateKind};
use crate::core::State;
use std::collections::HashMap;

/// Immutable table of every state of a machine.
///
/// Obtained from [`HierarchyBuilder::build`], which guarantees that parents
/// exist, that every composite and region has an initial child among its own
/// children, and that ancestor chains form a tree.
///
/// [`HierarchyBuilder::build`]: crate::builder::HierarchyBuilder::build
#[derive(Clone, Debug)]
pub struct Hierarchy<S: State> {
    initial: S,
    order: Vec<S>,
    descriptors: HashMap<S, StateDescriptor<S>>,
}

impl<S: State> Hierarchy<S> {
    /// Assemble a table from descriptors whose ancestor chains are computed.
    pub(crate) fn from_descriptors(initial: S, descriptors: Vec<StateDescriptor<S>>) -> Self {
        let order = descriptors.iter().map(|d| d.state).collect();
        let descriptors = descriptors.into_iter().map(|d| (d.state, d)).collect();
        Self {
            initial,
            order,
            descriptors,
        }
    }

    /// Top-level state entered when the machine starts.
    pub fn initial(&self) -> S {
        self.initial
    }

    pub fn descriptor(&self, state: S) -> Option<&StateDescriptor<S>> {
        self.descriptors.get(&state)
    }

    pub fn kind(&self, state: S) -> Option<&StateKind<S>> {
        self.descriptor(state).map(|d| &d.kind)
    }

    pub fn parent(&self, state: S) -> Option<S> {
        self.descriptor(state).and_then(|d| d.parent)
    }

    /// Chain from the outermost ancestor down to `state` itself.
    pub fn ancestors(&self, state: S) -> Option<&[S]> {
        self.descriptor(state).map(StateDescriptor::ancestors)
    }

    pub fn contains(&self, state: S) -> bool {
        self.descriptors.contains_key(&state)
    }

    pub fn is_leaf(&self, state: S) -> bool {
        self.kind(state).is_some_and(StateKind::is_leaf)
    }

    /// Direct children of `parent` (`None` for top-level states), in
    /// declaration order.
    pub fn children(&self, parent: Option<S>) -> Vec<S> {
        self.order
            .iter()
            .copied()
            .filter(|s| self.parent(*s) == parent)
            .collect()
    }

    /// Deepest state that is an ancestor-or-self of both `a` and `b`.
    ///
    /// `None` means the machine root, or that one of the tags is unknown.
    pub fn lca(&self, a: S, b: S) -> Option<S> {
        let (a, b) = (self.ancestors(a)?, self.ancestors(b)?);
        a.iter()
            .zip(b.iter())
            .take_while(|(x, y)| x == y)
            .last()
            .map(|(x, _)| *x)
    }

    /// Descriptors in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &StateDescriptor<S>> {
        self.order.iter().filter_map(|s| self.descriptors.get(s))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
