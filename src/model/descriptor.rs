//! Static description of one state.

use crate::core::State;
use serde::{Deserialize, Serialize};

/// Shape of a state in the hierarchy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum StateKind<S: State> {
    /// No nested region; the only kind that can end an axis.
    Leaf,
    /// Sequential composite entering `initial` when entered itself.
    Composite { initial: S },
    /// Orthogonal composite owning two or more regions, in declaration order.
    Orthogonal { regions: Vec<S> },
    /// Region pseudo-state of an orthogonal composite.
    Region { initial: S },
}

impl<S: State> StateKind<S> {
    /// Initial child entered by the cascade, if any.
    pub fn initial(&self) -> Option<S> {
        match self {
            StateKind::Composite { initial } | StateKind::Region { initial } => Some(*initial),
            StateKind::Leaf | StateKind::Orthogonal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, StateKind::Leaf)
    }

    pub fn is_orthogonal(&self) -> bool {
        matches!(self, StateKind::Orthogonal { .. })
    }

    pub fn is_region(&self) -> bool {
        matches!(self, StateKind::Region { .. })
    }
}

/// Identity, parent, shape and precomputed ancestor chain of one state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateDescriptor<S: State> {
    pub state: S,
    /// `None` for top-level states, whose parent is the implicit root.
    pub parent: Option<S>,
    pub kind: StateKind<S>,
    pub(crate) ancestors: Vec<S>,
}

impl<S: State> StateDescriptor<S> {
    /// Chain from the outermost ancestor down to this state itself.
    pub fn ancestors(&self) -> &[S] {
        &self.ancestors
    }

    /// Nesting depth; top-level states are at depth 1.
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// Whether `other` is this state or one of its ancestors.
    pub fn descends_from(&self, other: S) -> bool {
        self.ancestors.contains(&other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;

    state_enum! {
        enum Tag {
            Outer,
            Inner,
            Left,
        }
    }

    #[test]
    fn initial_is_reported_for_cascading_kinds() {
        assert_eq!(StateKind::Composite { initial: Tag::Inner }.initial(), Some(Tag::Inner));
        assert_eq!(StateKind::Region { initial: Tag::Inner }.initial(), Some(Tag::Inner));
        assert_eq!(StateKind::<Tag>::Leaf.initial(), None);
        assert_eq!(
            StateKind::Orthogonal { regions: vec![Tag::Left] }.initial(),
            None
        );
    }

    #[test]
    fn descends_from_includes_self() {
        let descriptor = StateDescriptor {
            state: Tag::Inner,
            parent: Some(Tag::Outer),
            kind: StateKind::Leaf,
            ancestors: vec![Tag::Outer, Tag::Inner],
        };

        assert!(descriptor.descends_from(Tag::Inner));
        assert!(descriptor.descends_from(Tag::Outer));
        assert!(!descriptor.descends_from(Tag::Left));
        assert_eq!(descriptor.depth(), 2);
    }
}
