//! Regions: one axis of the active configuration.

use crate::core::Node;
use std::fmt;

/// One active state inside a region, with the value constructed for it.
///
/// Only the deepest level of a region may own nested regions (when it is an
/// orthogonal composite).
pub(crate) struct Level<N: Node> {
    pub(crate) state: N::State,
    pub(crate) node: N,
    pub(crate) regions: Vec<Region<N>>,
}

/// An independent axis holding exactly one current state while running.
///
/// The machine owns the top-level region (`tag() == None`); every orthogonal
/// composite owns one region per declared region tag. A region's slot is the
/// chain of levels from its outermost active state down to the deepest one.
/// The engine is the only writer; this type exposes observation only.
pub struct Region<N: Node> {
    pub(crate) tag: Option<N::State>,
    pub(crate) path: Vec<Level<N>>,
}

impl<N: Node> Region<N> {
    pub(crate) fn new(tag: Option<N::State>) -> Self {
        Self {
            tag,
            path: Vec::new(),
        }
    }

    /// Region tag; `None` for the machine's top-level region.
    pub fn tag(&self) -> Option<N::State> {
        self.tag
    }

    /// Deepest active state of this axis.
    pub fn current_tag(&self) -> Option<N::State> {
        self.path.last().map(|level| level.state)
    }

    pub fn is_running(&self) -> bool {
        !self.path.is_empty()
    }

    /// Regions of the orthogonal composite ending this axis, if any.
    pub fn regions(&self) -> &[Region<N>] {
        self.path
            .last()
            .map(|level| level.regions.as_slice())
            .unwrap_or(&[])
    }

    /// Active states of this region and of every nested region, outermost
    /// first, nested regions in declaration order.
    pub fn active_states(&self) -> Vec<N::State> {
        let mut states = Vec::new();
        self.collect_states(&mut states);
        states
    }

    fn collect_states(&self, states: &mut Vec<N::State>) {
        for level in &self.path {
            states.push(level.state);
            for region in &level.regions {
                region.collect_states(states);
            }
        }
    }

    /// Deepest state of every axis below and including this one.
    pub fn leaves(&self) -> Vec<N::State> {
        let nested = self.regions();
        if nested.is_empty() {
            return self.current_tag().into_iter().collect();
        }
        nested.iter().flat_map(Region::leaves).collect()
    }

    /// This region and all nested regions, depth first.
    pub fn walk(&self) -> Vec<&Region<N>> {
        let mut regions = vec![self];
        for region in self.regions() {
            regions.extend(region.walk());
        }
        regions
    }

    /// Value of the active state `state`, if it is active here or below.
    pub fn node(&self, state: N::State) -> Option<&N> {
        self.path.iter().find_map(|level| {
            if level.state == state {
                return Some(&level.node);
            }
            level.regions.iter().find_map(|region| region.node(state))
        })
    }
}

impl<N: Node> fmt::Debug for Region<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("tag", &self.tag)
            .field("active", &self.active_states())
            .finish()
    }
}
