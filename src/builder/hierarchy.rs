//! Builder for hierarchy tables.

use crate::builder::error::{BuildError, HierarchyViolation};
use crate::core::State;
use crate::model::{Hierarchy, StateDescriptor, StateKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Declared shape of a state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", bound = "")]
pub enum Shape<S: State> {
    Leaf,
    Composite { initial: S },
    Orthogonal { regions: Vec<RegionDeclaration<S>> },
}

impl<S: State> Default for Shape<S> {
    fn default() -> Self {
        Shape::Leaf
    }
}

/// Region of an orthogonal state: the region's own tag and its initial state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct RegionDeclaration<S: State> {
    pub region: S,
    pub initial: S,
}

/// Declaration of one state, as written by the user or read from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Declaration<S: State> {
    pub state: S,
    #[serde(default)]
    pub parent: Option<S>,
    #[serde(default)]
    pub shape: Shape<S>,
}

/// Builder for hierarchy tables with a fluent API.
///
/// Region tags of orthogonal states are declared implicitly by
/// [`orthogonal`](Self::orthogonal); states inside a region name the region
/// tag as their parent.
///
/// # Example
///
/// ```rust
/// use stratum::builder::HierarchyBuilder;
/// use stratum::state_enum;
///
/// state_enum! {
///     enum Player {
///         Powered,
///         Stopped,
///         Playing,
///         Off,
///     }
/// }
///
/// let hierarchy = HierarchyBuilder::new()
///     .initial(Player::Off)
///     .leaf(Player::Off, None)
///     .composite(Player::Powered, None, Player::Stopped)
///     .leaf(Player::Stopped, Player::Powered)
///     .leaf(Player::Playing, Player::Powered)
///     .build()
///     .unwrap();
///
/// assert_eq!(hierarchy.parent(Player::Playing), Some(Player::Powered));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct HierarchyBuilder<S: State> {
    #[serde(default)]
    initial: Option<S>,
    #[serde(default)]
    states: Vec<Declaration<S>>,
}

/// Flattened view of a declaration: regions become states of their own.
struct Entry<S: State> {
    state: S,
    parent: Option<S>,
    kind: StateKind<S>,
}

impl<S: State> HierarchyBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
        }
    }

    /// Parse a declaration from JSON. Validation happens in [`build`](Self::build).
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the declaration to JSON.
    pub fn to_json(&self) -> Result<String, BuildError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set the top-level state entered on start (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Declare a leaf state.
    pub fn leaf(self, state: S, parent: impl Into<Option<S>>) -> Self {
        self.declare(Declaration {
            state,
            parent: parent.into(),
            shape: Shape::Leaf,
        })
    }

    /// Declare a sequential composite entering `initial` by default.
    pub fn composite(self, state: S, parent: impl Into<Option<S>>, initial: S) -> Self {
        self.declare(Declaration {
            state,
            parent: parent.into(),
            shape: Shape::Composite { initial },
        })
    }

    /// Declare an orthogonal composite from `(region, initial)` pairs.
    pub fn orthogonal<I>(self, state: S, parent: impl Into<Option<S>>, regions: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
    {
        let regions = regions
            .into_iter()
            .map(|(region, initial)| RegionDeclaration { region, initial })
            .collect();
        self.declare(Declaration {
            state,
            parent: parent.into(),
            shape: Shape::Orthogonal { regions },
        })
    }

    /// Add a prepared declaration.
    pub fn declare(mut self, declaration: Declaration<S>) -> Self {
        self.states.push(declaration);
        self
    }

    /// Declarations added so far.
    pub fn declarations(&self) -> &[Declaration<S>] {
        &self.states
    }

    fn entries(&self) -> Vec<Entry<S>> {
        let mut entries = Vec::with_capacity(self.states.len());
        for declaration in &self.states {
            match &declaration.shape {
                Shape::Leaf => entries.push(Entry {
                    state: declaration.state,
                    parent: declaration.parent,
                    kind: StateKind::Leaf,
                }),
                Shape::Composite { initial } => entries.push(Entry {
                    state: declaration.state,
                    parent: declaration.parent,
                    kind: StateKind::Composite { initial: *initial },
                }),
                Shape::Orthogonal { regions } => {
                    entries.push(Entry {
                        state: declaration.state,
                        parent: declaration.parent,
                        kind: StateKind::Orthogonal {
                            regions: regions.iter().map(|r| r.region).collect(),
                        },
                    });
                    entries.extend(regions.iter().map(|r| Entry {
                        state: r.region,
                        parent: Some(declaration.state),
                        kind: StateKind::Region { initial: r.initial },
                    }));
                }
            }
        }
        entries
    }

    /// Check the declaration, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<HierarchyViolation>> {
        let entries = self.entries();
        let mut table: HashMap<S, &Entry<S>> = HashMap::new();
        let mut unique = Vec::with_capacity(entries.len());
        let mut checks: Vec<Validation<(), NonEmptyVec<HierarchyViolation>>> = Vec::new();

        for entry in &entries {
            if table.contains_key(&entry.state) {
                let violation = if entry.kind.is_region() {
                    HierarchyViolation::DuplicateRegion {
                        region: entry.state.name().to_string(),
                    }
                } else {
                    HierarchyViolation::DuplicateState {
                        state: entry.state.name().to_string(),
                    }
                };
                checks.push(Validation::fail(violation));
            } else {
                table.insert(entry.state, entry);
                unique.push(entry);
            }
        }

        checks.push(match self.initial {
            None => Validation::fail(HierarchyViolation::MissingInitialState),
            Some(initial) => match table.get(&initial) {
                Some(entry) if entry.parent.is_some() => {
                    Validation::fail(HierarchyViolation::InitialNotTopLevel {
                        state: initial.name().to_string(),
                    })
                }
                _ => Validation::success(()),
            },
        });

        for entry in unique {
            checks.push(check_parent(entry, &table));
            checks.push(check_shape(entry, &table));
            checks.push(check_acyclic(entry, &table));
        }

        for state in S::ALL {
            if !table.contains_key(state) {
                checks.push(Validation::fail(HierarchyViolation::Undeclared {
                    state: state.name().to_string(),
                }));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate and produce the immutable table.
    pub fn build(self) -> Result<Hierarchy<S>, BuildError> {
        if let Validation::Failure(violations) = self.validate() {
            return Err(BuildError::Invalid(violations.iter().cloned().collect()));
        }
        let initial = self.initial.ok_or(BuildError::Invalid(vec![
            HierarchyViolation::MissingInitialState,
        ]))?;

        let entries = self.entries();
        let parents: HashMap<S, Option<S>> = entries.iter().map(|e| (e.state, e.parent)).collect();
        let descriptors = entries
            .into_iter()
            .map(|entry| StateDescriptor {
                ancestors: ancestor_chain(entry.state, &parents),
                state: entry.state,
                parent: entry.parent,
                kind: entry.kind,
            })
            .collect();

        Ok(Hierarchy::from_descriptors(initial, descriptors))
    }
}

impl<S: State> Default for HierarchyBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_parent<S: State>(
    entry: &Entry<S>,
    table: &HashMap<S, &Entry<S>>,
) -> Validation<(), NonEmptyVec<HierarchyViolation>> {
    let Some(parent) = entry.parent else {
        return Validation::success(());
    };
    let names = || (entry.state.name().to_string(), parent.name().to_string());
    match table.get(&parent).map(|p| &p.kind) {
        None => {
            let (state, parent) = names();
            Validation::fail(HierarchyViolation::UnknownParent { state, parent })
        }
        Some(StateKind::Leaf) => {
            let (state, parent) = names();
            Validation::fail(HierarchyViolation::LeafParent { state, parent })
        }
        Some(StateKind::Orthogonal { .. }) if !entry.kind.is_region() => {
            let (state, parent) = names();
            Validation::fail(HierarchyViolation::OrthogonalParent { state, parent })
        }
        Some(_) => Validation::success(()),
    }
}

fn check_shape<S: State>(
    entry: &Entry<S>,
    table: &HashMap<S, &Entry<S>>,
) -> Validation<(), NonEmptyVec<HierarchyViolation>> {
    match &entry.kind {
        StateKind::Leaf => Validation::success(()),
        StateKind::Orthogonal { regions } if regions.len() < 2 => {
            Validation::fail(HierarchyViolation::TooFewRegions {
                state: entry.state.name().to_string(),
                count: regions.len(),
            })
        }
        StateKind::Orthogonal { .. } => Validation::success(()),
        StateKind::Composite { initial } | StateKind::Region { initial } => {
            let is_child = table
                .get(initial)
                .is_some_and(|child| child.parent == Some(entry.state));
            if is_child {
                Validation::success(())
            } else {
                Validation::fail(HierarchyViolation::InitialNotChild {
                    state: entry.state.name().to_string(),
                    initial: initial.name().to_string(),
                })
            }
        }
    }
}

fn check_acyclic<S: State>(
    entry: &Entry<S>,
    table: &HashMap<S, &Entry<S>>,
) -> Validation<(), NonEmptyVec<HierarchyViolation>> {
    let mut current = entry.parent;
    let mut steps = 0;
    while let Some(parent) = current {
        if parent == entry.state || steps > table.len() {
            return Validation::fail(HierarchyViolation::Cycle {
                state: entry.state.name().to_string(),
            });
        }
        current = table.get(&parent).and_then(|p| p.parent);
        steps += 1;
    }
    Validation::success(())
}

/// Outermost ancestor first, `state` last. Only called on validated input.
fn ancestor_chain<S: State>(state: S, parents: &HashMap<S, Option<S>>) -> Vec<S> {
    let mut chain = vec![state];
    let mut current = parents.get(&state).copied().flatten();
    while let Some(parent) = current {
        chain.push(parent);
        current = parents.get(&parent).copied().flatten();
    }
    chain.reverse();
    chain
}
