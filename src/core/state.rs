//! State tags.
//!
//! Every state of a hierarchy (including the region pseudo-states of
//! orthogonal composites) is identified by a tag. Tags are plain values of a
//! closed enum; the behaviour attached to a tag lives in the [`Node`] sum type.
//!
//! [`Node`]: crate::core::Node

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state tags.
///
/// A tag is a cheap, copyable identity. The hierarchy table, the ancestor
/// chains and the regions all talk about states through their tags.
///
/// # Required Traits
///
/// - `Copy` + `Eq` + `Hash`: tags key the hierarchy table
/// - `Debug`: tags show up in diagnostics and errors
/// - `Serialize` + `Deserialize`: hierarchies can be declared in JSON
///
/// # Example
///
/// ```rust
/// use stratum::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Closed,
///     Open,
/// }
///
/// impl State for Door {
///     const ALL: &'static [Self] = &[Self::Closed, Self::Open];
///
///     fn name(&self) -> &str {
///         match self {
///             Self::Closed => "Closed",
///             Self::Open => "Open",
///         }
///     }
/// }
///
/// assert_eq!(Door::Open.name(), "Open");
/// ```
pub trait State:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Every tag of the enum, in declaration order.
    ///
    /// Hierarchy validation requires each of them to be declared, so any tag a
    /// handler can name is a valid transition target.
    const ALL: &'static [Self];

    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}
