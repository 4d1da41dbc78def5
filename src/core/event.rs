//! Event envelopes.
//!
//! An event is one value of a closed user enum. Each variant is one event
//! kind and carries its typed payload, so "an event with N arguments" needs no
//! wrapper type per arity. Handlers `match` on the variant.

use std::fmt::Debug;

/// Trait for event enums dispatched through a [`Machine`].
///
/// Events are immutable: the machine passes the same value by reference to
/// every handler on the bubbling path and to every orthogonal region.
///
/// Several independent groups of event kinds are expressed as an outer enum
/// whose variants wrap the group enums.
///
/// # Example
///
/// ```rust
/// use stratum::core::Event;
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Pedal {
///     Press,
///     Hold(u32),
/// }
///
/// impl Event for Pedal {
///     fn name(&self) -> &str {
///         match self {
///             Self::Press => "Press",
///             Self::Hold(_) => "Hold",
///         }
///     }
/// }
///
/// assert_eq!(Pedal::Hold(3).name(), "Hold");
/// ```
///
/// [`Machine`]: crate::machine::Machine
pub trait Event: Debug {
    /// Name of the event kind, for diagnostics.
    fn name(&self) -> &str;
}
