//! Macros for ergonomic tag and event declarations.

/// Generate a tag enum implementing [`State`](crate::core::State).
///
/// # Example
///
/// ```
/// use stratum::core::State;
/// use stratum::state_enum;
///
/// state_enum! {
///     pub enum Washer {
///         Running,
///         Filling,
///         Spinning,
///         Idle,
///     }
/// }
///
/// assert_eq!(Washer::Spinning.name(), "Spinning");
/// assert_eq!(Washer::ALL.len(), 4);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),*];

            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

/// Generate an event enum implementing [`Event`](crate::core::Event).
///
/// Variants may carry a tuple payload.
///
/// # Example
///
/// ```
/// use stratum::core::Event;
/// use stratum::event_enum;
///
/// event_enum! {
///     pub enum Remote {
///         Power,
///         Volume(i8),
///         Channel(u16, bool),
///     }
/// }
///
/// assert_eq!(Remote::Volume(-2).name(), "Volume");
/// assert_eq!(Remote::Power.name(), "Power");
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( ( $($payload:ty),+ $(,)? ) )?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $( ( $($payload),+ ) )?
            ),*
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant { .. } => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Event, State};

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    event_enum! {
        enum TestEvent {
            Begin,
            Progress(u8),
            Finish(String, bool),
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Complete.name(), "Complete");
        assert_eq!(
            TestState::ALL,
            &[TestState::Initial, TestState::Processing, TestState::Complete]
        );
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
        }

        let _state = PublicState::A;
    }

    #[test]
    fn event_enum_names_every_arity() {
        assert_eq!(TestEvent::Begin.name(), "Begin");
        assert_eq!(TestEvent::Progress(40).name(), "Progress");
        assert_eq!(TestEvent::Finish("ok".into(), true).name(), "Finish");
        assert_eq!(TestEvent::Progress(1), TestEvent::Progress(1));
    }
}
