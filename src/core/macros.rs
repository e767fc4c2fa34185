//! Macro for declaring closed state domains.

/// Declare a closed state enumeration.
///
/// Generates the enum with the derives a state needs (`Clone`, `Copy`,
/// `PartialEq`, `Eq`, `Hash`, `Debug`, plus `serde::Serialize` /
/// `serde::Deserialize` so states stay serialization-ready for embedding
/// code), and implements [`EnumState`](crate::core::EnumState) with ordinals
/// following declaration order. The [`State`](crate::core::State) bound is
/// satisfied automatically.
///
/// # Example
///
/// ```rust
/// use reflex::state_enum;
/// use reflex::core::EnumState;
///
/// state_enum! {
///     pub enum Connection {
///         Closed,
///         Opening,
///         Open,
///         Draining,
///     }
/// }
///
/// assert_eq!(Connection::COUNT, 4);
/// assert_eq!(Connection::Opening.ordinal(), 1);
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
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::EnumState for $name {
            const COUNT: usize = [$(Self::$variant),*].len();

            fn ordinal(&self) -> usize {
                *self as usize
            }
        }
    };
}
