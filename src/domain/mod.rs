//! Domain types for the series catalog with strong typing.
//!
//! Newtype identifiers keep series, season and episode keys from being mixed
//! up; [`slug`] and [`paths`] hold the pure functions that derive identifiers
//! and storage locations from entity state.

pub mod paths;
pub mod slug;

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn value(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self::new(id)
            }
        }
    };
}

entity_id!(
    /// Primary key of a row in the `series` table.
    ///
    /// ```rust
    /// use series_catalog::domain::SeriesId;
    ///
    /// let id = SeriesId::new(42);
    /// assert_eq!(id.value(), 42);
    /// assert_eq!(id.to_string(), "42");
    /// ```
    SeriesId
);

entity_id!(
    /// Primary key of a row in the `seasons` table.
    SeasonId
);

entity_id!(
    /// Primary key of a row in the `episodes` table.
    EpisodeId
);
