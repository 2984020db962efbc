//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` record struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - The [`Entity`](crate::Entity) marker tying them together

use serde::{Deserialize, Deserializer};

/// Wrap a present field (including an explicit `null`) in `Some`, so
/// `Option<Option<T>>` fields tell "absent" from "cleared".
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Declare a two-column relation key.
///
/// Serialized with camelCase fields (also the path parameter names); the
/// `Display`/`FromStr` form is `{first}/{second}`.
macro_rules! composite_key {
    ($(#[$meta:meta])* $name:ident { $first:ident, $second:ident }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub $first: pme_core::types::DbId,
            pub $second: pme_core::types::DbId,
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}/{}", self.$first, self.$second)
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::entity::KeyParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let malformed = || crate::entity::KeyParseError(s.to_string());
                let (first, second) = s.split_once('/').ok_or_else(malformed)?;
                Ok(Self {
                    $first: first.parse().map_err(|_| malformed())?,
                    $second: second.parse().map_err(|_| malformed())?,
                })
            }
        }
    };
}

pub mod equipment;
pub mod project;
pub mod project_equipment_relation;
pub mod session;
pub mod task;
pub mod task_equipment_relation;
pub mod task_project_relation;
pub mod task_type;
pub mod task_user_relation;
pub mod user;
