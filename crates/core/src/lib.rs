//! Domain helpers shared by the repository, API, and client crates.
//!
//! Nothing in this crate performs I/O.

pub mod envelope;
pub mod equipment_tree;
pub mod error;
pub mod hashing;
pub mod messages;
pub mod project_number;
pub mod query;
pub mod types;
pub mod validation;
