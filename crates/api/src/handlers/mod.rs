//! HTTP request handlers.
//!
//! [`crud`] holds the generic handlers shared by every entity; the other
//! modules serve the entity-specific extras.

pub mod crud;
pub mod equipment;
pub mod project;
pub mod session;
pub mod task;
