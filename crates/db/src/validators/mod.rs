//! Input validators, one module per entity.
//!
//! Validators run before any repository call and return the first violated
//! rule as a localized message. Repositories re-check the rules that guard
//! database integrity (names, parent references).

pub mod equipment;
pub mod project;
pub mod relation;
pub mod task;
pub mod task_type;
pub mod user;
