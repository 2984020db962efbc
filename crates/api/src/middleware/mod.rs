//! Request middleware.
//!
//! - [`session::session_gate`] -- Authenticates protected paths from the session cookie.

pub mod session;
