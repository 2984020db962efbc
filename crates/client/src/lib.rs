//! Client-side state containers for the PME administration API.
//!
//! Each container owns the state a screen renders from (data, loading flag,
//! error string) and talks to the server through a [`Backend`]. Containers
//! take `&mut self`, so a single container never has overlapping requests.

pub mod backend;
pub mod context;
pub mod error;
pub mod hooks;
pub mod http;
pub mod query_key;
pub mod state;

pub use backend::Backend;
pub use error::ClientError;
pub use http::HttpBackend;
pub use state::{QueryState, QueryStatus};
