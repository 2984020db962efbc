//! Type-level description of one CRUD slice.
//!
//! Each entity is a zero-sized marker (e.g. [`Projects`](crate::models::project::Projects))
//! tying together its record, key, DTOs, validators, messages, and URL
//! resource. Services, handlers, and client containers are generic over it.

use std::fmt::{Debug, Display};
use std::str::FromStr;

use pme_core::messages::EntityMessages;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub trait Entity: Send + Sync + 'static {
    /// The view record returned to callers.
    type Record: Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Primary key. `Display`/`FromStr` use the URL path form
    /// (`{id}` or `{first}/{second}` for relations).
    type Key: Copy
        + Debug
        + Display
        + FromStr
        + PartialEq
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    type Create: Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

    type Update: Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// URL segment under `/api/v1`, e.g. `"projects"`.
    const RESOURCE: &'static str;

    const MESSAGES: EntityMessages;

    fn validate_create(input: &Self::Create) -> Result<(), String>;

    fn validate_update(input: &Self::Update) -> Result<(), String>;

    fn key_of(record: &Self::Record) -> Self::Key;
}

/// Returned when a relation key string is not `{uuid}/{uuid}`.
#[derive(Debug, thiserror::Error)]
#[error("malformed record key: {0}")]
pub struct KeyParseError(pub String);
