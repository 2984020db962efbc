//! Browser session model.
//!
//! Sessions are issued by the external authentication service; this crate
//! only reads them to gate protected routes.

use pme_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A session row from the `sessions` table.
///
/// Contains the raw token -- NEVER serialize this to API responses.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub token: String,
    pub user_id: DbId,
    pub expires_at: Timestamp,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The user behind a valid session.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub session_id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub email: String,
    pub expires_at: Timestamp,
}

/// DTO for recording a session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub token: String,
    pub user_id: DbId,
    pub expires_at: Timestamp,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
