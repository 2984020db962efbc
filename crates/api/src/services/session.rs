//! Session verification behind the session gate.

use async_trait::async_trait;
use pme_db::models::session::SessionUser;
use pme_db::repositories::SessionRepo;
use pme_db::{DbPool, StoreError};

/// Resolves a session token to its user.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// `Ok(None)` for unknown or expired tokens.
    async fn verify(&self, token: &str) -> Result<Option<SessionUser>, StoreError>;
}

/// Looks sessions up in the `sessions` table.
pub struct DbSessionVerifier {
    pool: DbPool,
}

impl DbSessionVerifier {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionVerifier for DbSessionVerifier {
    async fn verify(&self, token: &str) -> Result<Option<SessionUser>, StoreError> {
        Ok(SessionRepo::find_active_by_token(&self.pool, token).await?)
    }
}
