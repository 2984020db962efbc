//! The transport seam the containers are written against.

use async_trait::async_trait;
use pme_core::envelope::{DeletedRef, Envelope};
use pme_core::query::{ListFilter, LookupOptions};
use pme_db::Entity;

use crate::error::ClientError;

/// Remote counterpart of the server's entity service.
///
/// A failed operation the server understood comes back as `Ok` with a
/// failed envelope; `Err` is reserved for transport problems.
#[async_trait]
pub trait Backend<E: Entity>: Send + Sync {
    async fn list(&self, filter: &ListFilter) -> Result<Envelope<Vec<E::Record>>, ClientError>;

    async fn get(
        &self,
        key: &E::Key,
        options: LookupOptions,
    ) -> Result<Envelope<E::Record>, ClientError>;

    async fn create(&self, input: &E::Create) -> Result<Envelope<E::Record>, ClientError>;

    async fn update(
        &self,
        key: &E::Key,
        input: &E::Update,
    ) -> Result<Envelope<E::Record>, ClientError>;

    async fn delete(&self, key: &E::Key) -> Result<Envelope<DeletedRef<E::Key>>, ClientError>;
}
