//! Service layer: validation, not-found synthesis, and error-to-envelope
//! mapping in front of an injected [`Repository`].

pub mod relations;
pub mod session;

use std::fmt::Debug;
use std::sync::Arc;

use pme_core::envelope::{DeletedRef, Envelope, FailureKind};
use pme_core::query::ListFilter;
use pme_db::{Entity, Repository, StoreError};

/// CRUD operations for one entity, returning [`Envelope`]s.
///
/// Never returns raw repository errors: failures are logged and replaced
/// with the entity's localized message.
pub struct EntityService<E: Entity> {
    repo: Arc<dyn Repository<E>>,
}

impl<E: Entity> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<E: Entity> EntityService<E> {
    pub fn new(repo: Arc<dyn Repository<E>>) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self, filter: &ListFilter) -> Envelope<Vec<E::Record>> {
        match self.repo.find_all(filter).await {
            Ok(records) => Envelope::ok(records),
            Err(err) => failure::<E, _>("get_all", E::MESSAGES.list_failed, err, filter),
        }
    }

    pub async fn get_by_id(&self, key: &E::Key, include_deleted: bool) -> Envelope<E::Record> {
        match self.repo.find_by_id(key, include_deleted).await {
            Ok(Some(record)) => Envelope::ok(record),
            Ok(None) => Envelope::fail(FailureKind::NotFound, E::MESSAGES.not_found),
            Err(err) => failure::<E, _>("get_by_id", E::MESSAGES.fetch_failed, err, key),
        }
    }

    pub async fn create(&self, input: &E::Create) -> Envelope<E::Record> {
        if let Err(message) = E::validate_create(input) {
            return Envelope::fail(FailureKind::Validation, message);
        }
        match self.repo.create(input).await {
            Ok(record) => Envelope::ok_with_message(record, E::MESSAGES.created),
            Err(err) => failure::<E, _>("create", E::MESSAGES.create_failed, err, input),
        }
    }

    pub async fn update(&self, key: &E::Key, input: &E::Update) -> Envelope<E::Record> {
        if let Err(message) = E::validate_update(input) {
            return Envelope::fail(FailureKind::Validation, message);
        }
        match self.repo.update(key, input).await {
            Ok(Some(record)) => Envelope::ok_with_message(record, E::MESSAGES.updated),
            Ok(None) => Envelope::fail(FailureKind::NotFound, E::MESSAGES.not_found),
            Err(err) => failure::<E, _>("update", E::MESSAGES.update_failed, err, &(key, input)),
        }
    }

    /// Logically delete the record.
    ///
    /// Existence is checked first so a missing record reports not-found
    /// rather than a generic delete failure.
    pub async fn soft_delete(&self, key: &E::Key) -> Envelope<DeletedRef<E::Key>> {
        match self.repo.find_by_id(key, false).await {
            Ok(Some(_)) => {}
            Ok(None) => return Envelope::fail(FailureKind::NotFound, E::MESSAGES.not_found),
            Err(err) => return failure::<E, _>("soft_delete", E::MESSAGES.delete_failed, err, key),
        }
        match self.repo.soft_delete(key).await {
            Ok(Some(_)) => Envelope::ok_with_message(DeletedRef { id: *key }, E::MESSAGES.deleted),
            Ok(None) => Envelope::fail(FailureKind::NotFound, E::MESSAGES.not_found),
            Err(err) => failure::<E, _>("soft_delete", E::MESSAGES.delete_failed, err, key),
        }
    }
}

/// Log a repository failure and turn it into a user-safe envelope.
///
/// Messages come from `E`; `generic` is the operation's fallback text.
pub(crate) fn failure<E: Entity, T>(
    operation: &'static str,
    generic: &'static str,
    err: StoreError,
    params: &(impl Debug + ?Sized),
) -> Envelope<T> {
    tracing::error!(
        entity = E::RESOURCE,
        operation,
        error = %err,
        params = ?params,
        "Repository operation failed",
    );
    match err {
        StoreError::InvalidInput(message) => Envelope::fail(FailureKind::Validation, message),
        StoreError::Conflict(_) => Envelope::fail(FailureKind::Conflict, E::MESSAGES.already_exists),
        StoreError::Database(_) | StoreError::SequenceExhausted(_) => {
            Envelope::fail(FailureKind::Internal, generic)
        }
    }
}
