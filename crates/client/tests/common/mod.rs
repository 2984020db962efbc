#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use pme_client::{Backend, ClientError};
use pme_core::envelope::{DeletedRef, Envelope, FailureKind};
use pme_core::query::{ListFilter, LookupOptions};
use pme_db::models::project::{CreateProject, Project, ProjectStatus, Projects, UpdateProject};
use pme_db::models::user::{CreateUser, UpdateUser, User, Users};
use pme_db::Entity;
use uuid::Uuid;

/// Builds and patches records for [`FakeBackend`].
pub trait Fixture: Entity {
    fn build(input: &Self::Create) -> Self::Record;
    fn patch(record: &mut Self::Record, input: &Self::Update);
}

impl Fixture for Projects {
    fn build(input: &CreateProject) -> Project {
        let now = Utc::now();
        Project {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            project_number: "PME-20241231-001".into(),
            status: ProjectStatus::Active,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn patch(record: &mut Project, input: &UpdateProject) {
        if let Some(name) = &input.name {
            record.name = name.clone();
        }
    }
}

impl Fixture for Users {
    fn build(input: &CreateUser) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            email: input.email.clone(),
            email_verified: input.email_verified,
            image: input.image.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn patch(record: &mut User, input: &UpdateUser) {
        if let Some(name) = &input.name {
            record.name = name.clone();
        }
        if let Some(email) = &input.email {
            record.email = email.clone();
        }
    }
}

/// In-memory backend that counts calls and validates like the server.
pub struct FakeBackend<E: Fixture> {
    records: Mutex<Vec<E::Record>>,
    pub list_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    pub mutation_calls: AtomicUsize,
    offline: AtomicBool,
}

impl<E: Fixture> FakeBackend<E> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<E::Record>) -> Self {
        Self {
            records: Mutex::new(records),
            list_calls: AtomicUsize::new(0),
            get_calls: AtomicUsize::new(0),
            mutation_calls: AtomicUsize::new(0),
            offline: AtomicBool::new(false),
        }
    }

    /// Make every following call fail at the transport level.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub fn lists(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    fn transport(&self) -> Result<(), ClientError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ClientError::UnexpectedResponse {
                status: 502,
                body: "Bad Gateway".into(),
            });
        }
        Ok(())
    }
}

fn not_found<E: Entity, T>() -> Envelope<T> {
    Envelope::fail(FailureKind::NotFound, E::MESSAGES.not_found)
}

#[async_trait]
impl<E: Fixture> Backend<E> for FakeBackend<E> {
    async fn list(&self, filter: &ListFilter) -> Result<Envelope<Vec<E::Record>>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.transport()?;
        let records = self.records.lock().unwrap();
        let limit = filter.effective_limit().map_or(usize::MAX, |l| l as usize);
        Ok(Envelope::ok(records.iter().take(limit).cloned().collect()))
    }

    async fn get(
        &self,
        key: &E::Key,
        _options: LookupOptions,
    ) -> Result<Envelope<E::Record>, ClientError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.transport()?;
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .find(|r| E::key_of(r) == *key)
            .cloned()
            .map_or_else(not_found::<E, _>, Envelope::ok))
    }

    async fn create(&self, input: &E::Create) -> Result<Envelope<E::Record>, ClientError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.transport()?;
        if let Err(message) = E::validate_create(input) {
            return Ok(Envelope::fail(FailureKind::Validation, message));
        }
        let record = E::build(input);
        self.records.lock().unwrap().push(record.clone());
        Ok(Envelope::ok_with_message(record, E::MESSAGES.created))
    }

    async fn update(
        &self,
        key: &E::Key,
        input: &E::Update,
    ) -> Result<Envelope<E::Record>, ClientError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.transport()?;
        let mut records = self.records.lock().unwrap();
        let Some(record) = records.iter_mut().find(|r| E::key_of(r) == *key) else {
            return Ok(not_found::<E, _>());
        };
        E::patch(record, input);
        Ok(Envelope::ok_with_message(record.clone(), E::MESSAGES.updated))
    }

    async fn delete(&self, key: &E::Key) -> Result<Envelope<DeletedRef<E::Key>>, ClientError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.transport()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| E::key_of(r) != *key);
        if records.len() == before {
            return Ok(not_found::<E, _>());
        }
        Ok(Envelope::ok_with_message(DeletedRef { id: *key }, E::MESSAGES.deleted))
    }
}

pub fn user_input(name: &str, email: &str) -> CreateUser {
    CreateUser {
        name: name.into(),
        email: email.into(),
        email_verified: false,
        image: None,
    }
}
