//! Per-entity query and mutation containers.
//!
//! - [`list::ListQuery`] -- a filtered list, re-fetched only when the filter changes.
//! - [`record::RecordQuery`] -- one record by id.
//! - [`mutation`] -- create, update, and delete with their own state.

pub mod list;
pub mod mutation;
pub mod record;

use pme_core::envelope::Envelope;
use pme_db::models::equipment::EquipmentMasters;
use pme_db::models::project::Projects;
use pme_db::models::task::Tasks;
use pme_db::models::task_type::TaskTypes;
use pme_db::models::user::Users;

use crate::error::ClientError;

pub use list::ListQuery;
pub use mutation::{CreateMutation, DeleteMutation, UpdateMutation};
pub use record::RecordQuery;

pub type ProjectsQuery = ListQuery<Projects>;
pub type ProjectQuery = RecordQuery<Projects>;
pub type UsersQuery = ListQuery<Users>;
pub type UserQuery = RecordQuery<Users>;
pub type TasksQuery = ListQuery<Tasks>;
pub type TaskQuery = RecordQuery<Tasks>;
pub type TaskTypesQuery = ListQuery<TaskTypes>;
pub type EquipmentListQuery = ListQuery<EquipmentMasters>;
pub type EquipmentQuery = RecordQuery<EquipmentMasters>;

/// Flatten a backend result into the string-error form the containers store.
pub(crate) fn settle<T>(
    resource: &'static str,
    operation: &'static str,
    result: Result<Envelope<T>, ClientError>,
) -> Result<T, String> {
    match result {
        Ok(envelope) => envelope.into_result(),
        Err(err) => {
            tracing::warn!(resource, operation, error = %err, "Request failed");
            Err(err.to_string())
        }
    }
}
