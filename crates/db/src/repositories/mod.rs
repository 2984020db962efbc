//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Reads and deletes return
//! `sqlx::Error`; writes that enforce field rules return
//! [`StoreError`](crate::StoreError).

pub mod equipment_repo;
pub mod project_equipment_relation_repo;
pub mod project_repo;
pub mod session_repo;
pub mod task_equipment_relation_repo;
pub mod task_project_relation_repo;
pub mod task_repo;
pub mod task_type_repo;
pub mod task_user_relation_repo;
pub mod user_repo;

pub use equipment_repo::EquipmentRepo;
pub use project_equipment_relation_repo::ProjectEquipmentRelationRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use task_equipment_relation_repo::TaskEquipmentRelationRepo;
pub use task_project_relation_repo::TaskProjectRelationRepo;
pub use task_repo::TaskRepo;
pub use task_type_repo::TaskTypeRepo;
pub use task_user_relation_repo::TaskUserRelationRepo;
pub use user_repo::UserRepo;
