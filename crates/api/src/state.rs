use std::sync::Arc;

use axum::extract::FromRef;
use pme_db::models::equipment::EquipmentMasters;
use pme_db::models::project::Projects;
use pme_db::models::project_equipment_relation::ProjectEquipmentRelations;
use pme_db::models::task::Tasks;
use pme_db::models::task_equipment_relation::TaskEquipmentRelations;
use pme_db::models::task_project_relation::TaskProjectRelations;
use pme_db::models::task_type::TaskTypes;
use pme_db::models::task_user_relation::TaskUserRelations;
use pme_db::models::user::Users;
use pme_db::PgStore;

use crate::config::ServerConfig;
use crate::services::relations::RelationService;
use crate::services::session::SessionVerifier;
use crate::services::EntityService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pme_db::DbPool,
    /// Server configuration (read by the session gate and the router).
    pub config: Arc<ServerConfig>,
    pub services: Services,
    /// Resolves session cookies for the session gate.
    pub sessions: Arc<dyn SessionVerifier>,
}

/// One service per entity, each over its own injected repository.
#[derive(Clone)]
pub struct Services {
    pub projects: EntityService<Projects>,
    pub users: EntityService<Users>,
    pub tasks: EntityService<Tasks>,
    pub task_types: EntityService<TaskTypes>,
    pub equipment: EntityService<EquipmentMasters>,
    pub task_project_relations: EntityService<TaskProjectRelations>,
    pub task_user_relations: EntityService<TaskUserRelations>,
    pub task_equipment_relations: EntityService<TaskEquipmentRelations>,
    pub project_equipment_relations: EntityService<ProjectEquipmentRelations>,
    /// Relation listings per task and per project.
    pub relations: RelationService,
}

impl Services {
    /// Back every service with the same PostgreSQL store.
    pub fn from_store(store: PgStore) -> Self {
        let store = Arc::new(store);
        let projects: EntityService<Projects> = EntityService::new(store.clone());
        let tasks: EntityService<Tasks> = EntityService::new(store.clone());
        Self {
            relations: RelationService::new(tasks.clone(), projects.clone(), store.clone()),
            projects,
            users: EntityService::new(store.clone()),
            tasks,
            task_types: EntityService::new(store.clone()),
            equipment: EntityService::new(store.clone()),
            task_project_relations: EntityService::new(store.clone()),
            task_user_relations: EntityService::new(store.clone()),
            task_equipment_relations: EntityService::new(store.clone()),
            project_equipment_relations: EntityService::new(store),
        }
    }
}

/// Let generic handlers extract `State<EntityService<E>>` from [`AppState`].
macro_rules! service_from_state {
    ($($entity:ty => $field:ident),* $(,)?) => {
        $(
            impl FromRef<AppState> for EntityService<$entity> {
                fn from_ref(state: &AppState) -> Self {
                    state.services.$field.clone()
                }
            }
        )*
    };
}

impl FromRef<AppState> for RelationService {
    fn from_ref(state: &AppState) -> Self {
        state.services.relations.clone()
    }
}

service_from_state! {
    Projects => projects,
    Users => users,
    Tasks => tasks,
    TaskTypes => task_types,
    EquipmentMasters => equipment,
    TaskProjectRelations => task_project_relations,
    TaskUserRelations => task_user_relations,
    TaskEquipmentRelations => task_equipment_relations,
    ProjectEquipmentRelations => project_equipment_relations,
}
