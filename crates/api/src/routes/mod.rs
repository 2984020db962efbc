pub mod health;

use axum::extract::FromRef;
use axum::routing::get;
use axum::Router;
use pme_db::models::equipment::EquipmentMasters;
use pme_db::models::project::Projects;
use pme_db::models::project_equipment_relation::ProjectEquipmentRelations;
use pme_db::models::task::Tasks;
use pme_db::models::task_equipment_relation::TaskEquipmentRelations;
use pme_db::models::task_project_relation::TaskProjectRelations;
use pme_db::models::task_type::TaskTypes;
use pme_db::models::task_user_relation::TaskUserRelations;
use pme_db::models::user::Users;
use pme_db::Entity;

use crate::handlers::{crud, equipment, project, session, task};
use crate::services::EntityService;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /session                                         current session user
///
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
/// /projects/{id}/equipment                         equipment assigned to the project
/// /users                                           list, create
/// /users/{id}                                      get, update, delete
/// /tasks                                           list, create
/// /tasks/{id}                                      get, update, delete
/// /tasks/{id}/relations                            linked projects/users/equipment
/// /task-types                                      list, create
/// /task-types/{id}                                 get, update, delete
/// /equipment                                       list, create
/// /equipment/tree                                  nested live equipment
/// /equipment/{id}                                  get, update, delete
///
/// /task-project-relations                          list, create
/// /task-project-relations/{taskId}/{projectId}     get, update, delete
/// /task-user-relations                             list, create
/// /task-user-relations/{taskId}/{userId}           get, update, delete
/// /task-equipment-relations                        list, create
/// /task-equipment-relations/{taskId}/{equipmentId} get, update, delete
/// /project-equipment-relations                     list, create
/// /project-equipment-relations/{projectId}/{equipmentId}  get, update, delete
/// ```
///
/// Updates accept both `PUT` and `PATCH`; both apply only supplied fields.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/session", get(session::current))
        .nest(
            "/projects",
            crud_routes::<Projects>("/{id}").route("/{id}/equipment", get(project::equipment)),
        )
        .nest("/users", crud_routes::<Users>("/{id}"))
        .nest(
            "/tasks",
            crud_routes::<Tasks>("/{id}").route("/{id}/relations", get(task::relations)),
        )
        .nest("/task-types", crud_routes::<TaskTypes>("/{id}"))
        .nest(
            "/equipment",
            crud_routes::<EquipmentMasters>("/{id}").route("/tree", get(equipment::tree)),
        )
        .nest(
            "/task-project-relations",
            crud_routes::<TaskProjectRelations>("/{taskId}/{projectId}"),
        )
        .nest(
            "/task-user-relations",
            crud_routes::<TaskUserRelations>("/{taskId}/{userId}"),
        )
        .nest(
            "/task-equipment-relations",
            crud_routes::<TaskEquipmentRelations>("/{taskId}/{equipmentId}"),
        )
        .nest(
            "/project-equipment-relations",
            crud_routes::<ProjectEquipmentRelations>("/{projectId}/{equipmentId}"),
        )
}

/// The five CRUD routes for one entity; `key_path` names the key segments.
fn crud_routes<E>(key_path: &str) -> Router<AppState>
where
    E: Entity,
    EntityService<E>: FromRef<AppState>,
{
    Router::new()
        .route("/", get(crud::list::<E>).post(crud::create::<E>))
        .route(
            key_path,
            get(crud::get_by_id::<E>)
                .put(crud::update::<E>)
                .patch(crud::update::<E>)
                .delete(crud::delete::<E>),
        )
}
