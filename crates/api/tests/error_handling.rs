//! Tests for error → HTTP response mapping.
//!
//! Three error paths are covered: `AppError` (`{error, code}` bodies),
//! failed service envelopes (`{success: false, error}` bodies), and
//! requests axum cannot decode, which must still answer with an envelope.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use common::{
    body_json, build_app_with, build_state, connection_failed, get, lazy_pool, patch_json,
    post_json, test_config, MemoryProjectStore,
};
use http_body_util::BodyExt;
use pme_api::error::AppError;
use pme_api::extract::INVALID_REQUEST;
use pme_api::response::EnvelopeResponse;
use pme_api::services::relations::RelationService;
use pme_api::services::EntityService;
use pme_api::state::AppState;
use pme_core::envelope::{Envelope, FailureKind};
use pme_core::error::CoreError;
use pme_core::types::DbId;
use pme_db::models::project::{CreateProject, Projects};
use pme_db::models::project_equipment_relation::ProjectEquipmentRelation;
use pme_db::models::task::TaskRelations;
use pme_db::{RelationLookup, Repository, StoreError};
use serde_json::json;
use uuid::Uuid;

/// Helper: convert a response into its status code and parsed JSON body.
async fn to_parts(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

/// App whose database is unreachable; only decoding and the session gate
/// can succeed.
fn offline_app() -> axum::Router {
    build_app_with(build_state(lazy_pool(), test_config()))
}

/// Relation lookups fail as if the database were down.
struct FailingLookup;

#[async_trait]
impl RelationLookup for FailingLookup {
    async fn relations_of_task(&self, _task_id: DbId) -> Result<TaskRelations, StoreError> {
        Err(connection_failed())
    }

    async fn equipment_of_project(
        &self,
        _project_id: DbId,
    ) -> Result<Vec<ProjectEquipmentRelation>, StoreError> {
        Err(connection_failed())
    }
}

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unauthorized_error_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("Session cookie missing".into()));

    let (status, json) = to_parts(err.into_response()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Session cookie missing");
}

// ---------------------------------------------------------------------------
// Undecodable requests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn body_missing_required_field_is_validation_envelope() {
    let response = post_json(offline_app(), "/api/v1/projects", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json, json!({ "success": false, "error": INVALID_REQUEST }));
}

#[tokio::test]
async fn body_with_wrong_field_type_is_validation_envelope() {
    let id = Uuid::new_v4();
    let response = patch_json(
        offline_app(),
        &format!("/api/v1/tasks/{id}"),
        json!({ "taskTypeId": 42 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], INVALID_REQUEST);
}

#[tokio::test]
async fn non_numeric_limit_is_validation_envelope() {
    let response = get(offline_app(), "/api/v1/projects?limit=abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json, json!({ "success": false, "error": INVALID_REQUEST }));
}

#[tokio::test]
async fn malformed_include_deleted_is_validation_envelope() {
    let id = Uuid::new_v4();
    let response = get(
        offline_app(),
        &format!("/api/v1/projects/{id}?includeDeleted=maybe"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], INVALID_REQUEST);
}

#[tokio::test]
async fn malformed_task_id_in_relations_is_not_found_envelope() {
    let response = get(offline_app(), "/api/v1/tasks/not-a-uuid/relations").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json, json!({ "success": false, "error": "タスクが見つかりません" }));
}

#[tokio::test]
async fn malformed_project_id_in_equipment_is_not_found_envelope() {
    let response = get(offline_app(), "/api/v1/projects/42/equipment").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "プロジェクトが見つかりません");
}

// ---------------------------------------------------------------------------
// Relation lookups
// ---------------------------------------------------------------------------

#[tokio::test]
async fn task_relations_database_failure_is_internal_envelope() {
    let id = Uuid::new_v4();
    let response = get(offline_app(), &format!("/api/v1/tasks/{id}/relations")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json, json!({ "success": false, "error": "タスク取得に失敗しました" }));
}

#[tokio::test]
async fn project_equipment_lookup_failure_is_internal_envelope() {
    let projects = Arc::new(MemoryProjectStore::on(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
    let project = projects
        .create(&CreateProject {
            name: "Line 3".into(),
        })
        .await
        .unwrap();

    let mut state: AppState = build_state(lazy_pool(), test_config());
    let project_service: EntityService<Projects> = EntityService::new(projects);
    state.services.projects = project_service.clone();
    state.services.relations = RelationService::new(
        state.services.tasks.clone(),
        project_service,
        Arc::new(FailingLookup),
    );

    let response = get(
        build_app_with(state),
        &format!("/api/v1/projects/{}/equipment", project.id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(
        json,
        json!({ "success": false, "error": "プロジェクト・設備関連一覧取得に失敗しました" })
    );
}

#[tokio::test]
async fn project_equipment_of_missing_project_is_not_found() {
    let projects = Arc::new(MemoryProjectStore::on(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
    let mut state = build_state(lazy_pool(), test_config());
    let project_service: EntityService<Projects> = EntityService::new(projects);
    state.services.relations = RelationService::new(
        state.services.tasks.clone(),
        project_service,
        Arc::new(FailingLookup),
    );

    let id = Uuid::new_v4();
    let response = get(build_app_with(state), &format!("/api/v1/projects/{id}/equipment")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "プロジェクトが見つかりません");
}

// ---------------------------------------------------------------------------
// Envelope responses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_envelope_statuses_follow_failure_kind() {
    let cases = [
        (FailureKind::Validation, StatusCode::BAD_REQUEST),
        (FailureKind::NotFound, StatusCode::NOT_FOUND),
        (FailureKind::Conflict, StatusCode::CONFLICT),
        (FailureKind::Internal, StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (kind, expected) in cases {
        let envelope: Envelope<()> = Envelope::fail(kind, "設備取得に失敗しました");
        let (status, json) = to_parts(EnvelopeResponse::ok(envelope).into_response()).await;
        assert_eq!(status, expected, "{kind:?}");
        assert_eq!(json, serde_json::json!({ "success": false, "error": "設備取得に失敗しました" }));
    }
}

#[tokio::test]
async fn successful_create_returns_201_with_message() {
    let envelope = Envelope::ok_with_message(serde_json::json!({ "id": 1 }), "設備を作成しました");

    let (status, json) = to_parts(EnvelopeResponse::created(envelope).into_response()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "設備を作成しました");
    assert_eq!(json["data"]["id"], 1);
}
