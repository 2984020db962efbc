//! Integration tests for the session gate. No database is needed: sessions
//! come from test verifiers and projects from an in-memory store.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{
    body_json, build_app_with, build_state, config_with_policy, get, get_anonymous,
    get_with_cookie, lazy_pool, test_config, BrokenSessionVerifier, MemoryProjectStore,
};
use pme_api::config::SessionPolicy;
use pme_api::services::EntityService;
use pme_api::state::AppState;

fn state_with_policy(policy: SessionPolicy) -> AppState {
    let mut state = build_state(lazy_pool(), config_with_policy(policy));
    let store = MemoryProjectStore::on(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    state.services.projects = EntityService::new(Arc::new(store));
    state
}

// ---------------------------------------------------------------------------
// Fail-closed (default)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_cookie_is_rejected_when_fail_closed() {
    let app = build_app_with(state_with_policy(SessionPolicy::FailClosed));

    let response = get_anonymous(app, "/api/v1/projects").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get("x-session-valid").is_none());
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Session cookie missing");
}

#[tokio::test]
async fn unknown_token_is_rejected_when_fail_closed() {
    let app = build_app_with(state_with_policy(SessionPolicy::FailClosed));

    let response = get_with_cookie(app, "/api/v1/projects", "session_token=forged").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Session is invalid or expired");
}

#[tokio::test]
async fn verifier_error_is_rejected_when_fail_closed() {
    let mut state = state_with_policy(SessionPolicy::FailClosed);
    state.sessions = Arc::new(BrokenSessionVerifier);
    let app = build_app_with(state);

    let response = get(app, "/api/v1/projects").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Session could not be verified");
    assert!(!json.to_string().contains("Database connection failed"));
}

#[tokio::test]
async fn valid_session_is_marked_on_response() {
    let app = build_app_with(state_with_policy(SessionPolicy::FailClosed));

    let response = get(app, "/api/v1/projects").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-session-valid").unwrap(),
        "true"
    );
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn signed_cookie_value_is_accepted() {
    let app = build_app_with(state_with_policy(SessionPolicy::FailClosed));
    let cookie = format!("theme=dark; session_token={}.c2lnbmF0dXJl", common::TEST_TOKEN);

    let response = get_with_cookie(app, "/api/v1/projects", &cookie).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-session-valid").unwrap(), "true");
}

#[tokio::test]
async fn session_endpoint_returns_the_resolved_user() {
    let app = build_app_with(state_with_policy(SessionPolicy::FailClosed));

    let response = get(app, "/api/v1/session").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["email"], "sato@example.com");
    assert_eq!(json["data"]["name"], "Sato");
}

#[tokio::test]
async fn unprotected_paths_skip_the_gate() {
    let app = build_app_with(state_with_policy(SessionPolicy::FailClosed));

    // Not under any protected prefix: routing decides, not the gate.
    let response = get_anonymous(app, "/not-gated").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn protected_page_prefixes_are_gated() {
    let app = build_app_with(state_with_policy(SessionPolicy::FailClosed));

    let response = get_anonymous(app, "/dashboard").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Fail-open
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_cookie_passes_through_when_fail_open() {
    let app = build_app_with(state_with_policy(SessionPolicy::FailOpen));

    let response = get_anonymous(app, "/api/v1/projects").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-session-valid").is_none());
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], serde_json::json!([]));
}

#[tokio::test]
async fn verifier_error_passes_through_when_fail_open() {
    let mut state = state_with_policy(SessionPolicy::FailOpen);
    state.sessions = Arc::new(BrokenSessionVerifier);
    let app = build_app_with(state);

    let response = get(app, "/api/v1/projects").await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn session_endpoint_without_user_is_unauthorized_when_fail_open() {
    let app = build_app_with(state_with_policy(SessionPolicy::FailOpen));

    let response = get_anonymous(app, "/api/v1/session").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No active session");
}

#[tokio::test]
async fn default_config_is_fail_closed() {
    assert_eq!(test_config().session.policy, SessionPolicy::FailClosed);
}
