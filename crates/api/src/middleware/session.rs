//! Session gate for protected paths.

use axum::extract::{Request, State};
use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use pme_core::error::CoreError;

use crate::config::SessionPolicy;
use crate::error::AppError;
use crate::state::AppState;

/// Set on responses to requests that carried a valid session.
pub const SESSION_VALID_HEADER: HeaderName = HeaderName::from_static("x-session-valid");

/// Why a protected request could not be authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    MissingCookie,
    UnknownSession,
    VerifierFailed,
}

impl Rejection {
    fn message(self) -> &'static str {
        match self {
            Rejection::MissingCookie => "Session cookie missing",
            Rejection::UnknownSession => "Session is invalid or expired",
            Rejection::VerifierFailed => "Session could not be verified",
        }
    }
}

/// Authenticate requests on protected paths.
///
/// A resolved [`SessionUser`](pme_db::models::session::SessionUser) is
/// inserted as a request extension and the response is marked with
/// `x-session-valid: true`. Failures are handled per the configured
/// [`SessionPolicy`].
pub async fn session_gate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let session = &state.config.session;
    if !session.is_protected(request.uri().path()) {
        return next.run(request).await;
    }

    let outcome = match session_token(request.headers(), &session.cookie_name) {
        None => Err(Rejection::MissingCookie),
        Some(token) => match state.sessions.verify(&token).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(Rejection::UnknownSession),
            Err(err) => {
                tracing::error!(error = %err, "Session lookup failed");
                Err(Rejection::VerifierFailed)
            }
        },
    };

    match outcome {
        Ok(user) => {
            tracing::debug!(user_id = %user.user_id, "Session verified");
            request.extensions_mut().insert(user);
            let mut response = next.run(request).await;
            response
                .headers_mut()
                .insert(SESSION_VALID_HEADER, HeaderValue::from_static("true"));
            response
        }
        Err(rejection) => match session.policy {
            SessionPolicy::FailOpen => {
                tracing::warn!(
                    path = %request.uri().path(),
                    reason = rejection.message(),
                    "Unauthenticated request let through (fail-open)",
                );
                next.run(request).await
            }
            SessionPolicy::FailClosed => {
                AppError::Core(CoreError::Unauthorized(rejection.message().into()))
                    .into_response()
            }
        },
    }
}

/// The session token from the `Cookie` header(s).
///
/// Signed cookie values (`token.signature`) yield only the token part.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| {
            let value = value.trim_matches('"');
            value
                .rsplit_once('.')
                .map_or(value, |(token, _signature)| token)
                .to_string()
        })
        .filter(|token| !token.is_empty())
}
