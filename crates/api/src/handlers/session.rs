//! Handler for the current session.

use axum::extract::Request;
use pme_core::envelope::Envelope;
use pme_core::error::CoreError;
use pme_db::models::session::SessionUser;

use crate::error::{AppError, AppResult};
use crate::response::EnvelopeResponse;

/// GET /api/v1/session
///
/// The user resolved by the session gate. Under the fail-open policy a
/// request can arrive here without one.
pub async fn current(request: Request) -> AppResult<EnvelopeResponse<SessionUser>> {
    let user = request
        .extensions()
        .get::<SessionUser>()
        .cloned()
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("No active session".into())))?;
    Ok(EnvelopeResponse::ok(Envelope::ok(user)))
}
