//! HTTP rendering of service envelopes.
//!
//! The JSON body is the envelope itself; the status code comes from its
//! failure kind.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pme_core::envelope::{Envelope, FailureKind};
use serde::Serialize;

/// An [`Envelope`] with the status to use when it succeeded.
#[derive(Debug)]
pub struct EnvelopeResponse<T> {
    success_status: StatusCode,
    envelope: Envelope<T>,
}

impl<T> EnvelopeResponse<T> {
    /// 200 on success.
    pub fn ok(envelope: Envelope<T>) -> Self {
        Self {
            success_status: StatusCode::OK,
            envelope,
        }
    }

    /// 201 on success.
    pub fn created(envelope: Envelope<T>) -> Self {
        Self {
            success_status: StatusCode::CREATED,
            envelope,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.envelope.failure {
            _ if self.envelope.success => self.success_status,
            Some(kind) => failure_status(kind),
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Status code for a failed envelope.
pub fn failure_status(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::Validation => StatusCode::BAD_REQUEST,
        FailureKind::NotFound => StatusCode::NOT_FOUND,
        FailureKind::Conflict => StatusCode::CONFLICT,
        FailureKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl<T: Serialize> IntoResponse for EnvelopeResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self.envelope)).into_response()
    }
}
