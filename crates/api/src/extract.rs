//! Request extractors whose rejections are rendered as envelopes.
//!
//! Axum's own `Json`, `Query` and `Path` reject with plain-text bodies.
//! These wrappers keep every API response in the `{success, error}` shape.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use pme_core::envelope::{Envelope, FailureKind};

use crate::response::EnvelopeResponse;

/// Shown for any body or parameter that cannot be decoded.
pub const INVALID_REQUEST: &str = "リクエストの形式が正しくありません";

/// JSON body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(InvalidRequest))]
pub struct ValidJson<T>(pub T);

/// Query string.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(InvalidRequest))]
pub struct ValidQuery<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(InvalidRequest))]
pub struct ValidPath<T>(pub T);

/// A request axum could not decode. Answers 400 with a validation envelope;
/// the decoder's own message is only logged.
#[derive(Debug)]
pub struct InvalidRequest {
    detail: String,
}

impl InvalidRequest {
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<JsonRejection> for InvalidRequest {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            detail: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for InvalidRequest {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            detail: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for InvalidRequest {
    fn from(rejection: PathRejection) -> Self {
        Self {
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for InvalidRequest {
    fn into_response(self) -> Response {
        tracing::debug!(detail = %self.detail, "Rejected undecodable request");
        EnvelopeResponse::ok(Envelope::<()>::fail(FailureKind::Validation, INVALID_REQUEST))
            .into_response()
    }
}
