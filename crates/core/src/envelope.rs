//! The success/error envelope returned by every service operation.
//!
//! Wire shape: `{ "success": bool, "data"?: T, "message"?: string, "error"?: string }`.
//! The failure classification is carried alongside but never serialized; the
//! HTTP layer uses it to choose a status code.

use serde::{Deserialize, Serialize};

/// Why an envelope failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Input rejected before any I/O.
    Validation,
    /// The addressed record does not exist (or is hidden by soft delete).
    NotFound,
    /// The record already exists.
    Conflict,
    /// Infrastructure failure; the detail was logged and withheld.
    Internal,
}

/// Uniform success/error wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            failure: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    pub fn fail(kind: FailureKind, error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
            failure: Some(kind),
        }
    }

    /// Collapse into a `Result`, using the error string as the failure value.
    ///
    /// A success envelope without data, or a failure envelope without an
    /// error string, is reported as an empty-response error.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data, self.error) {
            (true, Some(data), _) => Ok(data),
            (false, _, Some(error)) => Err(error),
            _ => Err(EMPTY_RESPONSE.to_string()),
        }
    }

    /// Transform the success payload, keeping message and failure data.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            success: self.success,
            data: self.data.map(f),
            message: self.message,
            error: self.error,
            failure: self.failure,
        }
    }

    /// Split off the success payload, or re-type the failure so it can be
    /// returned from a handler producing a different payload.
    pub fn ok_or_failure<U>(self) -> Result<T, Envelope<U>> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(Envelope {
                success: false,
                data: None,
                message: None,
                error: Some(self.error.unwrap_or_else(|| EMPTY_RESPONSE.to_string())),
                failure: Some(self.failure.unwrap_or(FailureKind::Internal)),
            }),
        }
    }
}

/// Reported when an envelope carries neither data nor an error.
pub const EMPTY_RESPONSE: &str = "サーバーから有効な応答がありませんでした";

/// Payload of a successful delete: the key of the removed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedRef<K> {
    pub id: K,
}
