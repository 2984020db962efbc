//! Shared list/lookup parameter types.
//!
//! These travel as query strings (`?includeDeleted=true&limit=20&offset=40`)
//! and as JSON in client query keys, so field names are camelCase.

use serde::{Deserialize, Serialize};

/// Upper bound applied to any caller-supplied `limit`.
pub const MAX_LIST_LIMIT: i64 = 1000;

/// Filter for `find_all` style queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilter {
    /// Include soft-deleted rows.
    #[serde(default)]
    pub include_deleted: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListFilter {
    pub fn including_deleted() -> Self {
        Self {
            include_deleted: true,
            ..Self::default()
        }
    }

    pub fn page(limit: i64, offset: i64) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
            ..Self::default()
        }
    }

    /// The limit to send to the database. `None` means no limit.
    pub fn effective_limit(&self) -> Option<i64> {
        clamp_limit(self.limit, MAX_LIST_LIMIT)
    }

    pub fn effective_offset(&self) -> i64 {
        clamp_offset(self.offset)
    }
}

/// Options for single-record lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupOptions {
    #[serde(default)]
    pub include_deleted: bool,
}

/// Clamp a user-provided limit into `1..=max`; an absent limit stays absent.
pub fn clamp_limit(limit: Option<i64>, max: i64) -> Option<i64> {
    limit.map(|l| l.clamp(1, max))
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
