//! Memoization keys for query containers.
//!
//! Two requests share a key when they address the same resource with
//! equal parameters, regardless of the parameters' identity.

use pme_core::hashing::sha256_hex;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: &'static str,
    digest: String,
}

impl QueryKey {
    /// Key `params` under `resource`.
    ///
    /// Parameters are hashed as canonical JSON: object keys are sorted by
    /// `serde_json::Value`, so field order does not matter.
    pub fn new<P: Serialize + ?Sized>(resource: &'static str, params: &P) -> Self {
        let canonical = serde_json::to_value(params)
            .map(|value| value.to_string())
            .unwrap_or_default();
        Self {
            resource,
            digest: sha256_hex(canonical.as_bytes()),
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }
}

#[cfg(test)]
mod tests {
    use pme_core::query::ListFilter;
    use serde_json::json;

    use super::*;

    #[test]
    fn equal_filters_share_a_key() {
        let a = QueryKey::new("projects", &ListFilter::page(20, 0));
        let b = QueryKey::new("projects", &ListFilter::page(20, 0));
        assert_eq!(a, b);
        assert_eq!(a.digest().len(), 64);
    }

    #[test]
    fn field_order_is_irrelevant() {
        let a = QueryKey::new("tasks", &json!({ "limit": 5, "offset": 10 }));
        let b = QueryKey::new("tasks", &json!({ "offset": 10, "limit": 5 }));
        assert_eq!(a, b);
    }

    #[test]
    fn resource_and_params_both_distinguish() {
        let filter = ListFilter::default();
        assert_ne!(
            QueryKey::new("projects", &filter),
            QueryKey::new("users", &filter)
        );
        assert_ne!(
            QueryKey::new("projects", &filter),
            QueryKey::new("projects", &ListFilter::including_deleted())
        );
    }
}
