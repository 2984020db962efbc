//! Generic CRUD handlers, instantiated once per entity.
//!
//! Keys are read from all path parameters in route order and parsed with
//! the entity key's `FromStr` (`{id}` or `{first}/{second}`).

use std::str::FromStr;

use axum::extract::State;
use pme_core::envelope::{DeletedRef, Envelope, FailureKind};
use pme_core::query::{ListFilter, LookupOptions};
use pme_db::Entity;

use crate::extract::{ValidJson, ValidPath, ValidQuery};
use crate::response::EnvelopeResponse;
use crate::services::EntityService;

/// Path parameters as `(name, value)` pairs.
pub type KeyParams = ValidPath<Vec<(String, String)>>;

/// Parse the key from path parameters. Malformed keys address nothing, so
/// they report the entity's not-found message.
pub fn parse_key<E: Entity, T>(params: &[(String, String)]) -> Result<E::Key, Envelope<T>> {
    let joined = params
        .iter()
        .map(|(_, value)| value.as_str())
        .collect::<Vec<_>>()
        .join("/");
    E::Key::from_str(&joined)
        .map_err(|_| Envelope::fail(FailureKind::NotFound, E::MESSAGES.not_found))
}

/// GET /{resource}
pub async fn list<E: Entity>(
    State(service): State<EntityService<E>>,
    ValidQuery(filter): ValidQuery<ListFilter>,
) -> EnvelopeResponse<Vec<E::Record>> {
    EnvelopeResponse::ok(service.get_all(&filter).await)
}

/// GET /{resource}/{key}
pub async fn get_by_id<E: Entity>(
    State(service): State<EntityService<E>>,
    ValidPath(params): KeyParams,
    ValidQuery(options): ValidQuery<LookupOptions>,
) -> EnvelopeResponse<E::Record> {
    let envelope = match parse_key::<E, _>(&params) {
        Ok(key) => service.get_by_id(&key, options.include_deleted).await,
        Err(envelope) => envelope,
    };
    EnvelopeResponse::ok(envelope)
}

/// POST /{resource}
pub async fn create<E: Entity>(
    State(service): State<EntityService<E>>,
    ValidJson(input): ValidJson<E::Create>,
) -> EnvelopeResponse<E::Record> {
    EnvelopeResponse::created(service.create(&input).await)
}

/// PUT|PATCH /{resource}/{key}
pub async fn update<E: Entity>(
    State(service): State<EntityService<E>>,
    ValidPath(params): KeyParams,
    ValidJson(input): ValidJson<E::Update>,
) -> EnvelopeResponse<E::Record> {
    let envelope = match parse_key::<E, _>(&params) {
        Ok(key) => service.update(&key, &input).await,
        Err(envelope) => envelope,
    };
    EnvelopeResponse::ok(envelope)
}

/// DELETE /{resource}/{key}
pub async fn delete<E: Entity>(
    State(service): State<EntityService<E>>,
    ValidPath(params): KeyParams,
) -> EnvelopeResponse<DeletedRef<E::Key>> {
    let envelope = match parse_key::<E, _>(&params) {
        Ok(key) => service.soft_delete(&key).await,
        Err(envelope) => envelope,
    };
    EnvelopeResponse::ok(envelope)
}

#[cfg(test)]
mod tests {
    use pme_db::models::project::Projects;
    use pme_db::models::task_user_relation::TaskUserRelations;
    use uuid::Uuid;

    use super::*;

    fn params(values: &[&str]) -> Vec<(String, String)> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("p{i}"), v.to_string()))
            .collect()
    }

    #[test]
    fn single_key_parses() {
        let id = Uuid::new_v4();
        let key = parse_key::<Projects, ()>(&params(&[&id.to_string()])).unwrap();
        assert_eq!(key, id);
    }

    #[test]
    fn composite_key_parses_in_route_order() {
        let (task, user) = (Uuid::new_v4(), Uuid::new_v4());
        let key =
            parse_key::<TaskUserRelations, ()>(&params(&[&task.to_string(), &user.to_string()]))
                .unwrap();
        assert_eq!(key.task_id, task);
        assert_eq!(key.user_id, user);
    }

    #[test]
    fn malformed_key_is_not_found() {
        let envelope = parse_key::<Projects, ()>(&params(&["abc"])).unwrap_err();
        assert_eq!(envelope.error.as_deref(), Some("プロジェクトが見つかりません"));
        assert_eq!(envelope.failure, Some(FailureKind::NotFound));
    }
}
