//! [`Backend`] over the REST API using [`reqwest`].

use async_trait::async_trait;
use pme_core::envelope::{DeletedRef, Envelope, FailureKind};
use pme_core::query::{ListFilter, LookupOptions};
use pme_db::Entity;
use reqwest::header::COOKIE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use crate::backend::Backend;
use crate::error::ClientError;

/// HTTP client for one API server. Implements [`Backend`] for every entity.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    api_url: String,
    cookie: Option<String>,
}

impl HttpBackend {
    /// * `api_url` - Base URL of the versioned API, e.g. `http://localhost:3000/api/v1`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Reuse an existing [`reqwest::Client`] (and its connection pool).
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            cookie: None,
        }
    }

    /// Send `cookie` (e.g. `session_token=...`) with every request.
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    /// Collection URL for an entity, e.g. `{api_url}/task-user-relations`.
    pub fn collection_url<E: Entity>(&self) -> String {
        format!("{}/{}", self.api_url, E::RESOURCE)
    }

    /// Record URL; relation keys expand to two path segments.
    pub fn record_url<E: Entity>(&self, key: &E::Key) -> String {
        format!("{}/{}/{}", self.api_url, E::RESOURCE, key)
    }

    fn request(&self, method: Method, url: String) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    /// Decode an envelope from any status code. Failure kinds are restored
    /// from the status, since they are not part of the wire format.
    async fn parse_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Envelope<T>, ClientError> {
        let status = response.status();
        let body = response.text().await?;
        decode_envelope(status, body)
    }
}

/// Decode a response body received with `status`.
pub fn decode_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: String,
) -> Result<Envelope<T>, ClientError> {
    let mut envelope: Envelope<T> = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(_) => {
            return Err(ClientError::UnexpectedResponse {
                status: status.as_u16(),
                body,
            })
        }
    };
    if !envelope.success {
        envelope.failure = Some(failure_from_status(status));
    }
    Ok(envelope)
}

/// Inverse of the server's failure-kind to status mapping.
pub fn failure_from_status(status: StatusCode) -> FailureKind {
    match status {
        StatusCode::BAD_REQUEST => FailureKind::Validation,
        StatusCode::NOT_FOUND => FailureKind::NotFound,
        StatusCode::CONFLICT => FailureKind::Conflict,
        _ => FailureKind::Internal,
    }
}

#[async_trait]
impl<E: Entity> Backend<E> for HttpBackend {
    async fn list(&self, filter: &ListFilter) -> Result<Envelope<Vec<E::Record>>, ClientError> {
        let response = self
            .request(Method::GET, self.collection_url::<E>())
            .query(filter)
            .send()
            .await?;
        Self::parse_envelope(response).await
    }

    async fn get(
        &self,
        key: &E::Key,
        options: LookupOptions,
    ) -> Result<Envelope<E::Record>, ClientError> {
        let response = self
            .request(Method::GET, self.record_url::<E>(key))
            .query(&options)
            .send()
            .await?;
        Self::parse_envelope(response).await
    }

    async fn create(&self, input: &E::Create) -> Result<Envelope<E::Record>, ClientError> {
        let response = self
            .request(Method::POST, self.collection_url::<E>())
            .json(input)
            .send()
            .await?;
        Self::parse_envelope(response).await
    }

    async fn update(
        &self,
        key: &E::Key,
        input: &E::Update,
    ) -> Result<Envelope<E::Record>, ClientError> {
        let response = self
            .request(Method::PUT, self.record_url::<E>(key))
            .json(input)
            .send()
            .await?;
        Self::parse_envelope(response).await
    }

    async fn delete(&self, key: &E::Key) -> Result<Envelope<DeletedRef<E::Key>>, ClientError> {
        let response = self
            .request(Method::DELETE, self.record_url::<E>(key))
            .send()
            .await?;
        Self::parse_envelope(response).await
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pme_db::models::project::{Project, Projects};
    use pme_db::models::task_user_relation::{TaskUserKey, TaskUserRelations};
    use uuid::Uuid;

    use super::*;

    #[test]
    fn urls_use_resource_and_key_path() {
        let backend = HttpBackend::new("http://localhost:3000/api/v1/");
        assert_eq!(
            backend.collection_url::<Projects>(),
            "http://localhost:3000/api/v1/projects"
        );

        let key = TaskUserKey {
            task_id: Uuid::from_u128(1),
            user_id: Uuid::from_u128(2),
        };
        assert_eq!(
            backend.record_url::<TaskUserRelations>(&key),
            format!(
                "http://localhost:3000/api/v1/task-user-relations/{}/{}",
                Uuid::from_u128(1),
                Uuid::from_u128(2)
            )
        );
    }

    #[test]
    fn statuses_map_back_to_failure_kinds() {
        assert_eq!(failure_from_status(StatusCode::BAD_REQUEST), FailureKind::Validation);
        assert_eq!(failure_from_status(StatusCode::NOT_FOUND), FailureKind::NotFound);
        assert_eq!(failure_from_status(StatusCode::CONFLICT), FailureKind::Conflict);
        assert_eq!(
            failure_from_status(StatusCode::INTERNAL_SERVER_ERROR),
            FailureKind::Internal
        );
    }

    #[test]
    fn record_envelopes_decode() {
        let id = Uuid::from_u128(5);
        let body = format!(
            r#"{{"success":true,"data":{{"id":"{id}","name":"Line 3","projectNumber":"PME-20241231-001","status":"active","createdAt":"2024-12-31T01:00:00Z","updatedAt":"2024-12-31T01:00:00Z","deletedAt":null}},"message":"プロジェクトを作成しました"}}"#
        );
        let envelope: Envelope<Project> = decode_envelope(StatusCode::CREATED, body).unwrap();
        let project = envelope.into_result().unwrap();
        assert_eq!(project.id, id);
        assert_eq!(project.project_number, "PME-20241231-001");

        let list: Envelope<Vec<Project>> =
            decode_envelope(StatusCode::OK, r#"{"success":true,"data":[]}"#.into()).unwrap();
        assert_eq!(list.data, Some(Vec::new()));
    }

    #[test]
    fn failure_kind_comes_from_status() {
        let envelope: Envelope<Project> = decode_envelope(
            StatusCode::NOT_FOUND,
            r#"{"success":false,"error":"プロジェクトが見つかりません"}"#.into(),
        )
        .unwrap();
        assert_eq!(envelope.failure, Some(FailureKind::NotFound));
        assert!(envelope.data.is_none());
    }

    #[test]
    fn non_envelope_body_is_unexpected() {
        let result: Result<Envelope<Project>, _> =
            decode_envelope(StatusCode::BAD_GATEWAY, "upstream down".into());
        assert_matches!(
            result,
            Err(ClientError::UnexpectedResponse { status: 502, ref body }) if body == "upstream down"
        );
    }
}
