//! # HTTP client for the notes service
//!
//! [`ApiClient`] wraps a `reqwest::Client` pointed at a configured base URL.
//! [`ApiClient::request`] is the single code path every endpoint goes through:
//!
//! 1. Sends `base_url + path` with `Content-Type: application/json` and, when a
//!    token is given, `Authorization: Bearer <token>`.
//! 2. Reads the body: nothing for `204`, JSON when the content type says so
//!    (an unparsable JSON body counts as no body), raw text otherwise.
//! 3. For a non-2xx status, fails with [`ApiError::Rejected`]. Its message is
//!    the `message` field of a JSON body, else the raw text body, else
//!    `"Request failed with status <code>"`.
//! 4. For a 2xx status, decodes the body into the requested type.
//!
//! Connection failures and the request deadline (set once on the underlying
//! client) surface as [`ApiError::Transport`], which carries no status.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{AuthResponse, AuthUser, Credentials, Note, NoteInput, NotePatch, NoteQuery};
use crate::NotesApi;

/// Deadline applied to every outbound call unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the remote notes REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url`. Every request is abandoned once
    /// `timeout` has elapsed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::transport("client_init", &e))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and decode the response into `T`.
    ///
    /// A `204` decodes as JSON `null`, so `()` and `Option<_>` are valid
    /// targets for endpoints that return no content.
    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let endpoint = format!("{method} {path}");
        let url = format!("{}{path}", self.base_url);

        let mut request = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(&endpoint, &e))?;

        let status = response.status();
        tracing::debug!(%endpoint, status = status.as_u16(), "notes api responded");

        let payload = Payload::read(response)
            .await
            .map_err(|e| ApiError::transport(&endpoint, &e))?;

        if !status.is_success() {
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: payload.rejection_message(status),
            });
        }

        payload.decode(&endpoint, status)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T, ApiError> {
        self.request::<(), T>(Method::GET, path, None, Some(token))
            .await
    }
}

fn note_path(id: &str) -> Result<String, ApiError> {
    if id.is_empty() {
        return Err(ApiError::Validation("Note id is required.".to_string()));
    }
    Ok(format!("/notes/{}", urlencoding::encode(id)))
}

/// Response body as read off the wire.
#[derive(Debug)]
enum Payload {
    Empty,
    Json(Value),
    Text(String),
}

impl Payload {
    async fn read(response: reqwest::Response) -> Result<Self, reqwest::Error> {
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Self::Empty);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));

        if is_json {
            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)
                .map(Self::Json)
                .unwrap_or(Self::Empty))
        } else {
            Ok(Self::Text(response.text().await?))
        }
    }

    fn rejection_message(&self, status: StatusCode) -> String {
        let message = match self {
            Self::Json(Value::Object(fields)) => fields.get("message").map(|m| match m {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            }),
            Self::Json(Value::String(text)) | Self::Text(text) => Some(text.clone()),
            _ => None,
        };

        message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
    }

    fn decode<T: DeserializeOwned>(self, endpoint: &str, status: StatusCode) -> Result<T, ApiError> {
        let value = match self {
            Self::Empty => Value::Null,
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
        };
        serde_json::from_value(value).map_err(|source| ApiError::Decode {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            source,
        })
    }
}

#[async_trait]
impl NotesApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.request(Method::POST, "/auth/login", Some(credentials), None)
            .await
    }

    async fn register(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.request(Method::POST, "/auth/register", Some(credentials), None)
            .await
    }

    async fn me(&self, token: &str) -> Result<AuthUser, ApiError> {
        self.get("/auth/me", token).await
    }

    async fn list_notes(&self, token: &str, query: &NoteQuery) -> Result<Vec<Note>, ApiError> {
        self.get(&format!("/notes{}", query.to_query_string()), token)
            .await
    }

    async fn get_note(&self, token: &str, id: &str) -> Result<Note, ApiError> {
        self.get(&note_path(id)?, token).await
    }

    async fn create_note(&self, token: &str, note: &NoteInput) -> Result<Note, ApiError> {
        self.request(Method::POST, "/notes", Some(note), Some(token))
            .await
    }

    async fn update_note(&self, token: &str, id: &str, patch: &NotePatch) -> Result<Note, ApiError> {
        self.request(Method::PUT, &note_path(id)?, Some(patch), Some(token))
            .await
    }

    async fn delete_note(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.request::<(), IgnoredAny>(Method::DELETE, &note_path(id)?, None, Some(token))
            .await
            .map(|_| ())
    }
}
