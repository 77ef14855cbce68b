//! # HTTP Client for the Form Backend
//!
//! Wraps a [`reqwest::Client`] with the backend base URL and typed methods
//! for every endpoint: submission, the schema registry, and prompt-driven
//! schema generation. The client is `Send + Sync` and designed to be shared
//! via `Arc` across async tasks.
//!
//! ## Error Handling
//!
//! Transport failures map to [`BackendError::Http`]. Non-2xx responses map
//! to [`BackendError::Api`] with the endpoint, status, and the backend's
//! `detail` message extracted from the JSON error body (falling back to the
//! raw body when the backend answers with plain text).
//!
//! ## Timeout & Retry
//!
//! Each request uses a per-request timeout (configurable, default 10s).
//! Reads retry transient transport errors with exponential backoff via the
//! `retry` module; `POST` endpoints are never retried because submissions
//! carry no idempotency key.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::retry;
use crate::types::{
    PromptReply, PromptRequest, RecordCount, SchemaRecord, SubmissionDetail, SubmissionIn,
    SubmissionReceipt, SubmissionRecord,
};

/// HTTP client for the form backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client from configuration.
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::CONTENT_TYPE,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()
            .map_err(|source| BackendError::Client { source })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Create a backend client from `FORMA_API_URL` / `FORMA_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, BackendError> {
        Self::new(BackendConfig::from_env()?)
    }

    /// Base URL this client talks to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ─── Endpoints ──────────────────────────────────────────────────────

    /// `POST /submit-form`: store a submission and return its receipt.
    pub async fn submit_form(
        &self,
        submission: &SubmissionIn,
    ) -> Result<SubmissionReceipt, BackendError> {
        self.post_json("/submit-form", submission).await
    }

    /// `GET /list-schemas`: page through stored schemas.
    pub async fn list_schemas(
        &self,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<SchemaRecord>, BackendError> {
        self.get_json(
            "/list-schemas",
            &[("skip", skip.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    /// `GET /schemas-count`: total number of stored schemas.
    pub async fn count_schemas(&self) -> Result<u64, BackendError> {
        let count: RecordCount = self.get_json("/schemas-count", &[]).await?;
        Ok(count.total_records)
    }

    /// `GET /submissions-count`: number of submissions for one schema.
    pub async fn count_submissions(&self, schema_id: Uuid) -> Result<u64, BackendError> {
        let count: RecordCount = self
            .get_json(
                "/submissions-count",
                &[("schema_id", schema_id.to_string())],
            )
            .await?;
        Ok(count.total_records)
    }

    /// `GET /submissions/{schema_id}`: page through a schema's submissions.
    pub async fn list_submissions(
        &self,
        schema_id: Uuid,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<SubmissionRecord>, BackendError> {
        let endpoint = format!("/submissions/{schema_id}");
        self.get_json(
            &endpoint,
            &[("skip", skip.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    /// `GET /submission/{submission_id}`: one submission with its schema.
    pub async fn submission_detail(
        &self,
        submission_id: Uuid,
    ) -> Result<SubmissionDetail, BackendError> {
        let endpoint = format!("/submission/{submission_id}");
        self.get_json(&endpoint, &[]).await
    }

    /// `POST /ai-response`: generate a schema from a natural-language prompt.
    ///
    /// The backend guarantees a parsed JSON object, not a usable schema;
    /// callers vet the document through the structural gate before use.
    pub async fn generate_schema(&self, prompt: &str) -> Result<serde_json::Value, BackendError> {
        let request = PromptRequest {
            prompt: prompt.to_string(),
        };
        let reply: PromptReply = self.post_json("/ai-response", &request).await?;
        Ok(reply.response)
    }

    // ─── Request Plumbing ───────────────────────────────────────────────

    async fn get_json<T>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let resp = retry::send_with_retry(|| self.client.get(&url).query(query).send())
            .await
            .map_err(|source| BackendError::Http {
                endpoint: endpoint.to_string(),
                source,
            })?;
        self.read_response(endpoint, resp).await
    }

    async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| BackendError::Http {
                endpoint: endpoint.to_string(),
                source,
            })?;
        self.read_response(endpoint, resp).await
    }

    async fn read_response<T>(
        &self,
        endpoint: &str,
        resp: reqwest::Response,
    ) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
    {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                detail: extract_detail(&body),
            });
        }

        resp.json()
            .await
            .map_err(|source| BackendError::Deserialization {
                endpoint: endpoint.to_string(),
                source,
            })
    }
}

/// Pull the human-readable message out of a backend error body.
///
/// The backend reports errors as `{"detail": "..."}`; anything else (plain
/// text, HTML from a proxy, structured validation output) is passed through
/// trimmed.
fn extract_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("detail")
            .and_then(|detail| detail.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| body.trim().to_string()),
        Err(_) => body.trim().to_string(),
    }
}
