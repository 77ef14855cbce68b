//! Wire types for the form backend API.
//!
//! These mirror the backend's request and response bodies exactly. Keep them
//! free of engine concerns: the client ships JSON, the engine decides what
//! that JSON means.

use chrono::{DateTime, Utc};
use forma_core::FormData;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ─── Submission ─────────────────────────────────────────────────────────

/// Request body for `POST /submit-form`.
///
/// The full schema document travels with the data so the backend can store
/// self-contained submissions even for ad-hoc schemas that were never saved
/// to the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionIn {
    /// Registry id of the schema the data was entered against, when known.
    pub schema_id: Option<Uuid>,
    /// The schema document in force at submission time.
    pub schema_json: Value,
    /// Captured form data.
    pub form_data: FormData,
}

/// Response body for `POST /submit-form`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Backend-assigned id of the stored submission.
    pub submission_id: Uuid,
}

// ─── Registry Records ───────────────────────────────────────────────────

/// A stored schema, as returned by `GET /list-schemas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaRecord {
    /// Registry id.
    pub id: Uuid,
    /// Human-readable name, usually the schema's title.
    pub name: Option<String>,
    /// The schema document.
    pub schema_json: Value,
    /// When the schema was stored.
    pub created_at: DateTime<Utc>,
}

/// A stored submission, as returned by `GET /submissions/{schema_id}`.
///
/// `schema_id` is always present: the backend registers an ad-hoc schema on
/// the fly when a submission arrives without one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Backend-assigned submission id.
    pub id: Uuid,
    /// Registry id of the schema this submission belongs to.
    pub schema_id: Uuid,
    /// The submitted form data.
    pub form_data: FormData,
    /// When the submission was received.
    pub submitted_at: DateTime<Utc>,
}

/// A single submission with its schema, as returned by
/// `GET /submission/{submission_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionDetail {
    /// Backend-assigned submission id.
    pub id: Uuid,
    /// Registry id of the schema this submission belongs to.
    pub schema_id: Uuid,
    /// The submitted form data.
    pub form_data: FormData,
    /// When the submission was received.
    pub submitted_at: DateTime<Utc>,
    /// The schema document stored with the submission.
    pub schema_json: Value,
    /// Name of the schema, when it came from the registry.
    pub name: Option<String>,
}

/// Count envelope returned by `GET /schemas-count` and
/// `GET /submissions-count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCount {
    /// Total number of matching records.
    #[serde(rename = "totalRecords")]
    pub total_records: u64,
}

// ─── Schema Generation ──────────────────────────────────────────────────

/// Request body for `POST /ai-response`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRequest {
    /// Natural-language description of the desired form.
    pub prompt: String,
}

/// Response body for `POST /ai-response`.
///
/// The backend parses the generator's raw reply (recovering fenced output)
/// and rejects anything that is not a JSON object, so `response` is always
/// a parsed document. It is *not* guaranteed to be a usable schema; callers
/// still vet it through the structural gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptReply {
    /// The generated document.
    pub response: Value,
}

// ─── Tests ──────────────────────────────────────────────────────────────
