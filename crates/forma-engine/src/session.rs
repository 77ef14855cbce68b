//! # Form Session
//!
//! The stateful orchestrator for one form lifecycle: holds the loaded
//! schema, the current data, the touched-path set, and the last computed
//! errors, and keeps them consistent across edits.
//!
//! ## Lifecycle
//!
//! ```text
//! new ──▶ edit (set_field / blur / push_row / remove_row)
//!            │   each edit: resolve ▶ cascade cleanup ▶ revalidate
//!            ▼
//!        submit ──▶ Invalid { first_error }   (stays editable)
//!            │
//!            └────▶ Accepted { payload } ──▶ finish_submit
//! ```
//!
//! ## Consistency Rules
//!
//! - Every data change re-resolves the effective schema against the
//!   *new* data; values whose top-level property vanished from the
//!   effective schema are deleted outright, never hidden. Re-enabling
//!   the condition later yields a fresh default, not the stale value.
//! - No validation runs before the first blur; after it, every change
//!   revalidates. Errors exist independently of touch state and are only
//!   *surfaced* for touched paths.
//! - At most one submit is outstanding at a time; further attempts
//!   report [`SubmitOutcome::AlreadyPending`] until [`FormSession::finish_submit`].

use std::collections::BTreeSet;

use forma_core::{DataError, FieldPath, FormData, PathError, Segment};
use forma_schema::{
    resolve, validate_form_data, FieldError, ObjectSchema, SchemaDocument, SchemaNode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::tree::{self, FormView};

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors surfaced by session editing operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The supplied field path string does not parse.
    #[error("invalid field path: {0}")]
    Path(#[from] PathError),

    /// The edit could not be applied to the form data.
    #[error("form data update failed: {0}")]
    Data(#[from] DataError),

    /// A row operation targeted a path that is not an array in the
    /// effective schema.
    #[error("field {path} is not an array in the effective schema")]
    NotAnArray {
        /// The offending path.
        path: String,
    },
}

// ─── Submit Outcome ──────────────────────────────────────────────────

/// What a submit attempt decided.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A previous submit is still awaiting its collaborator; nothing
    /// was validated or changed.
    AlreadyPending,
    /// Validation failed. Every reachable field is now touched, so all
    /// errors render; attention goes to the first error in the list.
    Invalid {
        /// The lowest-index error of the validation pass.
        first_error: FieldError,
    },
    /// Validation passed and the session is now pending; hand the
    /// payload to the submit collaborator.
    Accepted {
        /// The document to persist.
        payload: SubmissionPayload,
    },
}

/// The document handed to the submit collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    /// Registry id of the schema, when the form was loaded from one.
    pub schema_id: Option<Uuid>,
    /// The raw schema document as loaded.
    pub schema_json: Value,
    /// The entered form data.
    pub form_data: FormData,
}

// ─── Session ─────────────────────────────────────────────────────────

/// One form lifecycle: schema, data, touch tracking, errors, and submit
/// admission control.
#[derive(Debug, Clone)]
pub struct FormSession {
    schema: SchemaDocument,
    schema_id: Option<Uuid>,
    data: FormData,
    touched: BTreeSet<String>,
    errors: Vec<FieldError>,
    submitting: bool,
}

impl FormSession {
    /// Start a session over a loaded schema with empty data.
    pub fn new(schema: SchemaDocument) -> Self {
        Self::with_data(schema, FormData::new())
    }

    /// Start a session with pre-existing data (an import or a prior
    /// submission). The form comes up pristine: no validation runs
    /// until a field is touched.
    pub fn with_data(schema: SchemaDocument, data: FormData) -> Self {
        Self {
            schema,
            schema_id: None,
            data,
            touched: BTreeSet::new(),
            errors: Vec::new(),
            submitting: false,
        }
    }

    /// Attach the registry id the schema was loaded under; submissions
    /// will carry it.
    pub fn with_schema_id(mut self, schema_id: Uuid) -> Self {
        self.schema_id = Some(schema_id);
        self
    }

    /// The loaded schema document.
    pub fn schema(&self) -> &SchemaDocument {
        &self.schema
    }

    /// Registry id of the schema, when attached.
    pub fn schema_id(&self) -> Option<Uuid> {
        self.schema_id
    }

    /// Current form data.
    pub fn data(&self) -> &FormData {
        &self.data
    }

    /// Errors from the last validation pass, touched or not.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether a path has been touched (blurred or force-marked).
    pub fn is_touched(&self, path: &str) -> bool {
        self.touched.contains(path)
    }

    /// Whether a submit is awaiting its collaborator.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The schema currently governing rendering and validation.
    pub fn effective_schema(&self) -> ObjectSchema {
        resolve(self.schema.root(), &self.data)
    }

    // ── Edits ────────────────────────────────────────────────────────

    /// Apply one field edit.
    ///
    /// Merges the value into the data, re-resolves the effective schema
    /// against the new data, deletes any top-level values the resolution
    /// hid, and revalidates once any field has been touched.
    pub fn set_field(&mut self, path: &str, value: Value) -> Result<(), SessionError> {
        let parsed = FieldPath::parse(path)?;
        self.data.set(&parsed, value)?;
        self.apply_conditional_cleanup();
        if !self.touched.is_empty() {
            self.revalidate();
        }
        Ok(())
    }

    /// Mark a path touched and revalidate.
    pub fn blur(&mut self, path: &str) {
        self.touched.insert(path.to_string());
        self.revalidate();
    }

    /// Append a fresh row to the array at `path`, synthesized from the
    /// item schema's zero value.
    ///
    /// Returns `Ok(false)` without appending when the array is already
    /// at `maxItems`.
    pub fn push_row(&mut self, path: &str) -> Result<bool, SessionError> {
        let parsed = FieldPath::parse(path)?;
        let effective = self.effective_schema();
        let Some(SchemaNode::Array(array)) = node_at(&effective, &parsed) else {
            return Err(SessionError::NotAnArray {
                path: path.to_string(),
            });
        };
        let len = self
            .data
            .get(&parsed)
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        if array.max_items.is_some_and(|max| len as u64 >= max) {
            return Ok(false);
        }
        let fresh = tree::zero_value(&array.items);
        self.set_field(&parsed.index(len).to_string(), fresh)?;
        Ok(true)
    }

    /// Remove the row at `index` from the array at `path`, clipping the
    /// index into bounds, then mark the array touched.
    pub fn remove_row(&mut self, path: &str, index: usize) -> Result<(), SessionError> {
        let parsed = FieldPath::parse(path)?;
        let mut rows = self
            .data
            .get(&parsed)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        if !rows.is_empty() {
            rows.remove(index.min(rows.len() - 1));
        }
        self.data.set(&parsed, Value::Array(rows))?;
        self.apply_conditional_cleanup();
        self.blur(path);
        Ok(())
    }

    // ── Error Visibility ─────────────────────────────────────────────

    /// The error to display for a field, if any.
    ///
    /// Matches an error whose field equals the path or is a dotted or
    /// bracketed descendant of it, and surfaces it only when the path
    /// itself or its top-level segment is touched.
    pub fn visible_error(&self, path: &str) -> Option<String> {
        let dotted = format!("{path}.");
        let bracketed = format!("{path}[");
        let error = self.errors.iter().find(|e| {
            e.field == path || e.field.starts_with(&dotted) || e.field.starts_with(&bracketed)
        })?;
        if self.touched.contains(path) || self.touched.contains(top_level_segment(path)) {
            Some(error.message.clone())
        } else {
            None
        }
    }

    /// Render the whole form as field nodes with touch-gated errors.
    pub fn view(&self) -> FormView {
        let effective = self.effective_schema();
        FormView {
            title: effective.title.clone().unwrap_or_default(),
            description: effective.description.clone(),
            fields: tree::field_nodes(&effective, &self.data, &|path| self.visible_error(path)),
            submitting: self.submitting,
        }
    }

    // ── Submit ───────────────────────────────────────────────────────

    /// Attempt to submit the form.
    ///
    /// Forces a full validation pass against the effective schema and
    /// marks every reachable field path touched, so all errors render.
    /// On success the session enters the pending state and stays there
    /// until [`FormSession::finish_submit`].
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.submitting {
            return SubmitOutcome::AlreadyPending;
        }
        let effective = self.effective_schema();
        for path in tree::field_paths(&effective) {
            self.touched.insert(path);
        }
        self.errors = validate_form_data(&effective, &self.data);
        if let Some(first) = self.errors.first() {
            return SubmitOutcome::Invalid {
                first_error: first.clone(),
            };
        }
        self.submitting = true;
        SubmitOutcome::Accepted {
            payload: SubmissionPayload {
                schema_id: self.schema_id,
                schema_json: self.schema.raw().clone(),
                form_data: self.data.clone(),
            },
        }
    }

    /// Record that the submit collaborator resolved, successfully or
    /// not, re-enabling submission.
    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    /// Discard all entered data, touch state, and errors, keeping the
    /// loaded schema. Any in-flight submit result is abandoned.
    pub fn reset(&mut self) {
        self.data = FormData::new();
        self.touched.clear();
        self.errors.clear();
        self.submitting = false;
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Delete top-level values hidden by conditional resolution of the
    /// current data, and forget their touch state.
    fn apply_conditional_cleanup(&mut self) {
        let effective = self.effective_schema();
        let hidden: Vec<String> = self
            .data
            .keys()
            .filter(|name| !effective.properties.contains_key(*name))
            .map(str::to_string)
            .collect();
        for name in hidden {
            tracing::debug!(field = %name, "dropping value hidden by conditional resolution");
            self.data.remove_key(&name);
            self.touched.remove(&name);
        }
    }

    fn revalidate(&mut self) {
        let effective = self.effective_schema();
        self.errors = validate_form_data(&effective, &self.data);
    }
}

/// Walk the effective schema to the node a path addresses.
fn node_at<'a>(root: &'a ObjectSchema, path: &FieldPath) -> Option<&'a SchemaNode> {
    let mut node = root.properties.get(path.top_level())?;
    for segment in path.tail() {
        node = match (segment, node) {
            (Segment::Key(name), SchemaNode::Object(object)) => object.properties.get(name)?,
            (Segment::Index(_), SchemaNode::Array(array)) => array.items.as_ref(),
            _ => return None,
        };
    }
    Some(node)
}

/// The path's leading segment, split at the first `.` or `[`.
fn top_level_segment(path: &str) -> &str {
    match path.find(['.', '[']) {
        Some(split) => &path[..split],
        None => path,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
