//! # forma-client — Typed HTTP Client for the Form Backend
//!
//! Async client for the Forma backend API. The backend persists schemas and
//! submissions and runs prompt-driven schema generation; this crate gives
//! the rest of the workspace typed access to it.
//!
//! ## Surface
//!
//! - [`BackendClient`] — one method per endpoint: submit a form, page
//!   through stored schemas and submissions, fetch counts, fetch a single
//!   submission with its schema, and generate a schema from a prompt.
//! - [`BackendConfig`] — base URL plus timeout, constructible directly or
//!   from `FORMA_API_URL` / `FORMA_API_TIMEOUT_SECS`.
//! - Wire types in [`types`] mirroring the backend's JSON bodies.
//!
//! ## Crate Policy
//!
//! This crate depends on `forma-core` only for the form data model. Engine
//! concerns (sessions, validation, field trees) stay out: the client ships
//! JSON and reports what the backend said, nothing more.

pub mod config;
pub mod error;
pub mod http;
mod retry;
pub mod types;

pub use config::{BackendConfig, ConfigError, DEFAULT_TIMEOUT_SECS};
pub use error::BackendError;
pub use http::BackendClient;
pub use types::{
    PromptReply, PromptRequest, RecordCount, SchemaRecord, SubmissionDetail, SubmissionIn,
    SubmissionReceipt, SubmissionRecord,
};
