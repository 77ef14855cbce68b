//! # forma-cli — Forma Command-Line Interface
//!
//! Front door to the form engine and the backend client: schema vetting,
//! field-tree inspection, data checking, form-state export/import, backend
//! submission, registry browsing, and prompt-driven schema generation.
//!
//! ## Subcommands
//!
//! - `validate` — structural gate for schema documents
//! - `inspect` — render the field tree a session would present
//! - `check` — validate a data file against a schema
//! - `export` / `import` — move form state in and out of files
//! - `submit` — validate and send a submission to the backend
//! - `registry` — browse stored schemas and submissions
//! - `generate` — prompt-driven schema generation with vetting
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers delegate to `forma-schema`, `forma-engine`, and
//!   `forma-client` — no engine logic lives here.
//! - Results go to stdout; diagnostics go through `tracing`.

mod backend;
mod files;

pub mod check;
pub mod generate;
pub mod inspect;
pub mod registry;
pub mod submit;
pub mod transfer;
pub mod validate;
