//! # forma-schema — Schema Model, Resolution & Validation
//!
//! Typed JSON Schema documents for form rendering, conditional
//! resolution against live data, and validation with field-addressed
//! errors.
//!
//! ## Schema Model (`node`, `document`)
//!
//! [`SchemaNode`] is a closed tagged union over the six supported node
//! kinds; [`SchemaDocument`] loads a root object schema and rejects
//! structurally unusable documents up front via [`structural_problems`]
//! (missing root `type`/`properties`/`title`, unknown property types,
//! arrays without `items`).
//!
//! ## Conditional Resolution (`resolve`)
//!
//! [`resolve`] computes the *effective* schema for the current data:
//! the base object schema with the matching `then`/`else` branch merged
//! on top and the unselected branch's exclusive properties stripped.
//!
//! ## Validation & Projection (`validate`, `project`)
//!
//! [`SchemaValidator`] wraps a compiled Draft 2020-12 validator;
//! [`validate_form_data`] is the one-call pass that compiles, collects
//! raw errors, and projects them through [`project_errors`] into the
//! `{field, message}` list forms display.
//!
//! ## Crate Policy
//!
//! - Depends only on `forma-core` internally.
//! - Resolution and the full validation pass fail soft: an internal
//!   fault degrades to the base schema or a single `root` error,
//!   never a panic surfaced to the session.
//! - Schema documents are immutable once loaded; effective schemas are
//!   derived copies, never in-place patches.

pub mod document;
pub mod node;
pub mod project;
pub mod resolve;
pub mod validate;

pub use document::{structural_problems, SchemaDocument, SchemaError};
pub use node::{
    ArraySchema, BooleanSchema, BranchSchema, IntegerSchema, NumberSchema, ObjectSchema,
    PredicateCheck, PredicateSchema, SchemaNode, StringSchema,
};
pub use project::{project_errors, FieldError};
pub use resolve::{predicate_holds, resolve};
pub use validate::{validate_form_data, RawError, RawErrorKind, SchemaValidator, ValidatorError};
