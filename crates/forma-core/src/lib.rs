//! # forma-core — Shared Form Engine Types
//!
//! Field path addressing and the ordered form-data container used by every
//! crate in the workspace.
//!
//! ## Design
//!
//! - Paths are parsed once into a typed [`FieldPath`]; display round-trips
//!   the dotted/bracketed notation (`contacts[0].email`).
//! - [`FormData`] preserves key insertion order (serde_json
//!   `preserve_order`) — property order is contractual for rendering and
//!   for document round-trips.

pub mod data;
pub mod path;

pub use data::{DataError, FormData};
pub use path::{FieldPath, PathError, Segment};
