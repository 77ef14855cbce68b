//! # forma-engine — Form Lifecycle Engine
//!
//! Turns a loaded schema document into an editable form: renders it as
//! a widget tree, tracks edits and touch state, keeps conditional
//! sections consistent with the data, and gates submission.
//!
//! ## Field Tree (`tree`)
//!
//! [`tree::field_nodes`] projects an effective schema plus current data
//! into renderable [`FieldNode`]s: toggles, numeric inputs, selects,
//! text inputs, nested groups, and array repeaters. Pure projection —
//! building the tree never mutates the data.
//!
//! ## Form Session (`session`)
//!
//! [`FormSession`] orchestrates one form lifecycle: every edit
//! re-resolves the effective schema, cascades cleanup of hidden
//! conditional values, and revalidates once the form has been touched.
//! [`FormSession::submit`] is the admission-controlled exit: at most one
//! outstanding submit, all fields force-touched, first error reported.
//!
//! ## Export & Import (`transfer`)
//!
//! [`FormState`] round-trips `{schema, data}` documents and
//! [`transfer::parse_import`] classifies uploads by structural shape.
//!
//! ## Crate Policy
//!
//! - Depends on `forma-core` and `forma-schema` internally; never on
//!   the network client. Collaborator calls stay outside this crate.
//! - Everything here is synchronous; edits run resolution, cleanup, and
//!   validation to completion before the next event.

pub mod session;
pub mod transfer;
pub mod tree;

pub use session::{FormSession, SessionError, SubmissionPayload, SubmitOutcome};
pub use transfer::{FormState, ImportedDocument, TransferError};
pub use tree::{FieldNode, FormView, Widget};
