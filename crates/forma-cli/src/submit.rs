//! # Submit Subcommand
//!
//! Runs a full session submit (touch everything, validate) and posts the
//! accepted payload to the backend. Invalid data never leaves the machine.

use std::path::PathBuf;

use clap::Args;
use forma_client::SubmissionIn;
use forma_engine::{FormSession, SubmitOutcome};
use uuid::Uuid;

use crate::{backend, files};

/// Arguments for the submit subcommand.
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Path to the schema JSON file.
    pub schema: PathBuf,

    /// Path to the form data JSON file.
    pub data: PathBuf,

    /// Registry id of the schema, when it came from the registry.
    #[arg(long)]
    pub schema_id: Option<Uuid>,

    /// Backend base URL (overrides FORMA_API_URL).
    #[arg(long)]
    pub api_url: Option<String>,
}

pub async fn run(args: SubmitArgs) -> anyhow::Result<()> {
    let schema = files::read_schema(&args.schema)?;
    let data = files::read_form_data(&args.data)?;

    let mut session = FormSession::with_data(schema, data);
    if let Some(id) = args.schema_id {
        session = session.with_schema_id(id);
    }

    let payload = match session.submit() {
        SubmitOutcome::Accepted { payload } => payload,
        SubmitOutcome::Invalid { first_error } => {
            for error in session.errors() {
                println!("{}: {}", error.field, error.message);
            }
            anyhow::bail!("submission blocked: {}", first_error.message);
        }
        SubmitOutcome::AlreadyPending => {
            anyhow::bail!("a submission is already pending");
        }
    };

    let client = backend::client(args.api_url)?;
    let receipt = client
        .submit_form(&SubmissionIn {
            schema_id: payload.schema_id,
            schema_json: payload.schema_json,
            form_data: payload.form_data,
        })
        .await?;

    println!("submission accepted: {}", receipt.submission_id);
    Ok(())
}
