//! # Inspect Subcommand
//!
//! Renders the field tree a session would present for a schema, optionally
//! seeded with saved data, as pretty-printed JSON. With `--validate`, every
//! field is blurred first so the tree carries its error messages.

use std::path::PathBuf;

use clap::Args;
use forma_engine::{tree, FormSession};

use crate::files;

/// Arguments for the inspect subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the schema JSON file.
    pub schema: PathBuf,

    /// Seed the session with saved form data.
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Touch every field so the rendered tree shows validation errors.
    #[arg(long)]
    pub validate: bool,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let schema = files::read_schema(&args.schema)?;
    let mut session = match &args.data {
        Some(path) => FormSession::with_data(schema, files::read_form_data(path)?),
        None => FormSession::new(schema),
    };

    if args.validate {
        let effective = session.effective_schema();
        for path in tree::field_paths(&effective) {
            session.blur(&path);
        }
    }

    let view = session.view();
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
