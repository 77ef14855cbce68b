//! # Check Subcommand
//!
//! Validates a data file against a schema the way a submit would: resolve
//! the conditional branches for this data, validate, and print the
//! projected per-field errors.

use std::path::PathBuf;

use clap::Args;
use forma_schema::{resolve, validate_form_data};

use crate::files;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the schema JSON file.
    pub schema: PathBuf,

    /// Path to the form data JSON file.
    pub data: PathBuf,
}

pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    let schema = files::read_schema(&args.schema)?;
    let data = files::read_form_data(&args.data)?;

    let effective = resolve(schema.root(), &data);
    let errors = validate_form_data(&effective, &data);

    if errors.is_empty() {
        println!("{}: valid", args.data.display());
        return Ok(());
    }
    for error in &errors {
        println!("{}: {}", error.field, error.message);
    }
    anyhow::bail!("{} validation error(s)", errors.len());
}
