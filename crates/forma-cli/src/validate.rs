//! # Validate Subcommand
//!
//! Vets a schema document before it reaches a form session: JSON parse,
//! root shape, then the per-property structural checks.

use std::path::PathBuf;

use clap::Args;
use forma_schema::structural_problems;

use crate::files;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the schema JSON file.
    pub schema: PathBuf,
}

pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let raw = files::read_json(&args.schema)?;
    let problems = structural_problems(&raw);

    if problems.is_empty() {
        println!("{}: ok", args.schema.display());
        return Ok(());
    }
    for problem in &problems {
        println!("{}: {problem}", args.schema.display());
    }
    anyhow::bail!("{} structural problem(s) found", problems.len());
}
