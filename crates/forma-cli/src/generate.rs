//! # Generate Subcommand
//!
//! Prompt-driven schema generation. The backend parses the generator's
//! reply and rejects non-document output, but a parsed document is not yet
//! a usable schema: it is re-vetted through the structural gate before it
//! is accepted.

use std::path::PathBuf;

use clap::Args;
use forma_schema::{structural_problems, SchemaDocument};

use crate::{backend, files};

/// Arguments for the generate subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Natural-language description of the desired form.
    pub prompt: String,

    /// Write the schema here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Backend base URL (overrides FORMA_API_URL).
    #[arg(long)]
    pub api_url: Option<String>,
}

pub async fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let client = backend::client(args.api_url)?;
    let value = client.generate_schema(&args.prompt).await?;

    let problems = structural_problems(&value);
    if !problems.is_empty() {
        for problem in &problems {
            println!("generated schema: {problem}");
        }
        anyhow::bail!("generated schema failed vetting; try a different prompt");
    }

    let schema = SchemaDocument::from_value(value)?;
    let text = serde_json::to_string_pretty(schema.raw())?;
    files::write_output(args.output.as_deref(), &text)
}
