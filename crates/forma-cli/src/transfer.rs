//! # Export / Import Subcommands
//!
//! `export` bundles a schema and its data into a single form-state
//! document; `import` classifies a document by shape and unpacks whichever
//! kind it holds. Schemas travelling through either direction pass the
//! structural gate.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use forma_engine::transfer::{parse_import, FormState, ImportedDocument};
use forma_schema::SchemaDocument;

use crate::files;

/// Arguments for the export subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Path to the schema JSON file.
    pub schema: PathBuf,

    /// Path to the form data JSON file.
    pub data: PathBuf,

    /// Write the document here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run_export(args: ExportArgs) -> anyhow::Result<()> {
    let schema = files::read_schema(&args.schema)?;
    let data = files::read_form_data(&args.data)?;

    let state = FormState::new(schema.raw().clone(), data);
    let text = state.to_pretty_json()?;
    files::write_output(args.output.as_deref(), &text)
}

/// Arguments for the import subcommand.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Path to the exported document or schema file.
    pub file: PathBuf,

    /// Write the extracted schema here.
    #[arg(long)]
    pub schema_out: Option<PathBuf>,

    /// Write the extracted data here.
    #[arg(long)]
    pub data_out: Option<PathBuf>,
}

pub fn run_import(args: ImportArgs) -> anyhow::Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("could not read {}", args.file.display()))?;

    match parse_import(&text)? {
        ImportedDocument::FormState(state) => {
            let schema = SchemaDocument::from_value(state.schema.clone())
                .with_context(|| format!("{}: embedded schema failed vetting", args.file.display()))?;
            println!(
                "{}: form state for \"{}\" ({} top-level values)",
                args.file.display(),
                schema.title(),
                state.data.keys().count()
            );
            if let Some(path) = &args.schema_out {
                files::write_pretty(path, &state.schema)?;
            }
            if let Some(path) = &args.data_out {
                files::write_pretty(path, &state.data)?;
            }
        }
        ImportedDocument::Schema(raw) => {
            let schema = SchemaDocument::from_value(raw)
                .with_context(|| format!("{}: schema failed vetting", args.file.display()))?;
            println!(
                "{}: standalone schema \"{}\"",
                args.file.display(),
                schema.title()
            );
            if let Some(path) = &args.schema_out {
                files::write_pretty(path, schema.raw())?;
            }
            if args.data_out.is_some() {
                println!("no form data to extract");
            }
        }
    }
    Ok(())
}
