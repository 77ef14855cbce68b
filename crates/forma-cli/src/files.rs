//! Shared file loading and writing for subcommand handlers.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use forma_core::FormData;
use forma_schema::SchemaDocument;

/// Read a JSON document from disk.
pub(crate) fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Load a schema file through the structural gate.
pub(crate) fn read_schema(path: &Path) -> anyhow::Result<SchemaDocument> {
    let raw = read_json(path)?;
    SchemaDocument::from_value(raw)
        .with_context(|| format!("{} failed schema vetting", path.display()))
}

/// Load form data (a JSON object) from disk.
pub(crate) fn read_form_data(path: &Path) -> anyhow::Result<FormData> {
    let raw = read_json(path)?;
    serde_json::from_value(raw)
        .with_context(|| format!("{} must contain a JSON object", path.display()))
}

/// Write text to a file, or to stdout when no path was given.
pub(crate) fn write_output(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)
                .with_context(|| format!("could not write {}", path.display()))?;
            println!("wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Write a value as pretty-printed JSON.
pub(crate) fn write_pretty<T: serde::Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text).with_context(|| format!("could not write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}
