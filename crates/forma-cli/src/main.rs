//! # forma CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Forma — schema-driven form toolchain.
///
/// Vets schema documents, renders field trees, checks saved data, moves
/// form state in and out of files, and talks to the Forma backend for
/// submissions, the registry, and schema generation.
#[derive(Parser, Debug)]
#[command(name = "forma", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Vet a schema document against the structural gate.
    Validate(forma_cli::validate::ValidateArgs),
    /// Render the field tree for a schema as JSON.
    Inspect(forma_cli::inspect::InspectArgs),
    /// Check a data file against a schema.
    Check(forma_cli::check::CheckArgs),
    /// Bundle a schema and data file into a form-state document.
    Export(forma_cli::transfer::ExportArgs),
    /// Classify and unpack an exported document.
    Import(forma_cli::transfer::ImportArgs),
    /// Validate a data file and send it to the backend.
    Submit(forma_cli::submit::SubmitArgs),
    /// Browse stored schemas and submissions.
    Registry(forma_cli::registry::RegistryArgs),
    /// Generate a schema from a natural-language prompt.
    Generate(forma_cli::generate::GenerateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate(args) => forma_cli::validate::run(args),
        Commands::Inspect(args) => forma_cli::inspect::run(args),
        Commands::Check(args) => forma_cli::check::run(args),
        Commands::Export(args) => forma_cli::transfer::run_export(args),
        Commands::Import(args) => forma_cli::transfer::run_import(args),
        Commands::Submit(args) => forma_cli::submit::run(args).await,
        Commands::Registry(args) => forma_cli::registry::run(args).await,
        Commands::Generate(args) => forma_cli::generate::run(args).await,
    }
}
