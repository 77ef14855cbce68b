//! # Registry Subcommand
//!
//! Read side of the backend: stored schemas, their submissions, counts,
//! and single-submission detail.

use clap::{Args, Subcommand};
use uuid::Uuid;

use crate::backend;

/// Arguments for the registry subcommand.
#[derive(Args, Debug)]
pub struct RegistryArgs {
    /// Backend base URL (overrides FORMA_API_URL).
    #[arg(long)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: RegistryCommand,
}

/// Registry operations.
#[derive(Subcommand, Debug)]
pub enum RegistryCommand {
    /// List stored schemas with the total count.
    Schemas {
        /// Records to skip.
        #[arg(long, default_value_t = 0)]
        skip: u64,

        /// Page size.
        #[arg(long, default_value_t = 10)]
        limit: u64,
    },
    /// List submissions for one schema.
    Submissions {
        /// Registry id of the schema.
        schema_id: Uuid,

        /// Records to skip.
        #[arg(long, default_value_t = 0)]
        skip: u64,

        /// Page size.
        #[arg(long, default_value_t = 10)]
        limit: u64,
    },
    /// Show one submission with its schema.
    Show {
        /// Id of the submission.
        submission_id: Uuid,
    },
}

pub async fn run(args: RegistryArgs) -> anyhow::Result<()> {
    let client = backend::client(args.api_url)?;

    match args.command {
        RegistryCommand::Schemas { skip, limit } => {
            let total = client.count_schemas().await?;
            let schemas = client.list_schemas(skip, limit).await?;
            println!("{total} schema(s) stored");
            for schema in schemas {
                println!(
                    "{}  {}  {}",
                    schema.id,
                    schema.created_at.format("%Y-%m-%d %H:%M"),
                    schema.name.as_deref().unwrap_or("(unnamed)")
                );
            }
        }
        RegistryCommand::Submissions {
            schema_id,
            skip,
            limit,
        } => {
            let total = client.count_submissions(schema_id).await?;
            let submissions = client.list_submissions(schema_id, skip, limit).await?;
            println!("{total} submission(s) for {schema_id}");
            for submission in submissions {
                println!(
                    "{}  {}",
                    submission.id,
                    submission.submitted_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        RegistryCommand::Show { submission_id } => {
            let detail = client.submission_detail(submission_id).await?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
    }
    Ok(())
}
