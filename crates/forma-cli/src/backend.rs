//! Backend client construction for subcommands.

use forma_client::{BackendClient, BackendConfig};

/// Build a client from the `--api-url` override or the environment.
pub(crate) fn client(api_url: Option<String>) -> anyhow::Result<BackendClient> {
    let config = match api_url {
        Some(url) => BackendConfig::new(url),
        None => BackendConfig::from_env()?,
    };
    let client = BackendClient::new(config)?;
    tracing::debug!(base_url = client.base_url(), "backend client ready");
    Ok(client)
}
