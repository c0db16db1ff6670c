use std::path::Path;

use anyhow::Context;
use shopload_admin::{AdminClient, RetryPolicy};
use shopload_core::AppConfig;
use shopload_import::{ImportSettings, Importer};

pub(crate) fn build_admin_client(config: &AppConfig) -> anyhow::Result<AdminClient> {
    AdminClient::new(
        &config.shop_domain,
        &config.access_token,
        &config.api_version,
        config.request_timeout_secs,
        RetryPolicy {
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_base_ms,
        },
    )
    .map_err(|e| anyhow::anyhow!("failed to build Admin API client: {e}"))
}

pub(crate) fn import_settings(config: &AppConfig) -> ImportSettings {
    ImportSettings {
        collection_id: config.collection_id,
        location_id: config.location_id,
        purge_concurrency: config.purge_concurrency,
    }
}

/// Runs one import and prints the `{success, message}` result as JSON.
pub(crate) async fn run_upload(config: &AppConfig, file: &Path, purge: bool) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;

    let importer = Importer::new(build_admin_client(config)?, import_settings(config));
    tracing::info!(
        file = %file.display(),
        shop = %config.shop_domain,
        env = %config.env,
        purge,
        "starting upload"
    );

    let response = importer
        .upload(Some(bytes.as_slice()), purge)
        .await
        .context("import aborted")?;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
