use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, bail};
use asset_catalog::{
    ASSET_CATALOG_MOCK_DATA_VAR,
    CatalogClient,
    CatalogClientConfig,
    Client,
    MockClient,
};
use asset_browser::config::BrowserConfig;
use tracing::debug;

/// Initialize the catalog client
///
/// - Initialize a mock client if `$ASSET_CATALOG_MOCK_DATA` points at a file of mock responses
/// - Initialize a real client otherwise
pub fn init_catalog_client(config: &BrowserConfig) -> Result<Client, anyhow::Error> {
    if let Ok(path_str) = std::env::var(ASSET_CATALOG_MOCK_DATA_VAR) {
        let path = PathBuf::from(path_str);
        if !path.exists() {
            bail!("path to mock data file doesn't exist: {}", path.display());
        }

        debug!(mock_data_path = %path.display(), "using mock catalog client");
        return Ok(MockClient::new(Some(path))?.into());
    }

    let mut extra_headers = BTreeMap::new();
    // Pass in a bool if we are running in CI, so requests can reflect this in the headers
    if std::env::var("CI").is_ok() {
        extra_headers.insert("x-asset-browser-ci".to_string(), "true".to_string());
    }

    let client_config = CatalogClientConfig {
        extra_headers,
        user_agent: Some(format!("asset-browser/{}", env!("CARGO_PKG_VERSION"))),
        ..CatalogClientConfig::new(config.catalog_url.clone())
    };

    debug!("using catalog client with url: {}", config.catalog_url);
    let client = CatalogClient::new(client_config).context("failed to create catalog client")?;
    Ok(client.into())
}
