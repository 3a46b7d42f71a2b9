//! Browser settings layered from defaults, a TOML file and the environment.

use std::env;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config as HierarchicalConfig, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::controller::ControllerSettings;

/// Name of the directory holding the configuration file
const CONFIG_DIR_NAME: &str = "asset-browser";
pub const CONFIG_FILE: &str = "config.toml";
/// Overrides the location of the configuration file
pub const CONFIG_FILE_VAR: &str = "ASSET_BROWSER_CONFIG_FILE";
/// Prefix of environment variables overriding single keys
const ENV_PREFIX: &str = "ASSET_BROWSER";

pub const DEFAULT_CATALOG_URL: &str = "https://api.cincopa.com/v2/asset.list.json";
pub const DEFAULT_CONFIG_URL: &str = "http://localhost:1337/admin/plugins/cincopa-uploader/config";
pub const DEFAULT_LOCATION: &str = "http://localhost:1337/admin/plugins/cincopa-uploader";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BrowserConfig {
    /// Asset list endpoint of the catalog
    pub catalog_url: String,
    /// Endpoint serving the plugin configuration
    pub config_url: String,
    /// Bearer token for the configuration endpoint
    pub admin_token: Option<String>,
    /// Catalog API token, skips fetching the plugin configuration when set
    pub api_token: Option<String>,
    /// Assets requested per page
    pub page_size: NonZeroU32,
    /// Quiet period after the last search input before querying the catalog
    pub search_debounce_ms: u64,
    /// Location the search state is written to
    pub location: Url,
}

/// Error returned by [`BrowserConfig::parse()`]
#[derive(Debug, Error)]
pub enum BrowserConfigError {
    #[error("invalid configuration")]
    Config(#[from] config::ConfigError),
}

impl BrowserConfig {
    /// Read the configuration from defaults, the configuration file and environment
    pub fn parse() -> Result<Self, BrowserConfigError> {
        let (file, required) = match env::var_os(CONFIG_FILE_VAR) {
            Some(path) => {
                debug!("`${CONFIG_FILE_VAR}` set: {path:?}");
                (Some(PathBuf::from(path)), true)
            },
            None => (
                dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE)),
                false,
            ),
        };
        Self::parse_from(file, required)
    }

    fn parse_from(file: Option<PathBuf>, required: bool) -> Result<Self, BrowserConfigError> {
        let mut builder = HierarchicalConfig::builder()
            .set_default("catalog_url", DEFAULT_CATALOG_URL)?
            .set_default("config_url", DEFAULT_CONFIG_URL)?
            .set_default("page_size", asset_catalog::DEFAULT_PAGE_SIZE.get() as i64)?
            .set_default(
                "search_debounce_ms",
                crate::debounce::SEARCH_DEBOUNCE.as_millis() as i64,
            )?
            .set_default("location", DEFAULT_LOCATION)?;

        if let Some(file) = file {
            debug!(path = %file.display(), required, "reading config file");
            builder = builder.add_source(
                File::from(file)
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            page_size: self.page_size,
            search_debounce: Duration::from_millis(self.search_debounce_ms),
        }
    }
}
