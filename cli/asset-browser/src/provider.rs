//! Sources of the plugin configuration carrying the catalog API token.

use std::time::Duration;

use enum_dispatch::enum_dispatch;
use reqwest::StatusCode;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Plugin configuration as served by the host application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(rename = "apiToken", default)]
    pub api_token: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PluginConfig {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            api_token: Some(token.into()),
            extra: Default::default(),
        }
    }

    /// The API token, if one is configured and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.api_token.as_deref().filter(|token| !token.is_empty())
    }
}

/// Loading the plugin configuration failed. Never retried.
#[derive(Debug, Error)]
pub enum ConfigFetchError {
    #[error("failed to reach the configuration endpoint")]
    Transport(#[source] reqwest::Error),
    #[error("configuration endpoint responded with {0}")]
    Status(StatusCode),
    #[error("failed to parse plugin configuration")]
    Decode(#[source] serde_json::Error),
    #[error("invalid admin token")]
    InvalidAdminToken(#[source] header::InvalidHeaderValue),
}

#[allow(async_fn_in_trait)]
#[enum_dispatch]
pub trait ConfigProvider {
    /// Fetch the plugin configuration once.
    async fn fetch_config(&self) -> Result<PluginConfig, ConfigFetchError>;
}

/// Where the [crate::CatalogController] gets its configuration from.
#[derive(Debug)]
#[enum_dispatch(ConfigProvider)]
pub enum ConfigSource {
    Http(HttpConfigProvider),
    Static(StaticConfigProvider),
}

/// Reads the plugin configuration from the host's admin endpoint.
#[derive(Debug)]
pub struct HttpConfigProvider {
    client: reqwest::Client,
    config_url: String,
}

impl HttpConfigProvider {
    /// `admin_token` is sent as a bearer token if present.
    pub fn new(
        config_url: impl Into<String>,
        admin_token: Option<&str>,
    ) -> Result<Self, ConfigFetchError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = admin_token {
            headers.insert(
                header::AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(ConfigFetchError::InvalidAdminToken)?,
            );
        }
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(ConfigFetchError::Transport)?;

        Ok(Self {
            client,
            config_url: config_url.into(),
        })
    }
}

impl ConfigProvider for HttpConfigProvider {
    #[instrument(skip(self), fields(config_url = %self.config_url))]
    async fn fetch_config(&self) -> Result<PluginConfig, ConfigFetchError> {
        let response = self
            .client
            .get(&self.config_url)
            .send()
            .await
            .map_err(ConfigFetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConfigFetchError::Status(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(ConfigFetchError::Transport)?;
        let config: PluginConfig =
            serde_json::from_slice(&body).map_err(ConfigFetchError::Decode)?;
        debug!(has_token = config.token().is_some(), "received plugin configuration");
        Ok(config)
    }
}

/// Serves a configuration known up front.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    config: PluginConfig,
}

impl StaticConfigProvider {
    pub fn new(config: PluginConfig) -> Self {
        Self { config }
    }
}

impl ConfigProvider for StaticConfigProvider {
    async fn fetch_config(&self) -> Result<PluginConfig, ConfigFetchError> {
        Ok(self.config.clone())
    }
}
