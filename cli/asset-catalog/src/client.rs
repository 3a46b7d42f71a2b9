//! Catalog client and the interface shared with [MockClient].

use std::fmt::Debug;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use enum_dispatch::enum_dispatch;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogClientConfig;
use crate::error::{CatalogClientError, CatalogFetchError};
use crate::mock::MockClient;
use crate::types::{AssetPage, SearchField};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// A client for the asset catalog service.
///
/// Every request carries the API token as the `api_token` query parameter.
pub struct CatalogClient {
    client: reqwest::Client,
    catalog_url: Url,
    config: CatalogClientConfig,
}

impl Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("catalog_url", &self.config.catalog_url)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client from configuration.
    pub fn new(config: CatalogClientConfig) -> Result<Self, CatalogClientError> {
        let catalog_url =
            Url::parse(&config.catalog_url).map_err(|source| CatalogClientError::InvalidUrl {
                url: config.catalog_url.clone(),
                source,
            })?;
        let client = build_http_client(&config)?;

        Ok(Self {
            client,
            catalog_url,
            config,
        })
    }

    /// Get the configured catalog URL.
    pub fn catalog_url(&self) -> &str {
        &self.config.catalog_url
    }

    /// URL of one page of the unfiltered catalog.
    pub fn page_url(&self, token: &str, page: u32, page_size: NonZeroU32) -> Url {
        let mut url = self.catalog_url.clone();
        url.query_pairs_mut()
            .append_pair("api_token", token)
            .append_pair("items_per_page", &page_size.to_string())
            .append_pair("page", &page.to_string());
        url
    }

    /// URL of the catalog filtered by a single search field.
    pub fn filtered_url(&self, token: &str, field: SearchField, value: &str) -> Url {
        let mut url = self.catalog_url.clone();
        url.query_pairs_mut()
            .append_pair("api_token", token)
            .append_pair(field.query_param(), value);
        url
    }

    async fn get_page(&self, url: Url) -> Result<AssetPage, CatalogFetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(CatalogFetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "catalog request failed");
            return Err(CatalogFetchError::Status(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(CatalogFetchError::Transport)?;
        serde_json::from_slice(&body).map_err(CatalogFetchError::Decode)
    }
}

// ---------------------------------------------------------------------------
// Catalog trait
// ---------------------------------------------------------------------------

/// The catalog API interface.
///
/// This trait enables alternate implementations:
/// - **HTTP**: requests against the asset list endpoint via [`CatalogClient`]
/// - **Mock**: canned responses without HTTP via [`MockClient`]
#[allow(async_fn_in_trait)]
#[enum_dispatch]
pub trait ClientTrait {
    /// Fetch one page of the unfiltered catalog.
    ///
    /// The response must carry pagination metadata.
    async fn fetch_page(
        &self,
        token: &str,
        page: u32,
        page_size: NonZeroU32,
    ) -> Result<AssetPage, CatalogFetchError>;

    /// Fetch all assets whose `field` matches `value`.
    ///
    /// Filtered results are not paginated.
    async fn fetch_filtered(
        &self,
        token: &str,
        field: SearchField,
        value: &str,
    ) -> Result<AssetPage, CatalogFetchError>;
}

/// Either a client for the actual catalog service,
/// or a mock client for testing.
#[derive(Debug)]
#[enum_dispatch(ClientTrait)]
pub enum Client {
    Catalog(CatalogClient),
    Mock(MockClient),
}

impl ClientTrait for CatalogClient {
    #[instrument(skip(self, token), fields(catalog_url = %self.config.catalog_url))]
    async fn fetch_page(
        &self,
        token: &str,
        page: u32,
        page_size: NonZeroU32,
    ) -> Result<AssetPage, CatalogFetchError> {
        debug!("requesting catalog page");
        let page = self.get_page(self.page_url(token, page, page_size)).await?;
        if page.page_info.is_none() {
            return Err(CatalogFetchError::MissingPageInfo);
        }
        debug!(
            n_items = page.items.len(),
            page_info = ?page.page_info,
            "received catalog page"
        );
        Ok(page)
    }

    #[instrument(skip(self, token), fields(catalog_url = %self.config.catalog_url))]
    async fn fetch_filtered(
        &self,
        token: &str,
        field: SearchField,
        value: &str,
    ) -> Result<AssetPage, CatalogFetchError> {
        debug!("requesting filtered catalog");
        let page = self
            .get_page(self.filtered_url(token, field, value))
            .await?;
        debug!(n_items = page.items.len(), "received filtered catalog");
        Ok(page)
    }
}

// ---------------------------------------------------------------------------
// HTTP client builder
// ---------------------------------------------------------------------------

/// Build the HTTP client used for catalog requests.
fn build_http_client(config: &CatalogClientConfig) -> Result<reqwest::Client, CatalogClientError> {
    let mut headers = HeaderMap::new();

    for (key, value) in &config.extra_headers {
        let name = HeaderName::from_str(key)
            .map_err(|_| CatalogClientError::InvalidHeader(key.clone()))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| CatalogClientError::InvalidHeader(key.clone()))?;
        headers.insert(name, value);
    }

    debug!(
        catalog_url = %config.catalog_url,
        extra_headers = config.extra_headers.len(),
        "building catalog HTTP client"
    );

    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT);
    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }

    builder.build().map_err(CatalogClientError::HttpClient)
}
