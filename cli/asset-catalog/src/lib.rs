//! HTTP client for the remote asset catalog.
//!
//! This crate provides:
//! - URL construction for paginated and field-filtered catalog queries
//! - A [`CatalogClient`] performing those queries over HTTP
//! - A [`MockClient`] replaying canned responses for tests
//! - The [`Client`] enum dispatching between the two
//!
//! ## Usage
//!
//! ```ignore
//! use asset_catalog::{CatalogClient, CatalogClientConfig, ClientTrait, DEFAULT_PAGE_SIZE};
//!
//! let client = CatalogClient::new(CatalogClientConfig::new(catalog_url))?;
//! let page = client.fetch_page(&token, 1, DEFAULT_PAGE_SIZE).await?;
//! ```

mod client;
mod config;
mod error;
mod mock;
mod types;

pub use client::{CatalogClient, Client, ClientTrait};
pub use config::CatalogClientConfig;
pub use error::{CatalogClientError, CatalogFetchError};
pub use mock::{ASSET_CATALOG_MOCK_DATA_VAR, MockClient, MockDataError, MockRequest, Response};
pub use types::*;
