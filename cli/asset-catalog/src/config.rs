//! Configuration types for catalog client construction.

use std::collections::BTreeMap;

/// Configuration for catalog client construction.
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    /// Endpoint listing catalog assets.
    pub catalog_url: String,
    /// Additional headers to include in requests.
    pub extra_headers: BTreeMap<String, String>,
    /// Custom user agent, reqwest's default is used when unset.
    pub user_agent: Option<String>,
}

impl CatalogClientConfig {
    pub fn new(catalog_url: impl Into<String>) -> Self {
        Self {
            catalog_url: catalog_url.into(),
            extra_headers: BTreeMap::new(),
            user_agent: None,
        }
    }
}
