//! Error handling for catalog API operations.

use reqwest::StatusCode;
use thiserror::Error;

use crate::mock::MockDataError;

/// Errors raised while constructing a [crate::CatalogClient].
#[derive(Debug, Error)]
pub enum CatalogClientError {
    #[error("invalid catalog url '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error(transparent)]
    MockData(#[from] MockDataError),
    #[error("invalid value for header '{0}'")]
    InvalidHeader(String),
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// A single catalog request failed.
///
/// Non-successful responses and malformed bodies are the two failure modes
/// callers are expected to present; neither is retried.
#[derive(Debug, Error)]
pub enum CatalogFetchError {
    #[error("catalog responded with {0}")]
    Status(StatusCode),
    #[error("failed to reach the catalog")]
    Transport(#[source] reqwest::Error),
    #[error("failed to parse catalog response")]
    Decode(#[source] serde_json::Error),
    #[error("catalog response is missing page information")]
    MissingPageInfo,
}

impl CatalogFetchError {
    /// HTTP status of the failed response, if the catalog answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CatalogFetchError::Status(status) => Some(*status),
            CatalogFetchError::Transport(err) => err.status(),
            CatalogFetchError::Decode(_) | CatalogFetchError::MissingPageInfo => None,
        }
    }
}
