//! A catalog client that can be seeded with canned responses.
//!
//! Responses are served in FIFO order regardless of the request,
//! and every request is recorded so tests can assert on what was asked for.

use std::collections::VecDeque;
use std::num::NonZeroU32;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::client::ClientTrait;
use crate::error::{CatalogClientError, CatalogFetchError};
use crate::types::{AssetPage, SearchField};

/// Environment variable pointing at a JSON file of mock responses.
pub const ASSET_CATALOG_MOCK_DATA_VAR: &str = "ASSET_CATALOG_MOCK_DATA";

/// Shared between clones, so tests can push responses after handing the client out.
type MockField<T> = Arc<Mutex<T>>;

/// A canned catalog response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    /// Served after waiting for `delay_ms` milliseconds.
    Delayed {
        delay_ms: u64,
        response: Box<Response>,
    },
    /// A non-successful HTTP status.
    Error { status: u16 },
    Page(AssetPage),
}

/// A request received by the [MockClient].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockRequest {
    Page {
        token: String,
        page: u32,
        page_size: NonZeroU32,
    },
    Filtered {
        token: String,
        field: SearchField,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum MockDataError {
    /// Failed to read the JSON file with mock responses
    #[error("failed to read mock response file")]
    ReadMockFile(#[source] std::io::Error),
    /// Failed to parse the contents of the mock data file as JSON
    #[error("failed to parse mock data as JSON")]
    ParseJson(#[source] serde_json::Error),
}

/// Reads a list of mock responses from disk.
fn read_mock_responses(path: impl AsRef<Path>) -> Result<VecDeque<Response>, MockDataError> {
    let contents = std::fs::read_to_string(path).map_err(MockDataError::ReadMockFile)?;
    let deserialized: Vec<Response> =
        serde_json::from_str(&contents).map_err(MockDataError::ParseJson)?;
    Ok(deserialized.into())
}

#[derive(Debug, Default, Clone)]
pub struct MockClient {
    pub mock_responses: MockField<VecDeque<Response>>,
    pub requests: MockField<Vec<MockRequest>>,
}

impl MockClient {
    /// Create a new mock client, potentially reading mock responses from disk
    pub fn new(mock_data_path: Option<impl AsRef<Path>>) -> Result<Self, CatalogClientError> {
        let mock_responses = match mock_data_path {
            Some(path) => read_mock_responses(&path)?,
            None => VecDeque::new(),
        };
        Ok(Self {
            mock_responses: Arc::new(Mutex::new(mock_responses)),
            requests: Default::default(),
        })
    }

    /// Push a new response into the list of mock responses
    pub fn push_response(&self, resp: Response) {
        self.mock_responses
            .lock()
            .expect("couldn't acquire mock lock")
            .push_back(resp);
    }

    /// Push a successful page into the list of mock responses
    pub fn push_page_response(&self, page: AssetPage) {
        self.push_response(Response::Page(page));
    }

    /// Push a response that is only served after `delay`
    ///
    /// Delays beyond `u64::MAX` milliseconds saturate.
    pub fn push_delayed_response(&self, resp: Response, delay: Duration) {
        self.push_response(Response::Delayed {
            delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            response: Box::new(resp),
        });
    }

    /// Push a successful page that is only served after `delay`
    pub fn push_delayed_page_response(&self, page: AssetPage, delay: Duration) {
        self.push_delayed_response(Response::Page(page), delay);
    }

    /// Push an HTTP error status into the list of mock responses
    pub fn push_error_response(&self, status: u16) {
        self.push_response(Response::Error { status });
    }

    /// All requests received so far, oldest first.
    pub fn received_requests(&self) -> Vec<MockRequest> {
        self.requests
            .lock()
            .expect("couldn't acquire mock lock")
            .clone()
    }

    fn next_response(&self, request: MockRequest) -> Response {
        debug!(?request, "mock catalog request");
        self.requests
            .lock()
            .expect("couldn't acquire mock lock")
            .push(request);
        let mock_resp = self
            .mock_responses
            .lock()
            .expect("couldn't acquire mock lock")
            .pop_front();
        mock_resp.unwrap_or_else(|| panic!("no mock response left"))
    }
}

/// Resolve a canned response, waiting out any delay first.
async fn serve(mut response: Response) -> Result<AssetPage, CatalogFetchError> {
    loop {
        match response {
            Response::Delayed { delay_ms, response: inner } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                response = *inner;
            },
            Response::Error { status } => {
                let status = StatusCode::from_u16(status).expect("invalid mock status code");
                return Err(CatalogFetchError::Status(status));
            },
            Response::Page(page) => return Ok(page),
        }
    }
}

impl ClientTrait for MockClient {
    async fn fetch_page(
        &self,
        token: &str,
        page: u32,
        page_size: NonZeroU32,
    ) -> Result<AssetPage, CatalogFetchError> {
        let response = self.next_response(MockRequest::Page {
            token: token.to_string(),
            page,
            page_size,
        });
        let page = serve(response).await?;
        if page.page_info.is_none() {
            return Err(CatalogFetchError::MissingPageInfo);
        }
        Ok(page)
    }

    async fn fetch_filtered(
        &self,
        token: &str,
        field: SearchField,
        value: &str,
    ) -> Result<AssetPage, CatalogFetchError> {
        let response = self.next_response(MockRequest::Filtered {
            token: token.to_string(),
            field,
            value: value.to_string(),
        });
        serve(response).await
    }
}
