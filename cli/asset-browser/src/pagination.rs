//! The browser's view state and the transitions applied to it.
//!
//! All mutations of [CatalogState] go through the methods defined here,
//! the controller only decides _which_ transition to apply and when.

use asset_catalog::{Asset, AssetPage, CatalogFetchError, SearchField};
use serde::Serialize;

/// Lifecycle of the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not mounted yet.
    #[default]
    Uninitialized,
    /// Waiting for the plugin configuration.
    /// Stays here for good if the configuration could not be loaded.
    AwaitingConfig,
    Idle,
    Loading,
}

/// Why the last catalog request produced an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    /// HTTP status, if the catalog responded at all.
    pub status: Option<u16>,
    pub message: String,
}

impl From<&CatalogFetchError> for FetchFailure {
    fn from(err: &CatalogFetchError) -> Self {
        Self {
            status: err.status().map(|status| status.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Everything a view needs to render the asset browser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogState {
    pub items: Vec<Asset>,
    /// The next page to request.
    pub current_page: u32,
    pub total_pages: u32,
    pub has_more: bool,
    pub phase: Phase,
    pub search_field: SearchField,
    pub search_value: String,
    /// Set when the last request failed, cleared by the next success.
    pub last_failure: Option<FetchFailure>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            has_more: false,
            phase: Phase::default(),
            search_field: SearchField::default(),
            search_value: String::new(),
            last_failure: None,
        }
    }
}

impl CatalogState {
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Whether the "load more" action is available.
    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.is_loading()
    }

    pub fn begin_loading(&mut self) {
        self.phase = Phase::Loading;
    }

    /// Start over from the first page with no search applied.
    pub fn reset(&mut self) {
        self.current_page = 1;
        self.items.clear();
        self.search_value.clear();
    }

    /// Append a page of the unfiltered catalog.
    pub fn append_page(&mut self, page: AssetPage) {
        if let Some(info) = page.page_info {
            self.total_pages = info.pages_count;
            self.has_more = info.has_more();
        }
        self.items.extend(page.items);
        self.current_page += 1;
        self.phase = Phase::Idle;
        self.last_failure = None;
    }

    /// Show search results in place of whatever was listed.
    ///
    /// Search results are not paginated, `current_page` is left untouched.
    pub fn replace_with_filtered(&mut self, page: AssetPage) {
        self.items = page.items;
        self.has_more = false;
        self.phase = Phase::Idle;
        self.last_failure = None;
    }

    /// Show an empty list after a failed request.
    ///
    /// Previously listed items are dropped and the page cursor is kept.
    pub fn fail(&mut self, failure: FetchFailure) {
        self.items.clear();
        self.has_more = false;
        self.phase = Phase::Idle;
        self.last_failure = Some(failure);
    }
}
