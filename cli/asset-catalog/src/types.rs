//! Catalog interaction types.
//!
//! These mirror the JSON returned by the asset list endpoint,
//! `{ "items": [...], "items_data": { "page": 1, "pages_count": 3 } }`,
//! and the search fields the endpoint can filter by.

use std::fmt::Display;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of assets requested per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: NonZeroU32 = NonZeroU32::new(50).unwrap();

// ---------------------------------------------------------------------------
// Assets and pages
// ---------------------------------------------------------------------------

/// A single media asset.
///
/// Only the fields the browser inspects are typed,
/// everything else the catalog sends is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub rid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Asset {
    /// An asset carrying nothing but its id.
    pub fn with_rid(rid: impl Into<String>) -> Self {
        Self {
            rid: rid.into(),
            caption: None,
            filename: None,
            kind: None,
            extra: Default::default(),
        }
    }

    /// Human readable label, falling back from caption to filename to id.
    pub fn label(&self) -> &str {
        self.caption
            .as_deref()
            .filter(|caption| !caption.is_empty())
            .or(self.filename.as_deref())
            .unwrap_or(&self.rid)
    }
}

/// Pagination metadata of a catalog response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u32,
    pub pages_count: u32,
}

impl PageInfo {
    /// Whether pages after this one exist.
    pub fn has_more(&self) -> bool {
        self.page < self.pages_count
    }
}

/// One batch of assets as returned by the catalog.
///
/// Filtered queries may omit `items_data`,
/// paginated queries without it are rejected by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPage {
    pub items: Vec<Asset>,
    #[serde(rename = "items_data", default, skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
}

impl AssetPage {
    pub fn new(items: Vec<Asset>, page: u32, pages_count: u32) -> Self {
        Self {
            items,
            page_info: Some(PageInfo { page, pages_count }),
        }
    }

    /// A page without pagination metadata, as filtered queries return it.
    pub fn unpaged(items: Vec<Asset>) -> Self {
        Self {
            items,
            page_info: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Search fields
// ---------------------------------------------------------------------------

/// The asset attribute a text search is scoped to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    #[default]
    ByTitle,
    ByAssetId,
    ByAssetTag,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown search field '{0}', expected one of: by_title, by_asset_id, by_asset_tag")]
pub struct UnknownSearchField(pub String);

impl SearchField {
    pub const ALL: [SearchField; 3] = [
        SearchField::ByTitle,
        SearchField::ByAssetId,
        SearchField::ByAssetTag,
    ];

    /// Name used in the browser location and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::ByTitle => "by_title",
            SearchField::ByAssetId => "by_asset_id",
            SearchField::ByAssetTag => "by_asset_tag",
        }
    }

    /// Catalog query parameter filtering by this field.
    pub fn query_param(&self) -> &'static str {
        match self {
            SearchField::ByTitle => "details",
            SearchField::ByAssetId => "rid",
            SearchField::ByAssetTag => "tag",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchField::ByTitle => "By Title",
            SearchField::ByAssetId => "By Asset Id",
            SearchField::ByAssetTag => "By Asset Tag",
        }
    }
}

impl Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = UnknownSearchField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownSearchField(s.to_string()))
    }
}
