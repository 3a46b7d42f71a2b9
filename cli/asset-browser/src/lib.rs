//! Client-side controller of the media asset browser.
//!
//! The [CatalogController] loads the remote asset catalog page by page,
//! runs debounced field-scoped searches against it,
//! and mirrors the search into the browser location through a [Navigator].
//! Rendering is left to whoever observes the [CatalogState].

pub mod config;
pub mod controller;
pub mod debounce;
pub mod navigation;
pub mod pagination;
pub mod provider;

pub use controller::{CatalogController, ControllerSettings};
pub use navigation::{Navigator, UrlNavigator};
pub use pagination::{CatalogState, FetchFailure, Phase};
pub use provider::{
    ConfigProvider,
    ConfigSource,
    HttpConfigProvider,
    PluginConfig,
    StaticConfigProvider,
};
