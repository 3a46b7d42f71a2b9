//! Drive the controller against a catalog and a plugin configuration served over HTTP.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use asset_browser::{
    CatalogController,
    CatalogState,
    ControllerSettings,
    HttpConfigProvider,
    Phase,
    UrlNavigator,
};
use asset_catalog::{CatalogClient, CatalogClientConfig, Client, SearchField};
use httpmock::prelude::*;
use itertools::Itertools;
use pretty_assertions::assert_eq;
use serde_json::json;

const CONFIG_PATH: &str = "/admin/plugins/cincopa-uploader/config";
const ASSETS_PATH: &str = "/v2/asset.list.json";

struct Browser {
    controller: CatalogController,
    navigator: Arc<UrlNavigator>,
    provider: HttpConfigProvider,
}

fn browser(server: &MockServer) -> Browser {
    let client: Client = CatalogClient::new(CatalogClientConfig::new(server.url(ASSETS_PATH)))
        .unwrap()
        .into();
    let navigator = Arc::new(UrlNavigator::new(
        "http://localhost:1337/admin/plugins/cincopa-uploader"
            .parse()
            .unwrap(),
    ));
    let settings = ControllerSettings {
        page_size: NonZeroU32::new(2).unwrap(),
        search_debounce: Duration::from_millis(50),
    };
    let provider = HttpConfigProvider::new(server.url(CONFIG_PATH), Some("admin-jwt")).unwrap();

    Browser {
        controller: CatalogController::new(client, navigator.clone(), settings),
        navigator,
        provider,
    }
}

fn mock_config(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path(CONFIG_PATH)
            .header("authorization", "Bearer admin-jwt");
        then.status(200)
            .json_body(json!({ "apiToken": "T1", "uploadFolder": "media" }));
    })
}

fn mock_page<'a>(server: &'a MockServer, page: u32, rids: &[&str]) -> httpmock::Mock<'a> {
    let items = rids.iter().map(|rid| json!({ "rid": rid })).collect_vec();
    server.mock(|when, then| {
        when.method(GET)
            .path(ASSETS_PATH)
            .query_param("api_token", "T1")
            .query_param("items_per_page", "2")
            .query_param("page", page.to_string());
        then.status(200).json_body(json!({
            "items": items,
            "items_data": { "page": page, "pages_count": 2 }
        }));
    })
}

fn rids(state: &CatalogState) -> Vec<&str> {
    state.items.iter().map(|asset| asset.rid.as_str()).collect()
}

#[tokio::test]
async fn pages_through_the_catalog() {
    let server = MockServer::start_async().await;
    let config = mock_config(&server);
    let first = mock_page(&server, 1, &["a", "b"]);
    let second = mock_page(&server, 2, &["c"]);
    let browser = browser(&server);

    browser.controller.mount(&browser.provider).await;
    let state = browser.controller.state();
    assert_eq!(rids(&state), vec!["a", "b"]);
    assert_eq!(state.current_page, 2);
    assert!(state.has_more);

    browser.controller.load_more().await;
    let state = browser.controller.state();
    assert_eq!(rids(&state), vec!["a", "b", "c"]);
    assert!(!state.has_more);

    // the last page has been listed
    browser.controller.load_more().await;

    config.assert();
    first.assert();
    second.assert();
}

#[tokio::test]
async fn searches_by_tag_and_clears_back_to_the_catalog() {
    let server = MockServer::start_async().await;
    mock_config(&server);
    let first = mock_page(&server, 1, &["a", "b"]);
    let search = server.mock(|when, then| {
        when.method(GET)
            .path(ASSETS_PATH)
            .query_param("api_token", "T1")
            .query_param("tag", "brand");
        then.status(200)
            .json_body(json!({ "items": [{ "rid": "z", "caption": "Brand kit" }] }));
    });
    let browser = browser(&server);
    browser.controller.mount(&browser.provider).await;

    let mut updates = browser.controller.subscribe();
    browser.controller.set_search_field(SearchField::ByAssetTag);
    browser.controller.set_search_value("brand");
    assert!(browser.controller.state().is_loading());

    let state = updates
        .wait_for(|state| !state.is_loading())
        .await
        .unwrap()
        .clone();
    assert_eq!(rids(&state), vec!["z"]);
    assert!(!state.has_more);
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(
        browser.navigator.location().query(),
        Some("type=by_asset_tag&value=brand")
    );
    search.assert();

    browser.controller.clear_search().await;
    let state = browser.controller.state();
    assert_eq!(rids(&state), vec!["a", "b"]);
    assert_eq!(
        browser.navigator.location().query(),
        Some("type=by_asset_tag&value=")
    );
    first.assert_hits(2);
}

#[tokio::test]
async fn unavailable_configuration_loads_nothing() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path(CONFIG_PATH);
        then.status(401);
    });
    let catalog = server.mock(|when, then| {
        when.method(GET).path(ASSETS_PATH);
        then.status(200).json_body(json!({ "items": [] }));
    });
    let browser = browser(&server);

    browser.controller.mount(&browser.provider).await;
    browser.controller.load_more().await;

    let state = browser.controller.state();
    assert_eq!(state.phase, Phase::AwaitingConfig);
    assert!(state.items.is_empty());
    catalog.assert_hits(0);
}

#[tokio::test]
async fn catalog_failure_is_reported_as_empty_list() {
    let server = MockServer::start_async().await;
    mock_config(&server);
    server.mock(|when, then| {
        when.method(GET).path(ASSETS_PATH);
        then.status(500);
    });
    let browser = browser(&server);

    browser.controller.mount(&browser.provider).await;

    let state = browser.controller.state();
    assert!(state.items.is_empty());
    assert!(!state.has_more);
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(state.last_failure.and_then(|failure| failure.status), Some(500));
}
