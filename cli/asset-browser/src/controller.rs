//! Coordinates configuration, catalog requests, pagination and search.
//!
//! The controller owns the [CatalogState] and is the only place mutating it.
//! Views observe it through [CatalogController::subscribe] and report user
//! actions through the controller's methods.
//!
//! Every request is tagged with a generation number when it is dispatched.
//! Dispatching moves the generation on and responses tagged with an older
//! generation are dropped, so a slow response can never overwrite the result
//! of a newer request. A search only takes over once its debounce timer fires,
//! until then earlier requests still land.

use std::fmt::Debug;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, Weak};
use std::time::Duration;

use asset_catalog::{Client, ClientTrait, DEFAULT_PAGE_SIZE, SearchField};
use tokio::sync::watch;
use tracing::{debug, error, instrument, warn};

use crate::debounce::{SEARCH_DEBOUNCE, SearchDebouncer};
use crate::navigation::Navigator;
use crate::pagination::{CatalogState, FetchFailure, Phase};
use crate::provider::ConfigProvider;

/// Navigation parameter holding the active search field.
pub const SEARCH_FIELD_PARAM: &str = "type";
/// Navigation parameter holding the search text.
pub const SEARCH_VALUE_PARAM: &str = "value";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    pub page_size: NonZeroU32,
    pub search_debounce: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: SEARCH_DEBOUNCE,
        }
    }
}

/// The asset browser's controller.
///
/// Cheap to clone, all clones drive the same state.
/// Dropping the last clone cancels a pending search.
#[derive(Clone)]
pub struct CatalogController {
    inner: Arc<Inner>,
}

struct Inner {
    client: Client,
    navigator: Arc<dyn Navigator>,
    settings: ControllerSettings,
    /// Set once the plugin configuration arrived, never changed afterwards.
    token: OnceLock<String>,
    state: watch::Sender<CatalogState>,
    generation: AtomicU64,
    /// Requests sent but not answered yet.
    in_flight: AtomicUsize,
    /// Id of the search waiting for its debounce timer, 0 if none.
    armed_search: AtomicU64,
    search_ids: AtomicU64,
    debouncer: Mutex<SearchDebouncer>,
}

/// Counts a request as in flight until dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Debug for CatalogController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogController")
            .field("client", &self.inner.client)
            .field("settings", &self.inner.settings)
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

impl Inner {
    /// Start a new generation, outdating all requests dispatched before.
    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply `transition` unless a newer request was started since `generation`.
    ///
    /// The state keeps loading while a search waits for its debounce timer.
    fn apply(&self, generation: u64, transition: impl FnOnce(&mut CatalogState)) -> bool {
        let search_pending = self.armed_search.load(Ordering::SeqCst) != 0;
        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            transition(state);
            if search_pending {
                state.begin_loading();
            }
            true
        });
        if !applied {
            debug!(generation, "discarding stale catalog response");
        }
        applied
    }

    /// Forget the armed search, returns whether there was one.
    fn disarm_search(&self) -> bool {
        self.armed_search.swap(0, Ordering::SeqCst) != 0
    }

    fn debouncer(&self) -> std::sync::MutexGuard<'_, SearchDebouncer> {
        self.debouncer.lock().expect("debouncer lock poisoned")
    }
}

impl CatalogController {
    pub fn new(
        client: Client,
        navigator: Arc<dyn Navigator>,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                navigator,
                settings,
                token: OnceLock::new(),
                state: watch::Sender::new(CatalogState::default()),
                generation: AtomicU64::new(0),
                in_flight: AtomicUsize::new(0),
                armed_search: AtomicU64::new(0),
                search_ids: AtomicU64::new(0),
                debouncer: Mutex::new(SearchDebouncer::new()),
            }),
        }
    }

    /// Observe state changes.
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.inner.state.subscribe()
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> CatalogState {
        self.inner.state.borrow().clone()
    }

    /// Load the plugin configuration, then the first catalog page.
    ///
    /// If the configuration cannot be loaded or carries no token,
    /// the controller keeps waiting for it and never loads any assets.
    /// Mounting again once a token is known does nothing.
    #[instrument(skip_all)]
    pub async fn mount(&self, provider: &impl ConfigProvider) {
        if self.inner.token.get().is_some() {
            debug!("controller is already mounted");
            return;
        }
        self.inner.state.send_if_modified(|state| {
            if state.phase != Phase::Uninitialized {
                return false;
            }
            state.phase = Phase::AwaitingConfig;
            true
        });

        let config = match provider.fetch_config().await {
            Ok(config) => config,
            Err(err) => {
                error!(%err, "failed to fetch plugin configuration");
                return;
            },
        };
        let Some(token) = config.token() else {
            warn!("plugin configuration has no API token, assets will not be loaded");
            return;
        };
        if self.inner.token.set(token.to_string()).is_err() {
            warn!("controller is already mounted");
            return;
        }

        self.load_page(token, false).await;
    }

    /// Append the next catalog page.
    ///
    /// Ignored while loading or when the last page has been listed.
    #[instrument(skip_all)]
    pub async fn load_more(&self) {
        let Some(token) = self.inner.token.get() else {
            debug!("no API token yet, ignoring load more");
            return;
        };
        if !self.inner.state.borrow().can_load_more() {
            debug!("nothing to load");
            return;
        }
        self.load_page(token, false).await;
    }

    /// Drop the search and list the catalog from its first page.
    #[instrument(skip_all)]
    pub async fn clear_search(&self) {
        self.inner
            .navigator
            .set_query_params(&[(SEARCH_VALUE_PARAM, "")]);
        self.reload().await;
    }

    /// Assets were changed elsewhere, reload unless a search is shown.
    #[instrument(skip_all)]
    pub async fn on_updated(&self) {
        if !self.inner.state.borrow().search_value.is_empty() {
            debug!("search active, ignoring update notification");
            return;
        }
        self.reload().await;
    }

    /// Change the field searched by and search again if a value is entered.
    pub fn set_search_field(&self, field: SearchField) {
        self.inner
            .state
            .send_modify(|state| state.search_field = field);
        self.inner
            .navigator
            .set_query_params(&[(SEARCH_FIELD_PARAM, field.as_str())]);
        self.schedule_search();
    }

    /// Change the search text and, if non-empty, search after the debounce delay.
    pub fn set_search_value(&self, value: impl Into<String>) {
        let value = value.into();
        self.inner
            .navigator
            .set_query_params(&[(SEARCH_VALUE_PARAM, &value)]);
        self.inner
            .state
            .send_modify(|state| state.search_value = value);
        self.schedule_search();
    }

    async fn reload(&self) {
        self.cancel_pending_search();
        match self.inner.token.get() {
            Some(token) => self.load_page(token, true).await,
            None => self.inner.state.send_modify(CatalogState::reset),
        }
    }

    /// Request the page at the cursor and append it.
    /// With `from_start` the state is reset to the first page beforehand.
    async fn load_page(&self, token: &str, from_start: bool) {
        let generation = self.inner.next_generation();
        let mut page = 1;
        self.inner.state.send_modify(|state| {
            if from_start {
                state.reset();
            }
            state.begin_loading();
            page = state.current_page;
        });

        debug!(generation, page, "loading catalog page");
        let result = {
            let _in_flight = InFlight::start(&self.inner.in_flight);
            self.inner
                .client
                .fetch_page(token, page, self.inner.settings.page_size)
                .await
        };

        self.inner.apply(generation, |state| match result {
            Ok(assets) => state.append_page(assets),
            Err(err) => {
                warn!(%err, page, "failed to load catalog page");
                state.fail(FetchFailure::from(&err));
            },
        });
    }

    /// Debounce a filtered query for the current search field and value.
    fn schedule_search(&self) {
        let (field, value) = {
            let state = self.inner.state.borrow();
            (state.search_field, state.search_value.clone())
        };
        let mut debouncer = self.inner.debouncer();

        if value.is_empty() {
            debouncer.cancel();
            if self.inner.disarm_search() {
                debug!("search cleared before it was sent");
                // a response still on its way settles the phase itself
                if self.inner.in_flight.load(Ordering::SeqCst) == 0 {
                    self.inner.state.send_modify(|state| state.phase = Phase::Idle);
                }
            }
            return;
        }

        let Some(token) = self.inner.token.get().cloned() else {
            debug!("no API token yet, search not sent");
            return;
        };

        let search = self.inner.search_ids.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.armed_search.store(search, Ordering::SeqCst);
        self.inner.state.send_modify(CatalogState::begin_loading);

        let inner = Arc::downgrade(&self.inner);
        debouncer.schedule(self.inner.settings.search_debounce, async move {
            run_search(inner, search, token, field, value).await;
        });
    }

    fn cancel_pending_search(&self) {
        self.inner.debouncer().cancel();
        if self.inner.disarm_search() {
            debug!("cancelled pending search");
        }
    }
}

#[instrument(skip(inner, token))]
async fn run_search(
    inner: Weak<Inner>,
    search: u64,
    token: String,
    field: SearchField,
    value: String,
) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    if inner
        .armed_search
        .compare_exchange(search, 0, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        debug!(search, "search was superseded before it was sent");
        return;
    }

    let generation = inner.next_generation();
    debug!(generation, "sending search");
    let result = {
        let _in_flight = InFlight::start(&inner.in_flight);
        inner.client.fetch_filtered(&token, field, &value).await
    };

    inner.apply(generation, |state| match result {
        Ok(assets) => state.replace_with_filtered(assets),
        Err(err) => {
            warn!(%err, "search failed");
            state.fail(FetchFailure::from(&err));
        },
    });
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use asset_catalog::{Asset, AssetPage, MockClient, MockRequest, Response};
    use pretty_assertions::assert_eq;
    use url::Url;

    use super::*;
    use crate::navigation::UrlNavigator;
    use crate::provider::{PluginConfig, StaticConfigProvider};

    struct Harness {
        controller: CatalogController,
        client: MockClient,
        navigator: Arc<UrlNavigator>,
    }

    fn harness() -> Harness {
        let client = MockClient::new(None::<PathBuf>).unwrap();
        let navigator = Arc::new(UrlNavigator::new(
            Url::parse("http://localhost/admin/plugins/assets").unwrap(),
        ));
        let controller = CatalogController::new(
            client.clone().into(),
            navigator.clone(),
            ControllerSettings::default(),
        );
        Harness {
            controller,
            client,
            navigator,
        }
    }

    fn provider(token: &str) -> StaticConfigProvider {
        StaticConfigProvider::new(PluginConfig::with_token(token))
    }

    fn assets(rids: &[&str]) -> Vec<Asset> {
        rids.iter().copied().map(Asset::with_rid).collect()
    }

    fn filtered_requests(client: &MockClient) -> Vec<MockRequest> {
        client
            .received_requests()
            .into_iter()
            .filter(|request| matches!(request, MockRequest::Filtered { .. }))
            .collect()
    }

    /// Mount with a first page of `[a, b]` out of two pages.
    async fn mounted() -> Harness {
        let harness = harness();
        harness
            .client
            .push_page_response(AssetPage::new(assets(&["a", "b"]), 1, 2));
        harness.controller.mount(&provider("T1")).await;
        harness
    }

    #[tokio::test]
    async fn first_page_after_config() {
        let Harness {
            controller, client, ..
        } = mounted().await;

        let state = controller.state();
        assert_eq!(state.items, assets(&["a", "b"]));
        assert!(state.has_more);
        assert_eq!(state.current_page, 2);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(client.received_requests(), vec![MockRequest::Page {
            token: "T1".to_string(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }]);
    }

    #[tokio::test]
    async fn load_more_appends() {
        let Harness {
            controller, client, ..
        } = mounted().await;
        client.push_page_response(AssetPage::new(assets(&["c", "d"]), 2, 2));

        controller.load_more().await;

        let state = controller.state();
        assert_eq!(state.items, assets(&["a", "b", "c", "d"]));
        assert!(!state.has_more);
        assert_eq!(state.current_page, 3);
    }

    #[tokio::test]
    async fn load_more_ignored_on_last_page() {
        let harness = harness();
        harness
            .client
            .push_page_response(AssetPage::new(assets(&["a"]), 1, 1));
        harness.controller.mount(&provider("T1")).await;

        harness.controller.load_more().await;

        assert_eq!(harness.client.received_requests().len(), 1);
        assert_eq!(harness.controller.state().current_page, 2);
    }

    #[tokio::test]
    async fn server_error_yields_empty_state() {
        let harness = harness();
        harness.client.push_error_response(500);

        harness.controller.mount(&provider("T1")).await;

        let state = harness.controller.state();
        assert!(state.items.is_empty());
        assert!(!state.is_loading());
        assert!(!state.has_more);
        assert_eq!(state.last_failure.and_then(|failure| failure.status), Some(500));
    }

    #[tokio::test]
    async fn load_more_failure_drops_listed_items() {
        let Harness {
            controller, client, ..
        } = mounted().await;
        client.push_error_response(502);

        controller.load_more().await;

        let state = controller.state();
        assert!(state.items.is_empty());
        assert_eq!(state.current_page, 2);
        assert_eq!(state.phase, Phase::Idle);
    }

    #[tokio::test]
    async fn missing_token_blocks_loading() {
        let harness = harness();
        harness
            .controller
            .mount(&StaticConfigProvider::new(PluginConfig::default()))
            .await;

        harness.controller.load_more().await;
        harness.controller.clear_search().await;

        assert_eq!(harness.controller.state().phase, Phase::AwaitingConfig);
        assert!(harness.client.received_requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn search_is_debounced() {
        let Harness {
            controller, client, ..
        } = mounted().await;
        client.push_page_response(AssetPage::unpaged(assets(&["logo"])));

        controller.set_search_value("l");
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.set_search_value("lo");
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.set_search_value("logo");
        assert!(controller.state().is_loading());

        tokio::time::sleep(Duration::from_millis(799)).await;
        assert!(filtered_requests(&client).is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(filtered_requests(&client), vec![MockRequest::Filtered {
            token: "T1".to_string(),
            field: SearchField::ByTitle,
            value: "logo".to_string(),
        }]);
        let state = controller.state();
        assert_eq!(state.items, assets(&["logo"]));
        assert!(!state.has_more);
        assert!(!state.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn changing_field_searches_again() {
        let Harness {
            controller,
            client,
            navigator,
        } = mounted().await;
        client.push_page_response(AssetPage::unpaged(assets(&["x"])));

        controller.set_search_value("brand");
        controller.set_search_field(SearchField::ByAssetTag);
        tokio::time::sleep(SEARCH_DEBOUNCE * 2).await;

        assert_eq!(filtered_requests(&client), vec![MockRequest::Filtered {
            token: "T1".to_string(),
            field: SearchField::ByAssetTag,
            value: "brand".to_string(),
        }]);
        assert_eq!(
            navigator.location().as_str(),
            "http://localhost/admin/plugins/assets?value=brand&type=by_asset_tag"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn empty_value_cancels_pending_search() {
        let Harness {
            controller, client, ..
        } = mounted().await;

        controller.set_search_value("lo");
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.set_search_value("");
        tokio::time::sleep(SEARCH_DEBOUNCE * 2).await;

        assert!(filtered_requests(&client).is_empty());
        let state = controller.state();
        assert!(!state.is_loading());
        assert_eq!(state.items, assets(&["a", "b"]));
    }

    #[tokio::test(start_paused = true)]
    async fn field_change_without_value_does_not_search() {
        let Harness {
            controller, client, ..
        } = mounted().await;

        controller.set_search_field(SearchField::ByAssetId);
        tokio::time::sleep(SEARCH_DEBOUNCE * 2).await;

        assert!(filtered_requests(&client).is_empty());
        assert_eq!(controller.state().search_field, SearchField::ByAssetId);
    }

    #[tokio::test(start_paused = true)]
    async fn search_failure_yields_empty_state() {
        let Harness {
            controller, client, ..
        } = mounted().await;
        client.push_error_response(500);

        controller.set_search_value("logo");
        tokio::time::sleep(SEARCH_DEBOUNCE * 2).await;

        let state = controller.state();
        assert!(state.items.is_empty());
        assert!(!state.is_loading());
        assert!(state.last_failure.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn clear_reloads_first_page() {
        let Harness {
            controller,
            client,
            navigator,
        } = mounted().await;
        client.push_page_response(AssetPage::new(assets(&["c", "d"]), 2, 2));
        controller.load_more().await;

        client.push_page_response(AssetPage::unpaged(assets(&["logo"])));
        controller.set_search_value("logo");
        tokio::time::sleep(SEARCH_DEBOUNCE * 2).await;

        client.push_page_response(AssetPage::new(assets(&["a", "b"]), 1, 2));
        controller.clear_search().await;

        let state = controller.state();
        assert_eq!(state.items, assets(&["a", "b"]));
        assert_eq!(state.current_page, 2);
        assert!(state.has_more);
        assert_eq!(state.search_value, "");
        assert_eq!(
            client.received_requests().last(),
            Some(&MockRequest::Page {
                token: "T1".to_string(),
                page: 1,
                page_size: DEFAULT_PAGE_SIZE,
            })
        );
        assert_eq!(
            navigator.location().as_str(),
            "http://localhost/admin/plugins/assets?value="
        );
    }

    #[tokio::test(start_paused = true)]
    async fn clear_cancels_pending_search() {
        let Harness {
            controller, client, ..
        } = mounted().await;

        controller.set_search_value("logo");
        client.push_page_response(AssetPage::new(assets(&["a", "b"]), 1, 2));
        controller.clear_search().await;
        tokio::time::sleep(SEARCH_DEBOUNCE * 2).await;

        assert!(filtered_requests(&client).is_empty());
        assert_eq!(controller.state().items, assets(&["a", "b"]));
    }

    #[tokio::test(start_paused = true)]
    async fn update_notification_reloads_without_search() {
        let Harness {
            controller, client, ..
        } = mounted().await;
        client.push_page_response(AssetPage::new(assets(&["new", "a", "b"]), 1, 2));

        controller.on_updated().await;

        assert_eq!(controller.state().items, assets(&["new", "a", "b"]));
        assert_eq!(client.received_requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn update_notification_ignored_during_search() {
        let Harness {
            controller, client, ..
        } = mounted().await;
        client.push_page_response(AssetPage::unpaged(assets(&["logo"])));
        controller.set_search_value("logo");
        tokio::time::sleep(SEARCH_DEBOUNCE * 2).await;

        controller.on_updated().await;

        assert_eq!(controller.state().items, assets(&["logo"]));
        assert_eq!(client.received_requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_page_is_discarded_after_search() {
        let Harness {
            controller, client, ..
        } = mounted().await;
        client.push_delayed_page_response(
            AssetPage::new(assets(&["c", "d"]), 2, 2),
            Duration::from_secs(2),
        );
        client.push_page_response(AssetPage::unpaged(assets(&["logo"])));

        let slow_load = tokio::spawn({
            let controller = controller.clone();
            async move { controller.load_more().await }
        });
        tokio::task::yield_now().await;
        controller.set_search_value("logo");

        tokio::time::sleep(Duration::from_secs(3)).await;
        slow_load.await.unwrap();

        let state = controller.state();
        assert_eq!(state.items, assets(&["logo"]));
        assert!(!state.has_more);
        assert!(!state.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn cleared_search_keeps_first_page_in_flight() {
        let harness = harness();
        harness.client.push_delayed_page_response(
            AssetPage::new(assets(&["a", "b"]), 1, 2),
            Duration::from_millis(500),
        );

        let mount = tokio::spawn({
            let controller = harness.controller.clone();
            async move { controller.mount(&provider("T1")).await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        harness.controller.set_search_value("l");
        tokio::time::sleep(Duration::from_millis(100)).await;
        harness.controller.set_search_value("");
        assert!(harness.controller.state().is_loading());

        tokio::time::sleep(Duration::from_secs(2)).await;
        mount.await.unwrap();

        let state = harness.controller.state();
        assert_eq!(state.items, assets(&["a", "b"]));
        assert!(state.has_more);
        assert_eq!(state.current_page, 2);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.last_failure, None);
        assert!(filtered_requests(&harness.client).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cleared_search_keeps_next_page_in_flight() {
        let Harness {
            controller, client, ..
        } = mounted().await;
        client.push_delayed_page_response(
            AssetPage::new(assets(&["c", "d"]), 2, 2),
            Duration::from_millis(500),
        );

        let slow_load = tokio::spawn({
            let controller = controller.clone();
            async move { controller.load_more().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        controller.set_search_value("l");
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.set_search_value("");

        tokio::time::sleep(Duration::from_secs(2)).await;
        slow_load.await.unwrap();

        let state = controller.state();
        assert_eq!(state.items, assets(&["a", "b", "c", "d"]));
        assert!(!state.has_more);
        assert_eq!(state.current_page, 3);
        assert_eq!(state.phase, Phase::Idle);
        assert!(filtered_requests(&client).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn earlier_search_lands_while_next_is_debounced() {
        let Harness {
            controller, client, ..
        } = mounted().await;
        client.push_delayed_response(
            Response::Page(AssetPage::unpaged(assets(&["one"]))),
            Duration::from_millis(500),
        );
        client.push_page_response(AssetPage::unpaged(assets(&["two"])));

        controller.set_search_value("one");
        // sent at 800ms, answered at 1300ms
        tokio::time::sleep(Duration::from_millis(1000)).await;
        controller.set_search_value("two");

        tokio::time::sleep(Duration::from_millis(400)).await;
        let state = controller.state();
        assert_eq!(state.items, assets(&["one"]));
        assert!(state.is_loading());

        tokio::time::sleep(Duration::from_secs(1)).await;
        let state = controller.state();
        assert_eq!(state.items, assets(&["two"]));
        assert!(!state.is_loading());
        assert_eq!(filtered_requests(&client).len(), 2);
    }

    #[tokio::test]
    async fn mounting_again_keeps_state() {
        let Harness {
            controller, client, ..
        } = mounted().await;

        controller.mount(&provider("T2")).await;
        controller
            .mount(&StaticConfigProvider::new(PluginConfig::default()))
            .await;

        let state = controller.state();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.items, assets(&["a", "b"]));
        assert_eq!(client.received_requests().len(), 1);
    }

    #[tokio::test]
    async fn update_notification_before_config_loads_nothing() {
        let harness = harness();

        harness.controller.on_updated().await;

        let state = harness.controller.state();
        assert_eq!(state.phase, Phase::Uninitialized);
        assert!(state.items.is_empty());
        assert!(harness.client.received_requests().is_empty());
    }

    #[tokio::test]
    async fn subscribers_see_updates() {
        let harness = harness();
        let mut updates = harness.controller.subscribe();
        harness
            .client
            .push_page_response(AssetPage::new(assets(&["a"]), 1, 1));

        harness.controller.mount(&provider("T1")).await;

        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().items, assets(&["a"]));
    }
}
