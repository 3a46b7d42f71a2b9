//! Reflecting the search state into the browser location.

use std::sync::Mutex;

use tracing::debug;
use url::Url;

/// The host's navigation layer.
///
/// Write-only: the browser never reads its state back from the location.
pub trait Navigator: Send + Sync {
    /// Set or replace the given query parameters on the current location.
    fn set_query_params(&self, params: &[(&str, &str)]);
}

/// Set `params` on `url`, replacing existing values in place
/// and appending parameters not present yet.
/// Unrelated parameters keep their order.
pub fn append_query_parameter(url: &Url, params: &[(&str, &str)]) -> Url {
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    for (key, value) in params {
        match pairs.iter_mut().find(|(existing, _)| existing == key) {
            Some(pair) => pair.1 = value.to_string(),
            None => pairs.push((key.to_string(), value.to_string())),
        }
    }

    let mut updated = url.clone();
    updated.query_pairs_mut().clear().extend_pairs(pairs);
    updated
}

/// Keeps the current location in memory.
#[derive(Debug)]
pub struct UrlNavigator {
    location: Mutex<Url>,
}

impl UrlNavigator {
    pub fn new(location: Url) -> Self {
        Self {
            location: Mutex::new(location),
        }
    }

    pub fn location(&self) -> Url {
        self.location
            .lock()
            .expect("navigator lock poisoned")
            .clone()
    }
}

impl Navigator for UrlNavigator {
    fn set_query_params(&self, params: &[(&str, &str)]) {
        let mut location = self.location.lock().expect("navigator lock poisoned");
        *location = append_query_parameter(&location, params);
        debug!(location = %*location, "navigated");
    }
}
