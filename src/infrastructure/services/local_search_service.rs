//! Local search service - debounced completion, cached resolution and a rate-limited region

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::cache::{Cache, CacheExt};
use crate::domain::geo::SearchRegion;
use crate::domain::search::{
    CompletionBackend, MapItem, ResultType, SearchBackend, SearchCompletion, SearchRequest,
};
use crate::domain::DomainError;

/// Configuration for the local search service
#[derive(Debug, Clone)]
pub struct LocalSearchConfig {
    /// Minimum time between two accepted search regions
    pub region_update_interval: Duration,
    /// Quiet period a fragment must survive before it reaches the completion backend
    pub completion_debounce: Duration,
    /// Result kinds requested from both backends
    pub result_types: Vec<ResultType>,
    /// Namespace prefix for result cache keys
    pub cache_namespace: String,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            region_update_interval: Duration::from_secs(3),
            completion_debounce: Duration::from_millis(200),
            result_types: vec![ResultType::PointOfInterest],
            cache_namespace: "search:results".to_string(),
        }
    }
}

impl LocalSearchConfig {
    pub fn with_region_update_interval(mut self, interval: Duration) -> Self {
        self.region_update_interval = interval;
        self
    }

    pub fn with_completion_debounce(mut self, debounce: Duration) -> Self {
        self.completion_debounce = debounce;
        self
    }

    pub fn with_result_types(mut self, result_types: Vec<ResultType>) -> Self {
        self.result_types = result_types;
        self
    }

    pub fn with_cache_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.cache_namespace = namespace.into();
        self
    }
}

/// Outcome of the completion request for the current fragment and region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStatus {
    /// No fragment is set
    Idle,
    /// A request is waiting out the debounce or in flight
    Pending,
    /// The backend answered; suggestions reflect the current fragment
    Ready,
    /// The backend failed; suggestions were left as they were
    Failed,
}

#[derive(Debug)]
struct CompletionState {
    query_fragment: String,
    status: CompletionStatus,
    /// Bumped on every fragment change and accepted region; responses tagged
    /// with an older generation are dropped.
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
    region: SearchRegion,
    last_region_update: Option<Instant>,
}

impl CompletionState {
    fn cancel_in_flight(&mut self) {
        self.generation += 1;

        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

#[derive(Debug)]
struct Inner {
    completer: Arc<dyn CompletionBackend>,
    searcher: Arc<dyn SearchBackend>,
    cache: Arc<dyn Cache>,
    config: LocalSearchConfig,
    state: Mutex<CompletionState>,
    suggestions: watch::Sender<Vec<SearchCompletion>>,
    /// Generation of the last request that finished, successfully or not
    settled: watch::Sender<u64>,
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, CompletionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.lock_state().generation == generation
    }

    async fn run_completion(&self, generation: u64, fragment: String, region: SearchRegion) {
        if !self.config.completion_debounce.is_zero() {
            tokio::time::sleep(self.config.completion_debounce).await;

            if !self.is_current(generation) {
                return;
            }
        }

        let result = self
            .completer
            .complete(&fragment, &region, &self.config.result_types)
            .await;

        let mut state = self.lock_state();

        if state.generation != generation {
            debug!(fragment = %fragment, generation, "Discarding stale completion results");
            return;
        }

        match result {
            Ok(completions) => {
                debug!(fragment = %fragment, count = completions.len(), "Completion results updated");
                state.status = CompletionStatus::Ready;
                self.suggestions.send_replace(completions);
            }
            Err(e) => {
                warn!(
                    backend = self.completer.backend_name(),
                    fragment = %fragment,
                    error = %e,
                    "Completion request failed"
                );
                state.status = CompletionStatus::Failed;
            }
        }

        state.in_flight = None;
        self.settled.send_replace(generation);
    }

    /// Starts a debounced request for the state's fragment in the state's region
    fn spawn_completion(self: &Arc<Self>, state: &mut CompletionState) {
        let generation = state.generation;
        let region = state.region;
        let fragment = state.query_fragment.clone();
        let inner = Arc::clone(self);

        state.status = CompletionStatus::Pending;
        state.in_flight = Some(tokio::spawn(async move {
            inner.run_completion(generation, fragment, region).await;
        }));
    }
}

/// Mediates between a rapidly changing query fragment and the search backends
///
/// Suggestions are pushed through a watch channel (see [`LocalSearchService::subscribe`]).
/// Resolutions are cached per natural-language query. Cloning the service is
/// cheap and every clone shares the same state.
#[derive(Debug, Clone)]
pub struct LocalSearchService {
    inner: Arc<Inner>,
}

impl LocalSearchService {
    /// Creates a new local search service with default configuration
    pub fn new(
        completer: Arc<dyn CompletionBackend>,
        searcher: Arc<dyn SearchBackend>,
        cache: Arc<dyn Cache>,
    ) -> Self {
        Self::with_config(completer, searcher, cache, LocalSearchConfig::default())
    }

    /// Creates a new local search service with custom config
    pub fn with_config(
        completer: Arc<dyn CompletionBackend>,
        searcher: Arc<dyn SearchBackend>,
        cache: Arc<dyn Cache>,
        config: LocalSearchConfig,
    ) -> Self {
        let (suggestions, _) = watch::channel(Vec::new());
        let (settled, _) = watch::channel(0);

        Self {
            inner: Arc::new(Inner {
                completer,
                searcher,
                cache,
                config,
                state: Mutex::new(CompletionState {
                    query_fragment: String::new(),
                    status: CompletionStatus::Idle,
                    generation: 0,
                    in_flight: None,
                    region: SearchRegion::world(),
                    last_region_update: None,
                }),
                suggestions,
                settled,
            }),
        }
    }

    pub fn config(&self) -> &LocalSearchConfig {
        &self.inner.config
    }

    /// The fragment most recently passed to [`complete_query`](Self::complete_query)
    pub fn query_fragment(&self) -> String {
        self.inner.lock_state().query_fragment.clone()
    }

    /// Latest published suggestions
    pub fn suggestions(&self) -> Vec<SearchCompletion> {
        self.inner.suggestions.borrow().clone()
    }

    /// Receives every suggestion update, including clears
    pub fn subscribe(&self) -> watch::Receiver<Vec<SearchCompletion>> {
        self.inner.suggestions.subscribe()
    }

    pub fn completion_status(&self) -> CompletionStatus {
        self.inner.lock_state().status
    }

    /// True when the backend answered the current fragment with no suggestions.
    ///
    /// A pending or failed request is never reported as "nothing found".
    pub fn is_nothing_found(&self) -> bool {
        let status = self.completion_status();
        status == CompletionStatus::Ready && self.inner.suggestions.borrow().is_empty()
    }

    /// Waits until the request for the current fragment and region has finished.
    ///
    /// Returns immediately when no request is outstanding.
    pub async fn wait_until_settled(&self) -> CompletionStatus {
        let mut settled = self.inner.settled.subscribe();

        loop {
            let (status, generation) = {
                let state = self.inner.lock_state();
                (state.status, state.generation)
            };

            if status != CompletionStatus::Pending || *settled.borrow_and_update() >= generation {
                return self.completion_status();
            }

            if settled.changed().await.is_err() {
                return self.completion_status();
            }
        }
    }

    pub fn search_region(&self) -> SearchRegion {
        self.inner.lock_state().region
    }

    /// Sets the pending query fragment.
    ///
    /// An empty fragment cancels any outstanding request and clears the
    /// suggestions before returning. Any other fragment is forwarded verbatim
    /// to the completion backend once the debounce period passes; results
    /// arrive through [`subscribe`](Self::subscribe).
    ///
    /// Must be called from within a Tokio runtime.
    pub fn complete_query(&self, text: &str) {
        let mut state = self.inner.lock_state();
        state.cancel_in_flight();
        state.query_fragment = text.to_string();

        if text.is_empty() {
            state.status = CompletionStatus::Idle;
            self.inner.suggestions.send_replace(Vec::new());
            return;
        }

        self.inner.spawn_completion(&mut state);
    }

    /// Accepts `region` unless the previous region was accepted less than the
    /// configured interval ago. Returns whether the region was accepted.
    ///
    /// Accepting a region cancels any outstanding completion request and, when a
    /// fragment is set, requests it again for the new region.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn set_search_region(&self, region: SearchRegion) -> bool {
        let mut state = self.inner.lock_state();
        let now = Instant::now();

        if let Some(last) = state.last_region_update {
            let elapsed = now.duration_since(last);

            if elapsed < self.inner.config.region_update_interval {
                debug!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Ignoring search region update inside rate-limit interval"
                );
                return false;
            }
        }

        state.cancel_in_flight();
        state.region = region;
        state.last_region_update = Some(now);

        if !state.query_fragment.is_empty() {
            self.inner.spawn_completion(&mut state);
        }

        debug!(
            latitude = region.center.latitude,
            longitude = region.center.longitude,
            "Search region updated"
        );
        true
    }

    fn cache_key(&self, query: &str) -> String {
        format!("{}:{}", self.inner.config.cache_namespace, query)
    }

    /// Resolves a completion to concrete places.
    ///
    /// Results are cached per natural-language query; a hit never reaches the
    /// backend. A completion without usable query text resolves to an empty list.
    pub async fn resolve(&self, completion: &SearchCompletion) -> Result<Vec<MapItem>, DomainError> {
        let Some(query) = completion.natural_language_query() else {
            debug!(title = %completion.title, "Completion has no query text, nothing to resolve");
            return Ok(Vec::new());
        };

        let key = self.cache_key(&query);

        let cached: Result<Option<Vec<MapItem>>, DomainError> =
            self.inner.cache.fetch_json(&key).await;

        match cached {
            Ok(Some(items)) => {
                debug!(query = %query, count = items.len(), "Search cache hit");
                return Ok(items);
            }
            Ok(None) => debug!(query = %query, "Search cache miss"),
            Err(e) => warn!(query = %query, error = %e, "Search cache read failed"),
        }

        let request = SearchRequest::new(query.clone())
            .with_region(self.search_region())
            .with_result_types(self.inner.config.result_types.clone());

        let backend = self.inner.searcher.backend_name();
        let items = self.inner.searcher.search(request).await.map_err(|e| match e {
            DomainError::BackendUnavailable { .. } => e,
            other => DomainError::backend_unavailable(backend, other.to_string()),
        })?;

        if let Err(e) = self.inner.cache.insert_json(&key, &items).await {
            warn!(query = %query, error = %e, "Failed to cache search results");
        }

        if items.is_empty() {
            debug!(query = %query, "Search returned no places");
        }

        Ok(items)
    }
}
