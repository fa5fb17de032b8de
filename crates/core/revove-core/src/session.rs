//! Autocomplete session: debounce, last-query-wins and the displayed list
//!
//! Every call to [`SuggestionSession::update`] stamps the query with a new
//! generation. A result is written to the displayed state only if no newer
//! query arrived while it was in flight; anything older is dropped on arrival.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::Duration;

use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::suggest::{rank_locally, suggest_places, PlaceSearch};
use crate::types::{Place, PlaceId};
use crate::Result;

/// Quiet period after the last keystroke before searching
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// What to show when the server search fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpstreamErrorPolicy {
    /// Rank the cached catalog locally as if the server found nothing
    #[default]
    FallBackToLocal,
    /// Clear suggestions and record the error for display
    Propagate,
}

/// What the user currently sees
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionState {
    /// Text in the place box
    pub query: String,
    /// Displayed suggestions
    pub suggestions: Vec<Place>,
    /// A search for the current query is in flight
    pub loading: bool,
    /// Error from the last search, only under [`UpstreamErrorPolicy::Propagate`]
    pub error: Option<String>,
}

/// Result of one [`SuggestionSession::update`] call
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// Blank query, suggestions cleared without searching
    Cleared,
    /// Suggestions replaced with these
    Applied(Vec<Place>),
    /// A newer query arrived first; nothing was written
    Superseded,
    /// The search failed and the error was recorded
    Failed(String),
}

/// Caller-side controller around [`suggest_places`]
pub struct SuggestionSession {
    search: Arc<dyn PlaceSearch>,
    catalog: RwLock<Arc<Vec<Place>>>,
    debounce: Duration,
    policy: UpstreamErrorPolicy,
    generation: AtomicU64,
    state: Mutex<SuggestionState>,
}

impl SuggestionSession {
    /// New session with an empty catalog and default debounce
    pub fn new(search: Arc<dyn PlaceSearch>) -> Self {
        Self {
            search,
            catalog: RwLock::new(Arc::new(Vec::new())),
            debounce: DEFAULT_DEBOUNCE,
            policy: UpstreamErrorPolicy::default(),
            generation: AtomicU64::new(0),
            state: Mutex::new(SuggestionState::default()),
        }
    }

    /// Set the debounce window; zero searches immediately
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the upstream failure policy
    pub fn with_policy(mut self, policy: UpstreamErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Seed the cached catalog
    pub fn with_catalog(self, places: Vec<Place>) -> Self {
        self.set_catalog(places);
        self
    }

    /// Replace the cached catalog used by the local fallback
    pub fn set_catalog(&self, places: Vec<Place>) {
        let mut catalog = self.catalog.write().unwrap_or_else(|e| e.into_inner());
        *catalog = Arc::new(places);
    }

    /// Reload the catalog from the API, keeping the old one on failure
    pub async fn refresh_catalog(&self, client: &ApiClient) -> Result<usize> {
        let places = client.fetch_places().await?;
        let count = places.len();
        self.set_catalog(places);
        debug!(count, "catalog refreshed");
        Ok(count)
    }

    /// Number of places in the cached catalog
    pub fn catalog_len(&self) -> usize {
        self.catalog_snapshot().len()
    }

    /// Copy of the displayed state
    pub fn snapshot(&self) -> SuggestionState {
        self.lock_state().clone()
    }

    /// Current generation id
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Handle new text in the place box.
    ///
    /// Waits out the debounce window, searches, and applies the result only
    /// if this is still the newest query.
    pub async fn update(&self, query: &str) -> UpdateOutcome {
        let term = query.trim().to_string();
        let generation = {
            let mut state = self.lock_state();
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.query = query.to_string();
            if term.is_empty() {
                state.suggestions.clear();
                state.loading = false;
                state.error = None;
                return UpdateOutcome::Cleared;
            }
            generation
        };

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }

        {
            let mut state = self.lock_state();
            if !self.is_current(generation) {
                debug!(generation, "debounced query superseded");
                return UpdateOutcome::Superseded;
            }
            state.loading = true;
        }
        let _loading = LoadingGuard {
            session: self,
            generation,
        };

        let catalog = self.catalog_snapshot();
        let result = suggest_places(&term, self.search.as_ref(), &catalog).await;

        let mut state = self.lock_state();
        if !self.is_current(generation) {
            debug!(generation, term = %term, "discarding stale suggestions");
            return UpdateOutcome::Superseded;
        }
        state.loading = false;

        match result {
            Ok(places) => {
                state.error = None;
                state.suggestions = places.clone();
                UpdateOutcome::Applied(places)
            }
            Err(e) => match self.policy {
                UpstreamErrorPolicy::FallBackToLocal => {
                    warn!("Place search failed, ranking cached places instead: {}", e);
                    let places = rank_locally(&term, &catalog);
                    state.error = None;
                    state.suggestions = places.clone();
                    UpdateOutcome::Applied(places)
                }
                UpstreamErrorPolicy::Propagate => {
                    warn!("Place search failed: {}", e);
                    let msg = e.to_string();
                    state.suggestions.clear();
                    state.error = Some(msg.clone());
                    UpdateOutcome::Failed(msg)
                }
            },
        }
    }

    /// Pick a displayed suggestion; clears the box and drops in-flight results
    pub fn select(&self, id: PlaceId) -> Option<Place> {
        let mut state = self.lock_state();
        let place = state.suggestions.iter().find(|p| p.id == id).cloned()?;
        self.generation.fetch_add(1, Ordering::SeqCst);
        state.query.clear();
        state.suggestions.clear();
        state.loading = false;
        Some(place)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn catalog_snapshot(&self) -> Arc<Vec<Place>> {
        self.catalog
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, SuggestionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Clears `loading` when an in-flight search ends, including when the
/// `update` future is dropped before the search returns
struct LoadingGuard<'a> {
    session: &'a SuggestionSession,
    generation: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.session.lock_state();
        if self.session.is_current(self.generation) {
            state.loading = false;
        }
    }
}
