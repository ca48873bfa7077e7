//! Debounced autocomplete over the geocoding endpoint.
//!
//! Every keystroke bumps a token in the shared slot. A query's timer and its
//! fetch only publish while their token is still the latest one, so a slow
//! answer for `"Lon"` can never overwrite the list for `"London"`. Superseded
//! fetches are not aborted; their results are dropped.

use std::{sync::Arc, time::Duration};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{Result, model::LocationCandidate, provider::WeatherProvider};

/// Quiet period after the last keystroke before geocoding is attempted.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Shorter queries never reach the provider.
pub const MIN_QUERY_CHARS: usize = 2;

/// Upper bound on the autocomplete list.
pub const MAX_CANDIDATES: usize = 5;

pub fn is_searchable(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_CHARS
}

/// One-shot candidate lookup shared by the orchestrator and the HTTP layer.
/// Too-short queries yield an empty list without calling `provider`.
pub async fn find_candidates(
    provider: &dyn WeatherProvider,
    query: &str,
) -> Result<Vec<LocationCandidate>> {
    if !is_searchable(query) {
        return Ok(Vec::new());
    }

    let mut candidates = provider.geocode(query, MAX_CANDIDATES).await?;
    candidates.truncate(MAX_CANDIDATES);
    Ok(candidates)
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Idle,
    Debouncing {
        query: String,
    },
    Fetching {
        query: String,
    },
    Settled {
        query: String,
        candidates: Arc<[LocationCandidate]>,
    },
    /// Lookup failed. Shown as an empty list; the primary search path is unaffected.
    Failed {
        query: String,
    },
}

impl SearchState {
    pub fn query(&self) -> Option<&str> {
        match self {
            SearchState::Idle => None,
            SearchState::Debouncing { query }
            | SearchState::Fetching { query }
            | SearchState::Settled { query, .. }
            | SearchState::Failed { query } => Some(query),
        }
    }

    /// Visible suggestions; empty in every state but `Settled`.
    pub fn candidates(&self) -> &[LocationCandidate] {
        match self {
            SearchState::Settled { candidates, .. } => &candidates[..],
            _ => &[],
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            SearchState::Debouncing { .. } | SearchState::Fetching { .. }
        )
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SearchState::Failed { .. })
    }
}

/// The single "current query / current result" slot.
#[derive(Debug, Clone)]
pub struct SearchSnapshot {
    /// Token of the latest query issued.
    pub token: u64,
    pub state: SearchState,
}

#[derive(Debug, Clone)]
pub struct SearchOrchestrator {
    provider: Arc<dyn WeatherProvider>,
    debounce: Duration,
    slot: Arc<watch::Sender<SearchSnapshot>>,
}

impl SearchOrchestrator {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        let (slot, _) = watch::channel(SearchSnapshot {
            token: 0,
            state: SearchState::Idle,
        });

        Self {
            provider,
            debounce: DEBOUNCE,
            slot: Arc::new(slot),
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.slot.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.slot.borrow().state.clone()
    }

    /// Register a new input value and restart the debounce timer.
    ///
    /// Must be called from within a tokio runtime. Returns the token issued
    /// for `query`.
    pub fn input(&self, query: impl Into<String>) -> u64 {
        let query = query.into();
        let mut token = 0;

        self.slot.send_modify(|snapshot| {
            snapshot.token += 1;
            token = snapshot.token;
            snapshot.state = SearchState::Debouncing {
                query: query.clone(),
            };
        });

        tokio::spawn(run_query(
            Arc::clone(&self.provider),
            Arc::clone(&self.slot),
            self.debounce,
            token,
            query,
        ));

        token
    }

    /// Wait until the slot holds a settled or failed result for the latest query.
    pub async fn settled(&self) -> SearchState {
        let mut rx = self.subscribe();
        let result = rx
            .wait_for(|snapshot| !snapshot.state.is_busy())
            .await
            .map(|snapshot| snapshot.state.clone());

        // The sender lives in `self`, so the channel cannot close while we wait.
        result.unwrap_or_else(|_| self.state())
    }
}

async fn run_query(
    provider: Arc<dyn WeatherProvider>,
    slot: Arc<watch::Sender<SearchSnapshot>>,
    debounce: Duration,
    token: u64,
    query: String,
) {
    tokio::time::sleep(debounce).await;

    if !is_searchable(&query) {
        publish(
            &slot,
            token,
            SearchState::Settled {
                query,
                candidates: Arc::from(Vec::new()),
            },
        );
        return;
    }

    // A newer keystroke restarted the timer; this one never fires.
    if !publish(
        &slot,
        token,
        SearchState::Fetching {
            query: query.clone(),
        },
    ) {
        return;
    }

    let next = match provider.geocode(&query, MAX_CANDIDATES).await {
        Ok(mut candidates) => {
            candidates.truncate(MAX_CANDIDATES);
            SearchState::Settled {
                query,
                candidates: Arc::from(candidates),
            }
        }
        Err(err) => {
            warn!(%query, error = %err, "Autocomplete lookup failed");
            SearchState::Failed { query }
        }
    };

    if !publish(&slot, token, next) {
        debug!(token, "Dropping stale autocomplete result");
    }
}

/// Store `state` only if `token` is still the latest issued.
fn publish(slot: &watch::Sender<SearchSnapshot>, token: u64, state: SearchState) -> bool {
    slot.send_if_modified(|snapshot| {
        if snapshot.token != token {
            return false;
        }
        snapshot.state = state;
        true
    })
}
