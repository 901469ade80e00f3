use crate::core::client_filter;
use crate::core::job_query::JobQueryService;
use crate::domain::model::{FilterState, Job, JobType};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Not mounted yet, nothing requested.
    Idle,
    /// The most recently issued request has not resolved.
    Loading,
    /// The most recently issued request resolved, successfully or not.
    Settled,
}

#[derive(Debug)]
struct ListState {
    filter: FilterState,
    jobs: Vec<Job>,
    mounted: bool,
    latest_request: u64,
    load_state: LoadState,
    last_error: Option<String>,
}

/// Job listing orchestration.
///
/// Fetches are keyed on the search text only. Each fetch is tagged with a
/// sequence number and its response is applied only if no newer fetch has been
/// issued since, so the list always reflects the last requested search.
/// Type filtering happens on read and never triggers a fetch.
#[derive(Clone)]
pub struct JobListView {
    service: Arc<JobQueryService>,
    state: Arc<Mutex<ListState>>,
}

impl JobListView {
    pub fn new(service: Arc<JobQueryService>, filter: FilterState) -> Self {
        Self {
            service,
            state: Arc::new(Mutex::new(ListState {
                filter,
                jobs: Vec::new(),
                mounted: false,
                latest_request: 0,
                load_state: LoadState::Idle,
                last_error: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issues the initial load. Mounting twice does not reload.
    pub fn mount(&self) -> Option<JoinHandle<()>> {
        let search_text = {
            let mut state = self.lock();
            if state.mounted {
                return None;
            }
            state.mounted = true;
            state.filter.search_text.clone()
        };
        Some(self.issue_load(search_text))
    }

    /// Updates the search text, reloading when it differs from the current one.
    pub fn set_search_text(&self, search_text: impl Into<String>) -> Option<JoinHandle<()>> {
        let search_text = search_text.into();
        {
            let mut state = self.lock();
            if state.filter.search_text == search_text {
                return None;
            }
            state.filter.search_text = search_text.clone();
            if !state.mounted {
                return None;
            }
        }
        Some(self.issue_load(search_text))
    }

    pub fn set_selected_types(&self, selected_types: BTreeSet<JobType>) {
        self.lock().filter.selected_types = selected_types;
    }

    /// Applies a full filter state, e.g. after navigation changed the query parameters.
    pub fn apply_filter_state(&self, filter: FilterState) -> Option<JoinHandle<()>> {
        self.set_selected_types(filter.selected_types);
        self.set_search_text(filter.search_text)
    }

    fn issue_load(&self, search_text: String) -> JoinHandle<()> {
        let request_id = {
            let mut state = self.lock();
            state.latest_request += 1;
            state.load_state = LoadState::Loading;
            state.latest_request
        };
        tracing::debug!(request_id, search_text = %search_text, "Loading jobs");

        let service = Arc::clone(&self.service);
        let shared = Arc::clone(&self.state);

        tokio::spawn(async move {
            let result = service.fetch_jobs(&search_text).await;

            let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
            if request_id != state.latest_request {
                tracing::debug!(
                    request_id,
                    latest = state.latest_request,
                    "Discarding stale job response for '{}'",
                    search_text
                );
                return;
            }

            match result {
                Ok(jobs) => {
                    tracing::info!("Loaded {} jobs for '{}'", jobs.len(), search_text);
                    state.jobs = jobs;
                    state.last_error = None;
                }
                Err(e) => {
                    tracing::error!(
                        "❌ Failed to load jobs for '{}': {} (Category: {:?})",
                        search_text,
                        e,
                        e.category()
                    );
                    state.jobs = Vec::new();
                    state.last_error = Some(e.to_string());
                }
            }
            state.load_state = LoadState::Settled;
        })
    }

    pub fn load_state(&self) -> LoadState {
        self.lock().load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state() == LoadState::Loading
    }

    pub fn filter_state(&self) -> FilterState {
        self.lock().filter.clone()
    }

    /// Jobs from the last applied response, before type filtering.
    pub fn fetched_jobs(&self) -> Vec<Job> {
        self.lock().jobs.clone()
    }

    /// Jobs to display: the fetched set filtered by the selected types.
    pub fn visible_jobs(&self) -> Vec<Job> {
        let state = self.lock();
        client_filter::apply(&state.jobs, &state.filter.selected_types)
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    pub fn requests_issued(&self) -> u64 {
        self.lock().latest_request
    }
}
