//! Test doubles for controller and query tests.
//!
//! `ScriptedResource` lets a test decide, per request, what the backend
//! returns and how long it takes, including completing requests out of
//! issue order under paused tokio time.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::notify::Navigator;
use crate::query::{QueryState, SortSpec};
use crate::resource::ListingResource;

/// Minimal filter shape for stub resources.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StubFilters {
    pub location: String,
}

/// Minimal sortable-field enum for stub resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubSortField {
    Date,
    Price,
}

/// Resource whose fetch behavior is scripted per request.
pub struct StubResource;

#[async_trait]
impl ListingResource for StubResource {
    type Record = String;
    type Filters = StubFilters;
    type SortField = StubSortField;

    fn default_sort() -> SortSpec<StubSortField> {
        SortSpec::asc(StubSortField::Date)
    }

    async fn fetch(&self, _query: &QueryState<Self>) -> Result<Vec<String>, FetchError> {
        Ok(Vec::new())
    }
}

/// One scripted backend response.
pub struct Step {
    pub delay: Duration,
    pub result: Result<Vec<String>, FetchError>,
}

impl Step {
    pub fn ok(delay_ms: u64, records: &[&str]) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            result: Ok(records.iter().map(|s| s.to_string()).collect()),
        }
    }

    pub fn err(delay_ms: u64, error: FetchError) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            result: Err(error),
        }
    }
}

/// A [`ListingResource`] that replays a script: the n-th fetch consumes the
/// n-th step, sleeps its delay, and returns its result. Running past the
/// script returns empty results immediately.
pub struct ScriptedResource {
    script: Mutex<VecDeque<Step>>,
    issued: AtomicUsize,
    /// Queries seen, in issue order.
    pub queries: Mutex<Vec<QueryState<Self>>>,
}

impl ScriptedResource {
    pub fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(steps.into()),
            issued: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        })
    }

    /// Number of requests issued so far.
    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListingResource for ScriptedResource {
    type Record = String;
    type Filters = StubFilters;
    type SortField = StubSortField;

    fn default_sort() -> SortSpec<StubSortField> {
        SortSpec::asc(StubSortField::Date)
    }

    async fn fetch(&self, query: &QueryState<Self>) -> Result<Vec<String>, FetchError> {
        self.issued.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());

        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(step) => {
                tokio::time::sleep(step.delay).await;
                step.result
            }
            None => Ok(Vec::new()),
        }
    }
}

/// Records navigation requests for assertions.
#[derive(Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}
