//! The listing controller: query state in, ordered results out.
//!
//! # Architecture
//!
//! ```text
//! raw edits ──► Debounced<Filters> ──► settled filters ─┐
//! sort ops  ────────────────────────── (immediate) ─────┤
//! clear_filters ────────────────────── (immediate) ─────┤
//!                                                       ▼
//!                                             coordination loop
//!                                                       │ one request per
//!                                                       │ distinct settled
//!                                                       ▼ query state
//!                                        ListingRequest { seq, query }
//!                                                       │
//!                                             resource.fetch()
//!                                                       │
//!                                                       ▼
//!                                  apply guard (highest seq wins)
//!                                                       │
//!                              ┌────────────────────────┤
//!                              ▼                        ▼
//!                     ListingState watch     NotificationChannel / Navigator
//! ```
//!
//! # Key invariants
//!
//! 1. Whenever the effective query (settled filters + immediate sort)
//!    changes, exactly one request is issued, with the next sequence number.
//! 2. A response is applied only if its sequence number exceeds the highest
//!    settled so far, success or failure; stale responses are discarded,
//!    never applied over newer data, even when completion order differs
//!    from issue order.
//! 3. `loading` is set on issue and cleared exactly when the
//!    highest-numbered issued request settles, success or failure.
//! 4. Failures never propagate past this module: they become a notification
//!    plus [`ListingState::error`]. Current records stay visible.
//! 5. After [`ListingController::shutdown`] (or drop) no timer fires and no
//!    response is applied.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::debounce::{Debounced, DEFAULT_DEBOUNCE_WINDOW};
use crate::error::{ErrorKind, FetchError};
use crate::notify::{Navigator, NoNavigation, NotificationChannel};
use crate::query::{QueryState, SortOrder, SortSpec};
use crate::resource::ListingResource;

/// Delay between an auth failure notification and the landing redirect,
/// giving the user time to read the message.
pub const AUTH_REDIRECT_DELAY: Duration = Duration::from_millis(2000);

/// Default landing path for the auth redirect.
pub const LANDING_PATH: &str = "/";

/// One immutable request issued to the backend.
///
/// Sequence numbers are monotonically increasing per controller instance,
/// assigned at issue time.
pub struct ListingRequest<R: ListingResource> {
    pub seq: u64,
    pub query: QueryState<R>,
}

impl<R: ListingResource> std::fmt::Debug for ListingRequest<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingRequest")
            .field("seq", &self.seq)
            .field("query", &self.query)
            .finish()
    }
}

/// Observable snapshot fed to the presentation layer.
#[derive(Debug, Clone)]
pub struct ListingState<Rec> {
    /// The applied result set (read-only copies of backend records).
    pub records: Vec<Rec>,
    /// True from issue until the highest-numbered request settles.
    pub loading: bool,
    /// Classification of the most recent surfaced failure, cleared by the
    /// next applied success. An empty `records` is not an error.
    pub error: Option<ErrorKind>,
}

impl<Rec> Default for ListingState<Rec> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

enum Command<R: ListingResource> {
    /// Mutate filters through the debounce window (text/date inputs).
    UpdateFilters(Box<dyn FnOnce(&mut R::Filters) + Send>),
    /// Mutate filters bypassing the window (enum selects).
    UpdateFiltersImmediate(Box<dyn FnOnce(&mut R::Filters) + Send>),
    SetSort(SortSpec<R::SortField>),
    ToggleSortOrder,
    ClearFilters,
}

/// Builder for [`ListingController`], one per listing screen.
pub struct ControllerBuilder<R: ListingResource> {
    resource: Arc<R>,
    notifications: NotificationChannel,
    navigator: Arc<dyn Navigator>,
    debounce_window: Duration,
    auth_redirect_delay: Duration,
    landing_path: String,
    resource_label: &'static str,
}

impl<R: ListingResource> ControllerBuilder<R> {
    pub fn new(resource: Arc<R>) -> Self {
        Self {
            resource,
            notifications: NotificationChannel::new(),
            navigator: Arc::new(NoNavigation),
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
            auth_redirect_delay: AUTH_REDIRECT_DELAY,
            landing_path: LANDING_PATH.to_string(),
            resource_label: "results",
        }
    }

    /// Share a notification channel with the rest of the screen.
    pub fn with_notifications(mut self, notifications: NotificationChannel) -> Self {
        self.notifications = notifications;
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn with_debounce_window(mut self, window: Duration) -> Self {
        self.debounce_window = window;
        self
    }

    pub fn with_auth_redirect_delay(mut self, delay: Duration) -> Self {
        self.auth_redirect_delay = delay;
        self
    }

    pub fn with_landing_path(mut self, path: impl Into<String>) -> Self {
        self.landing_path = path.into();
        self
    }

    /// Human label for notification copy ("events", "guides", ...).
    pub fn with_resource_label(mut self, label: &'static str) -> Self {
        self.resource_label = label;
        self
    }

    /// Spawn the coordination loop and issue the initial request (seq 1)
    /// with the resource's default query.
    pub fn spawn(self) -> ListingController<R> {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ListingState::default());
        let cancel = CancellationToken::new();

        let defaults = QueryState::<R>::defaults();
        let debounced = Debounced::spawn(defaults.filters.clone(), self.debounce_window);

        let loop_ = CoordinationLoop {
            resource: self.resource,
            notifications: self.notifications,
            navigator: self.navigator,
            auth_redirect_delay: self.auth_redirect_delay,
            landing_path: self.landing_path,
            resource_label: self.resource_label,
            raw_filters: defaults.filters.clone(),
            settled_filters: defaults.filters,
            sort: defaults.sort,
            last_queried: None,
            next_seq: 0,
            latest_issued: 0,
            settled_seq: 0,
            state_tx,
            cancel: cancel.clone(),
        };
        tokio::spawn(loop_.run(command_rx, debounced));

        ListingController {
            command_tx,
            state_rx,
            cancel,
        }
    }
}

/// Handle to one screen's coordination loop.
///
/// Dropping the handle (screen teardown) cancels pending debounce timers,
/// the scheduled auth redirect, and marks in-flight requests non-applicable.
pub struct ListingController<R: ListingResource> {
    command_tx: mpsc::UnboundedSender<Command<R>>,
    state_rx: watch::Receiver<ListingState<R::Record>>,
    cancel: CancellationToken,
}

impl<R: ListingResource> ListingController<R> {
    pub fn builder(resource: Arc<R>) -> ControllerBuilder<R> {
        ControllerBuilder::new(resource)
    }

    /// Edit filters through the debounce window. The fetch happens once the
    /// input has been stable for the full window.
    pub fn update_filters(&self, edit: impl FnOnce(&mut R::Filters) + Send + 'static) {
        let _ = self.command_tx.send(Command::UpdateFilters(Box::new(edit)));
    }

    /// Edit filters bypassing the window. For enum selects, which need no
    /// quiescence (a select changes once per interaction).
    pub fn set_filter_immediate(&self, edit: impl FnOnce(&mut R::Filters) + Send + 'static) {
        let _ = self
            .command_tx
            .send(Command::UpdateFiltersImmediate(Box::new(edit)));
    }

    /// Change the sort. Refreshes immediately; sort toggles are not
    /// debounced.
    pub fn set_sort(&self, field: R::SortField, order: SortOrder) {
        let _ = self.command_tx.send(Command::SetSort(SortSpec::new(field, order)));
    }

    /// Flip the current sort direction, refreshing immediately.
    pub fn toggle_sort_order(&self) {
        let _ = self.command_tx.send(Command::ToggleSortOrder);
    }

    /// Reset filters and sort to the resource defaults atomically and issue
    /// one request immediately, bypassing the debounce window.
    pub fn clear_filters(&self) {
        let _ = self.command_tx.send(Command::ClearFilters);
    }

    /// Subscribe to state snapshots.
    pub fn state(&self) -> watch::Receiver<ListingState<R::Record>> {
        self.state_rx.clone()
    }

    /// The latest state snapshot.
    pub fn current_state(&self) -> ListingState<R::Record> {
        self.state_rx.borrow().clone()
    }

    /// Tear down the screen. Idempotent.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl<R: ListingResource> Drop for ListingController<R> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

type Settled<Rec> = (u64, Result<Vec<Rec>, FetchError>);

struct CoordinationLoop<R: ListingResource> {
    resource: Arc<R>,
    notifications: NotificationChannel,
    navigator: Arc<dyn Navigator>,
    auth_redirect_delay: Duration,
    landing_path: String,
    resource_label: &'static str,

    /// Raw filter value as the user currently sees it (pre-debounce).
    raw_filters: R::Filters,
    /// Filter value as of the last settled publish.
    settled_filters: R::Filters,
    sort: SortSpec<R::SortField>,
    /// The query the most recent request was issued for. Requests are only
    /// issued when the effective query differs from this.
    last_queried: Option<QueryState<R>>,

    next_seq: u64,
    latest_issued: u64,
    /// Highest sequence number that has settled, success or failure. A
    /// success is applied only if its seq exceeds this; a late success from
    /// a request superseded by an already-settled newer one is discarded.
    settled_seq: u64,

    state_tx: watch::Sender<ListingState<R::Record>>,
    cancel: CancellationToken,
}

impl<R: ListingResource> CoordinationLoop<R> {
    async fn run(
        mut self,
        mut command_rx: mpsc::UnboundedReceiver<Command<R>>,
        debounced: Debounced<R::Filters>,
    ) {
        let mut settled_rx = debounced.settled();
        settled_rx.mark_unchanged();
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Settled<R::Record>>();

        // Screens fetch on activation.
        self.issue(self.effective_query(), &done_tx);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,

                changed = settled_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.settled_filters = settled_rx.borrow_and_update().clone();
                    self.issue_if_changed(&done_tx);
                }

                cmd = command_rx.recv() => {
                    let Some(cmd) = cmd else { break };
                    self.handle_command(cmd, &debounced, &done_tx);
                }

                settled = done_rx.recv() => {
                    // done_tx lives in self's scope; recv cannot return None
                    // while we hold it, but guard anyway.
                    let Some((seq, result)) = settled else { break };
                    self.apply_settled(seq, result);
                }
            }
        }

        debounced.cancel();
    }

    fn handle_command(
        &mut self,
        cmd: Command<R>,
        debounced: &Debounced<R::Filters>,
        done_tx: &mpsc::UnboundedSender<Settled<R::Record>>,
    ) {
        match cmd {
            Command::UpdateFilters(edit) => {
                edit(&mut self.raw_filters);
                debounced.set(self.raw_filters.clone());
            }
            Command::UpdateFiltersImmediate(edit) => {
                edit(&mut self.raw_filters);
                self.settled_filters = self.raw_filters.clone();
                debounced.set_immediate(self.raw_filters.clone());
                self.issue_if_changed(done_tx);
            }
            Command::SetSort(sort) => {
                self.sort = sort;
                self.issue_if_changed(done_tx);
            }
            Command::ToggleSortOrder => {
                self.sort.order = self.sort.order.toggled();
                self.issue_if_changed(done_tx);
            }
            Command::ClearFilters => {
                let defaults = QueryState::<R>::defaults();
                self.raw_filters = defaults.filters.clone();
                self.settled_filters = defaults.filters;
                self.sort = defaults.sort;
                // Discard any pending debounce window and sync the worker.
                debounced.set_immediate(self.raw_filters.clone());
                self.issue_if_changed(done_tx);
            }
        }
    }

    fn effective_query(&self) -> QueryState<R> {
        QueryState {
            filters: self.settled_filters.clone(),
            sort: self.sort,
        }
    }

    /// Issue a request iff the effective query differs from the last one
    /// issued. This is what makes "one request per distinct settled state"
    /// hold across the debounced, immediate, and reset paths.
    fn issue_if_changed(&mut self, done_tx: &mpsc::UnboundedSender<Settled<R::Record>>) {
        let effective = self.effective_query();
        if self.last_queried.as_ref() == Some(&effective) {
            return;
        }
        self.issue(effective, done_tx);
    }

    fn issue(
        &mut self,
        query: QueryState<R>,
        done_tx: &mpsc::UnboundedSender<Settled<R::Record>>,
    ) {
        self.next_seq += 1;
        let request = ListingRequest {
            seq: self.next_seq,
            query,
        };
        self.latest_issued = request.seq;
        self.last_queried = Some(request.query.clone());

        tracing::debug!(
            resource = self.resource_label,
            seq = request.seq,
            query = ?request.query,
            "issuing listing request"
        );
        self.state_tx.send_modify(|state| state.loading = true);

        let resource = Arc::clone(&self.resource);
        let done_tx = done_tx.clone();
        tokio::spawn(async move {
            let result = resource.fetch(&request.query).await;
            // The loop may be gone (teardown); the response is then
            // discarded, never applied to an unmounted view.
            let _ = done_tx.send((request.seq, result));
        });
    }

    fn apply_settled(&mut self, seq: u64, result: Result<Vec<R::Record>, FetchError>) {
        let is_latest = seq == self.latest_issued;
        let superseded = seq <= self.settled_seq;
        self.settled_seq = self.settled_seq.max(seq);
        match result {
            Ok(records) => {
                if superseded {
                    // A higher-numbered request already settled (applied or
                    // failed); this result answers a query the user left.
                    tracing::debug!(
                        resource = self.resource_label,
                        seq,
                        settled = self.settled_seq,
                        "discarding stale response"
                    );
                    return;
                }
                tracing::debug!(
                    resource = self.resource_label,
                    seq,
                    count = records.len(),
                    "applying listing result"
                );
                self.state_tx.send_modify(|state| {
                    state.records = records;
                    state.error = None;
                    if is_latest {
                        state.loading = false;
                    }
                });
            }
            Err(err) => {
                if !is_latest {
                    // A failure of a superseded request is moot: the user
                    // already moved on to a newer query.
                    tracing::debug!(
                        resource = self.resource_label,
                        seq,
                        latest = self.latest_issued,
                        "discarding stale failure"
                    );
                    return;
                }
                tracing::warn!(
                    resource = self.resource_label,
                    seq,
                    error = %err,
                    "listing request failed"
                );
                let kind = err.kind();
                // Records stay as-is: stale data beats a blank page.
                self.state_tx.send_modify(|state| {
                    state.error = Some(kind);
                    state.loading = false;
                });
                self.notifications
                    .error(err.user_message(self.resource_label));

                if kind == ErrorKind::Auth {
                    self.schedule_landing_redirect();
                }
            }
        }
    }

    /// Redirect to the landing screen after a fixed delay so the user can
    /// read the notification first. Cancelled by teardown.
    fn schedule_landing_redirect(&self) {
        let navigator = Arc::clone(&self.navigator);
        let path = self.landing_path.clone();
        let delay = self.auth_redirect_delay;
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = sleep(delay) => navigator.navigate(&path),
            }
        });
    }
}
