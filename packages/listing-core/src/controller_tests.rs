//! Behavior tests for [`crate::ListingController`], run under paused tokio
//! time so debounce windows and out-of-order completions are deterministic.

use std::sync::Arc;
use std::time::Duration;

use crate::controller::{ControllerBuilder, ListingController};
use crate::error::{ErrorKind, FetchError};
use crate::notify::{NotificationChannel, NotificationKind};
use crate::query::{QueryState, SortOrder};
use crate::testing::{RecordingNavigator, ScriptedResource, Step, StubSortField};

const WINDOW: Duration = Duration::from_millis(500);

struct Harness {
    resource: Arc<ScriptedResource>,
    controller: ListingController<ScriptedResource>,
    notifications: NotificationChannel,
    navigator: Arc<RecordingNavigator>,
}

fn harness(steps: Vec<Step>) -> Harness {
    let resource = ScriptedResource::new(steps);
    let notifications = NotificationChannel::new();
    let navigator = RecordingNavigator::new();
    let controller = ControllerBuilder::new(Arc::clone(&resource))
        .with_notifications(notifications.clone())
        .with_navigator(navigator.clone())
        .with_resource_label("events")
        .spawn();
    Harness {
        resource,
        controller,
        notifications,
        navigator,
    }
}

/// Let spawned tasks run without advancing the clock.
async fn settle_tasks() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn initial_request_is_issued_on_spawn_with_defaults() {
    let h = harness(vec![Step::ok(0, &["a", "b"])]);
    settle_tasks().await;

    assert_eq!(h.resource.issued(), 1);
    let queries = h.resource.queries.lock().unwrap();
    assert_eq!(queries[0], QueryState::defaults());
    drop(queries);

    tokio::time::sleep(Duration::from_millis(1)).await;
    let state = h.controller.current_state();
    assert_eq!(state.records, vec!["a", "b"]);
    assert!(!state.loading);
    assert_eq!(state.error, None);
}

#[tokio::test(start_paused = true)]
async fn rapid_edits_issue_one_request_with_the_final_value() {
    let h = harness(vec![Step::ok(0, &[])]);
    settle_tasks().await;

    for text in ["p", "pa", "par", "pari", "paris"] {
        h.controller
            .update_filters(move |f| f.location = text.to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    // Last edit 100ms ago: still inside the window.
    assert_eq!(h.resource.issued(), 1);

    tokio::time::sleep(WINDOW).await;
    settle_tasks().await;
    assert_eq!(h.resource.issued(), 2);
    let queries = h.resource.queries.lock().unwrap();
    assert_eq!(queries[1].filters.location, "paris");
}

#[tokio::test(start_paused = true)]
async fn sustained_edits_defer_the_request_indefinitely() {
    let h = harness(vec![Step::ok(0, &[])]);
    settle_tasks().await;

    for i in 0..20 {
        h.controller
            .update_filters(move |f| f.location = format!("q{i}"));
        tokio::time::sleep(Duration::from_millis(400)).await;
    }
    // 8 seconds of editing, never 500ms of quiet.
    assert_eq!(h.resource.issued(), 1);
}

#[tokio::test(start_paused = true)]
async fn settling_on_the_same_value_issues_no_request() {
    let h = harness(vec![Step::ok(0, &[])]);
    settle_tasks().await;

    h.controller.update_filters(|f| f.location = "oslo".into());
    tokio::time::sleep(WINDOW + Duration::from_millis(1)).await;
    settle_tasks().await;
    assert_eq!(h.resource.issued(), 2);

    // Retype the same settled value.
    h.controller.update_filters(|f| f.location = "oslo".into());
    tokio::time::sleep(WINDOW + Duration::from_millis(1)).await;
    settle_tasks().await;
    assert_eq!(h.resource.issued(), 2);
}

#[tokio::test(start_paused = true)]
async fn sort_changes_refresh_immediately_without_debounce() {
    let h = harness(vec![Step::ok(0, &[]), Step::ok(0, &[]), Step::ok(0, &[])]);
    settle_tasks().await;
    assert_eq!(h.resource.issued(), 1);

    // asc -> desc -> asc, no time passing at all.
    h.controller.toggle_sort_order();
    settle_tasks().await;
    h.controller.toggle_sort_order();
    settle_tasks().await;

    assert_eq!(h.resource.issued(), 3);
    let queries = h.resource.queries.lock().unwrap();
    assert_eq!(queries[1].sort.order, SortOrder::Desc);
    assert_eq!(queries[2].sort.order, SortOrder::Asc);
}

#[tokio::test(start_paused = true)]
async fn setting_the_same_sort_issues_no_request() {
    let h = harness(vec![Step::ok(0, &[])]);
    settle_tasks().await;

    h.controller.set_sort(StubSortField::Date, SortOrder::Asc);
    settle_tasks().await;
    assert_eq!(h.resource.issued(), 1);
}

#[tokio::test(start_paused = true)]
async fn immediate_filter_edits_bypass_the_window() {
    let h = harness(vec![Step::ok(0, &[]), Step::ok(0, &[])]);
    settle_tasks().await;

    // An enum-select style edit: no quiescence needed.
    h.controller
        .set_filter_immediate(|f| f.location = "select".into());
    settle_tasks().await;
    assert_eq!(h.resource.issued(), 2);
}

#[tokio::test(start_paused = true)]
async fn clear_filters_resets_to_defaults_and_skips_the_window() {
    let h = harness(vec![Step::ok(0, &[]), Step::ok(0, &[]), Step::ok(0, &[])]);
    settle_tasks().await;

    h.controller.update_filters(|f| f.location = "oslo".into());
    tokio::time::sleep(WINDOW + Duration::from_millis(1)).await;
    h.controller.set_sort(StubSortField::Price, SortOrder::Desc);
    settle_tasks().await;
    assert_eq!(h.resource.issued(), 3);

    h.controller.clear_filters();
    settle_tasks().await;
    assert_eq!(h.resource.issued(), 4);
    let queries = h.resource.queries.lock().unwrap();
    assert_eq!(queries[3], QueryState::defaults());
}

#[tokio::test(start_paused = true)]
async fn clear_filters_discards_a_pending_debounce_window() {
    let h = harness(vec![Step::ok(0, &[]), Step::ok(0, &[])]);
    settle_tasks().await;

    h.controller.update_filters(|f| f.location = "half-typed".into());
    tokio::time::sleep(Duration::from_millis(200)).await;
    h.controller.clear_filters();
    settle_tasks().await;

    // Clearing while already at defaults issues nothing, and the pending
    // "half-typed" window must never fire.
    tokio::time::sleep(WINDOW * 2).await;
    settle_tasks().await;
    assert_eq!(h.resource.issued(), 1);
}

#[tokio::test(start_paused = true)]
async fn stale_response_is_never_applied_over_newer() {
    // Request 1 (initial) takes 300ms; request 2 takes 50ms and overtakes it.
    let h = harness(vec![Step::ok(300, &["old"]), Step::ok(50, &["new"])]);
    settle_tasks().await;

    h.controller.toggle_sort_order();
    settle_tasks().await;
    assert_eq!(h.resource.issued(), 2);

    tokio::time::sleep(Duration::from_millis(60)).await;
    let state = h.controller.current_state();
    assert_eq!(state.records, vec!["new"]);
    assert!(!state.loading, "highest-numbered request has settled");

    // Request 1 settles late and must be discarded.
    tokio::time::sleep(Duration::from_millis(300)).await;
    let state = h.controller.current_state();
    assert_eq!(state.records, vec!["new"]);
    assert!(!state.loading);
}

#[tokio::test(start_paused = true)]
async fn stale_success_is_not_applied_over_a_newer_failure() {
    // Request 1 (initial) succeeds slowly; request 2 fails fast. Once the
    // failure has settled, request 1's late records answer a query the user
    // already left and must not be applied (nor clear the error flag).
    let h = harness(vec![
        Step::ok(300, &["ghost"]),
        Step::err(50, FetchError::from_status(500, "boom")),
    ]);
    settle_tasks().await;

    h.controller.toggle_sort_order();
    settle_tasks().await;
    assert_eq!(h.resource.issued(), 2);

    tokio::time::sleep(Duration::from_millis(60)).await;
    let state = h.controller.current_state();
    assert!(state.records.is_empty());
    assert_eq!(state.error, Some(ErrorKind::Network));
    assert!(!state.loading);

    tokio::time::sleep(Duration::from_millis(300)).await;
    let state = h.controller.current_state();
    assert!(state.records.is_empty(), "stale success must be discarded");
    assert_eq!(state.error, Some(ErrorKind::Network), "error flag stays");
    assert!(!state.loading);
}

#[tokio::test(start_paused = true)]
async fn loading_holds_until_the_highest_numbered_request_settles() {
    // Request 2 settles after request 1 is already applied.
    let h = harness(vec![Step::ok(50, &["first"]), Step::ok(300, &["second"])]);
    settle_tasks().await;
    h.controller.toggle_sort_order();
    settle_tasks().await;

    tokio::time::sleep(Duration::from_millis(60)).await;
    let state = h.controller.current_state();
    assert_eq!(state.records, vec!["first"]);
    assert!(state.loading, "request 2 is still outstanding");

    tokio::time::sleep(Duration::from_millis(300)).await;
    let state = h.controller.current_state();
    assert_eq!(state.records, vec!["second"]);
    assert!(!state.loading);
}

#[tokio::test(start_paused = true)]
async fn empty_result_is_a_settled_state_not_an_error() {
    let h = harness(vec![Step::ok(0, &[])]);
    settle_tasks().await;
    tokio::time::sleep(Duration::from_millis(1)).await;

    let state = h.controller.current_state();
    assert!(state.records.is_empty());
    assert!(!state.loading);
    assert_eq!(state.error, None);
    assert!(h.notifications.current().is_none());
}

#[tokio::test(start_paused = true)]
async fn failure_notifies_and_keeps_stale_records() {
    let h = harness(vec![
        Step::ok(0, &["kept"]),
        Step::err(0, FetchError::from_status(500, "boom")),
    ]);
    settle_tasks().await;
    tokio::time::sleep(Duration::from_millis(1)).await;

    h.controller.toggle_sort_order();
    settle_tasks().await;
    tokio::time::sleep(Duration::from_millis(1)).await;

    let state = h.controller.current_state();
    assert_eq!(state.records, vec!["kept"], "stale data stays visible");
    assert!(!state.loading, "loading cleared even on the error path");
    assert_eq!(state.error, Some(ErrorKind::Network));

    let toast = h.notifications.current().expect("notification shown");
    assert_eq!(toast.kind, NotificationKind::Error);
    assert!(toast.message.contains("Failed to load events"));
    assert!(h.navigator.paths().is_empty(), "no redirect on network error");
}

#[tokio::test(start_paused = true)]
async fn stale_failure_is_discarded_silently() {
    // Request 1 fails slowly; request 2 succeeds fast.
    let h = harness(vec![
        Step::err(300, FetchError::from_status(500, "boom")),
        Step::ok(50, &["fresh"]),
    ]);
    settle_tasks().await;
    h.controller.toggle_sort_order();
    settle_tasks().await;

    tokio::time::sleep(Duration::from_millis(400)).await;
    let state = h.controller.current_state();
    assert_eq!(state.records, vec!["fresh"]);
    assert_eq!(state.error, None);
    assert!(h.notifications.current().is_none());
}

#[tokio::test(start_paused = true)]
async fn auth_failure_redirects_to_landing_after_fixed_delay() {
    let h = harness(vec![Step::err(0, FetchError::Unauthorized)]);
    settle_tasks().await;
    tokio::time::sleep(Duration::from_millis(1)).await;

    let state = h.controller.current_state();
    assert_eq!(state.error, Some(ErrorKind::Auth));
    assert!(h.notifications.current().is_some());
    assert!(h.navigator.paths().is_empty(), "user gets time to read");

    tokio::time::sleep(Duration::from_millis(1998)).await;
    assert!(h.navigator.paths().is_empty());

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(h.navigator.paths(), vec!["/".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn teardown_cancels_pending_redirect() {
    let h = harness(vec![Step::err(0, FetchError::Unauthorized)]);
    settle_tasks().await;
    tokio::time::sleep(Duration::from_millis(1)).await;

    h.controller.shutdown();
    tokio::time::sleep(Duration::from_millis(3000)).await;
    assert!(h.navigator.paths().is_empty());
}

#[tokio::test(start_paused = true)]
async fn teardown_discards_inflight_responses() {
    let h = harness(vec![Step::ok(500, &["late"])]);
    settle_tasks().await;

    let state_rx = h.controller.state();
    h.controller.shutdown();

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(
        state_rx.borrow().records.is_empty(),
        "response settled after teardown must not be applied"
    );
}
