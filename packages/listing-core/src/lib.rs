//! # listing-core
//!
//! A debounced, sequence-guarded coordination layer for asynchronous
//! listing screens: it turns rapidly-changing user input into a minimal,
//! correctly-ordered sequence of backend queries, tracks loading/error
//! state, and feeds a pure presentation layer.
//!
//! ## Core concepts
//!
//! - [`Debounced`] — delays propagation of a fast-changing input until it
//!   is stable for a fixed quiescence window (500 ms by default).
//! - [`QueryState`] — canonical snapshot of filters + sort for one screen.
//! - [`ListingResource`] — the capability set a screen supplies:
//!   {record type, filter shape, sortable fields, defaults, fetch}.
//! - [`ListingController`] — issues exactly one request per distinct
//!   settled query state, guards against out-of-order completion with a
//!   per-controller sequence counter, and converts every failure into a
//!   notification plus state flags.
//! - [`NotificationChannel`] — single-slot ephemeral error/info display.
//!
//! ## Data flow
//!
//! ```text
//! raw edits → Debounced → QueryState change → ListingController
//!     → resource.fetch(query) → backend
//!     → { records | error, loading } → presenter → render
//! ```
//!
//! ## Key invariants
//!
//! 1. **One request per distinct settled state** — not per raw edit.
//! 2. **Highest sequence number wins** — a stale response is never applied
//!    over a newer one, regardless of completion order.
//! 3. **Loading always clears** — when the highest-numbered request
//!    settles, success or failure.
//! 4. **Errors never escape** — failures become notifications and state
//!    flags at the controller boundary; an empty result set is a valid
//!    settled state, not an error.
//! 5. **Teardown is clean** — cancelled timers never fire, in-flight
//!    responses are never applied to a dismantled screen.

mod controller;
mod debounce;
mod error;
mod notify;
mod query;
mod resource;

// Test doubles (feature-gated for downstream tests)
#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[cfg(test)]
mod controller_tests;

pub use controller::{
    ControllerBuilder, ListingController, ListingRequest, ListingState, AUTH_REDIRECT_DELAY,
    LANDING_PATH,
};
pub use debounce::{Debounced, DEFAULT_DEBOUNCE_WINDOW};
pub use error::{ErrorKind, FetchError};
pub use notify::{
    Navigator, NoNavigation, Notification, NotificationChannel, NotificationKind,
    DEFAULT_NOTIFICATION_DURATION,
};
pub use query::{FilterState, QueryState, SortOrder, SortSpec, Unsorted};
pub use resource::ListingResource;

// Re-export the async-trait macro for downstream resource impls.
pub use async_trait::async_trait;
