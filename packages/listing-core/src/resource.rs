//! The capability seam between the generic controller and a concrete
//! listing screen.
//!
//! Each resource type (bookings, events, guides, holiday packages, ...)
//! supplies exactly three things: its record type, its filter shape, and its
//! sortable fields, plus the fetch call and default sort that go with them.
//! The controller is written once against this trait and instantiated once
//! per screen.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::query::{QueryState, SortSpec};

/// A backend-listable resource.
///
/// Implementations must not hold per-query mutable state: `fetch` receives
/// the full query snapshot each time and may be called concurrently for
/// overlapping requests (the controller handles ordering).
#[async_trait]
pub trait ListingResource: Send + Sync + 'static {
    /// The raw backend record. The client holds read-only copies for the
    /// lifetime of one result set.
    type Record: Clone + Send + Sync + 'static;

    /// Named optional scalars, one struct field per filter input.
    /// `Default` must produce the screen's documented filter defaults.
    type Filters: Clone + PartialEq + Default + std::fmt::Debug + Send + Sync + 'static;

    /// Enum of fields the backend can sort this resource by.
    /// Use [`crate::Unsorted`] for endpoints without sort parameters.
    type SortField: Copy + PartialEq + std::fmt::Debug + Send + Sync + 'static;

    /// The screen's documented default sort.
    fn default_sort() -> SortSpec<Self::SortField>;

    /// Execute one backend query for the given settled state.
    ///
    /// Unset filters must be omitted from the request rather than sent as
    /// empty strings. Errors must already be classified ([`FetchError`])
    /// before crossing this boundary.
    async fn fetch(&self, query: &QueryState<Self>) -> Result<Vec<Self::Record>, FetchError>;
}
