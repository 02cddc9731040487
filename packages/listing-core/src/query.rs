//! Query state: the combined filter and sort selection that drives one
//! listing fetch.
//!
//! Each listing screen owns exactly one [`QueryState`], created with the
//! resource's defaults when the screen activates and mutated only through
//! controller operations. Two paths feed it:
//!
//! - **Filters** change through the debounce window (text/date inputs).
//! - **Sort** changes apply immediately (sort toggles need instant feedback).

use serde::{Deserialize, Serialize};

use crate::resource::ListingResource;

/// Direction of a sort.
///
/// Serializes as `"asc"` / `"desc"`, matching the backend wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// The opposite direction. Used by sort-order toggles.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// A sortable field plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub field: F,
    pub order: SortOrder,
}

impl<F> SortSpec<F> {
    pub fn new(field: F, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Ascending sort on `field`.
    pub fn asc(field: F) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    /// Descending sort on `field`.
    pub fn desc(field: F) -> Self {
        Self::new(field, SortOrder::Desc)
    }
}

/// Sort marker for resources whose backend endpoint takes no sort
/// parameters (e.g. a user's own bookings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Unsorted;

/// Snapshot of the current filters and sort for one listing screen.
pub struct QueryState<R: ListingResource + ?Sized> {
    pub filters: R::Filters,
    pub sort: SortSpec<R::SortField>,
}

// Manual impls: deriving would bound `R` itself rather than its associated
// types.
impl<R: ListingResource + ?Sized> Clone for QueryState<R> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            sort: self.sort,
        }
    }
}

impl<R: ListingResource + ?Sized> PartialEq for QueryState<R> {
    fn eq(&self, other: &Self) -> bool {
        self.filters == other.filters && self.sort == other.sort
    }
}

impl<R: ListingResource + ?Sized> std::fmt::Debug for QueryState<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryState")
            .field("filters", &self.filters)
            .field("sort", &self.sort)
            .finish()
    }
}

impl<R: ListingResource + ?Sized> QueryState<R> {
    /// The resource's documented defaults: `Default` filters plus
    /// [`ListingResource::default_sort`].
    pub fn defaults() -> Self {
        Self {
            filters: R::Filters::default(),
            sort: R::default_sort(),
        }
    }

    /// Current position in the filter-state machine.
    pub fn filter_state(&self) -> FilterState {
        if *self == Self::defaults() {
            FilterState::Default
        } else {
            FilterState::Modified
        }
    }
}

/// The two states of the per-screen filter machine.
///
/// `Default` means the query equals the resource defaults; any edit moves to
/// `Modified`; `clear_filters()` moves back. There is no further branching:
/// the state only distinguishes the two fetch paths (debounced edits vs the
/// immediate reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    Default,
    Modified,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubFilters, StubResource, StubSortField};

    #[test]
    fn sort_order_toggles() {
        assert_eq!(SortOrder::Asc.toggled(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.toggled(), SortOrder::Asc);
        assert_eq!(SortOrder::Asc.toggled().toggled(), SortOrder::Asc);
    }

    #[test]
    fn sort_order_wire_format() {
        assert_eq!(SortOrder::Asc.as_str(), "asc");
        assert_eq!(SortOrder::Desc.as_str(), "desc");
        assert_eq!(serde_json::to_string(&SortOrder::Desc).unwrap(), "\"desc\"");
    }

    #[test]
    fn defaults_are_default_state() {
        let q = QueryState::<StubResource>::defaults();
        assert_eq!(q.filter_state(), FilterState::Default);
    }

    #[test]
    fn any_edit_moves_to_modified() {
        let mut q = QueryState::<StubResource>::defaults();
        q.filters = StubFilters {
            location: "oslo".into(),
        };
        assert_eq!(q.filter_state(), FilterState::Modified);

        let mut q = QueryState::<StubResource>::defaults();
        q.sort = SortSpec::desc(StubSortField::Price);
        assert_eq!(q.filter_state(), FilterState::Modified);
    }

    #[test]
    fn reset_returns_to_default() {
        let mut q = QueryState::<StubResource>::defaults();
        q.filters = StubFilters {
            location: "oslo".into(),
        };
        q = QueryState::defaults();
        assert_eq!(q.filter_state(), FilterState::Default);
    }
}
