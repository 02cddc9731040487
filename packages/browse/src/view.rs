//! Projection of controller state into what a screen renders.
//!
//! Three mutually exclusive shapes: a loading indicator, an empty state
//! with screen-specific copy, or a result list with a count summary.
//! Loading wins over everything; an empty result set is a valid settled
//! state, not an error.

use listing_core::ListingState;

use crate::format::count_summary;

/// A call-to-action rendered inside an empty state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyAction {
    pub label: &'static str,
    pub path: &'static str,
}

/// Copy shown when a settled query matched nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
    pub action: Option<EmptyAction>,
    /// Offer a clear-filters reset alongside the copy. Set on filterable
    /// screens, where "nothing matched" usually means "filters too narrow".
    pub show_reset: bool,
}

impl EmptyState {
    pub const fn new(title: &'static str, hint: &'static str) -> Self {
        Self {
            title,
            hint,
            action: None,
            show_reset: false,
        }
    }

    pub const fn with_action(mut self, label: &'static str, path: &'static str) -> Self {
        self.action = Some(EmptyAction { label, path });
        self
    }

    pub const fn with_reset(mut self) -> Self {
        self.show_reset = true;
        self
    }
}

/// What one listing screen shows at a given instant.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenView<V> {
    Loading,
    Empty(EmptyState),
    Results { summary: String, items: Vec<V> },
}

impl<V> ScreenView<V> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenView::Loading)
    }
}

/// Project controller state into a renderable view, mapping each record
/// through `present`.
pub fn project<Rec, V>(
    state: &ListingState<Rec>,
    empty: &EmptyState,
    noun: &str,
    present: impl Fn(&Rec) -> V,
) -> ScreenView<V> {
    if state.loading {
        return ScreenView::Loading;
    }
    if state.records.is_empty() {
        return ScreenView::Empty(empty.clone());
    }
    ScreenView::Results {
        summary: count_summary(state.records.len(), noun),
        items: state.records.iter().map(present).collect(),
    }
}
