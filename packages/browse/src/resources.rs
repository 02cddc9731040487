//! One [`ListingResource`] implementation per listing screen.
//!
//! Each resource supplies the screen's filter shape, sortable fields, and
//! documented defaults, plus the translation from query state to backend
//! parameters. Text filters are raw strings (what the input holds); empty
//! strings are omitted from the request rather than sent.

use std::sync::Arc;

use async_trait::async_trait;
use listing_core::{FetchError, ListingResource, QueryState, SortSpec, Unsorted};
use marketplace_client::{
    Booking, Event, EventParams, EventSortField, Guide, GuideParams, GuideSortField, GuideStatus,
    HolidayPackage, HolidayParams, HolidaySortField, MarketplaceClient,
};

fn text_param(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// ============================================================================
// Bookings: no filters, no sort
// ============================================================================

pub struct BookingsResource {
    client: Arc<MarketplaceClient>,
}

impl BookingsResource {
    pub fn new(client: Arc<MarketplaceClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ListingResource for BookingsResource {
    type Record = Booking;
    type Filters = ();
    type SortField = Unsorted;

    fn default_sort() -> SortSpec<Unsorted> {
        SortSpec::asc(Unsorted)
    }

    async fn fetch(&self, _query: &QueryState<Self>) -> Result<Vec<Booking>, FetchError> {
        self.client.bookings().await.map_err(Into::into)
    }
}

// ============================================================================
// Events: location + date text filters
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventFilters {
    pub location: String,
    pub date: String,
}

pub struct EventsResource {
    client: Arc<MarketplaceClient>,
}

impl EventsResource {
    pub fn new(client: Arc<MarketplaceClient>) -> Self {
        Self { client }
    }

    fn params(query: &QueryState<Self>) -> EventParams {
        EventParams {
            location: text_param(&query.filters.location),
            date: text_param(&query.filters.date),
            sort_by: query.sort.field,
            sort_order: query.sort.order,
        }
    }
}

#[async_trait]
impl ListingResource for EventsResource {
    type Record = Event;
    type Filters = EventFilters;
    type SortField = EventSortField;

    fn default_sort() -> SortSpec<EventSortField> {
        SortSpec::asc(EventSortField::EventDate)
    }

    async fn fetch(&self, query: &QueryState<Self>) -> Result<Vec<Event>, FetchError> {
        self.client
            .events(&Self::params(query))
            .await
            .map_err(Into::into)
    }
}

// ============================================================================
// Guides: location + expertise text filters, availability select
// ============================================================================

/// Tri-state availability select. Defaults to available guides; `All` sends
/// no status at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Free,
    Occupied,
    All,
}

impl StatusFilter {
    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::Free => "Available",
            StatusFilter::Occupied => "Occupied",
            StatusFilter::All => "All",
        }
    }

    pub fn variants() -> &'static [StatusFilter] {
        &[StatusFilter::Free, StatusFilter::Occupied, StatusFilter::All]
    }

    fn as_param(self) -> Option<GuideStatus> {
        match self {
            StatusFilter::Free => Some(GuideStatus::Free),
            StatusFilter::Occupied => Some(GuideStatus::Occupied),
            StatusFilter::All => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GuideFilters {
    pub location: String,
    pub expertise: String,
    pub status: StatusFilter,
}

pub struct GuidesResource {
    client: Arc<MarketplaceClient>,
}

impl GuidesResource {
    pub fn new(client: Arc<MarketplaceClient>) -> Self {
        Self { client }
    }

    fn params(query: &QueryState<Self>) -> GuideParams {
        GuideParams {
            location: text_param(&query.filters.location),
            expertise: text_param(&query.filters.expertise),
            status: query.filters.status.as_param(),
            sort_by: query.sort.field,
            sort_order: query.sort.order,
        }
    }
}

#[async_trait]
impl ListingResource for GuidesResource {
    type Record = Guide;
    type Filters = GuideFilters;
    type SortField = GuideSortField;

    fn default_sort() -> SortSpec<GuideSortField> {
        SortSpec::asc(GuideSortField::PricePerHour)
    }

    async fn fetch(&self, query: &QueryState<Self>) -> Result<Vec<Guide>, FetchError> {
        self.client
            .guides(&Self::params(query))
            .await
            .map_err(Into::into)
    }
}

// ============================================================================
// Holiday packages: location text filter
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HolidayFilters {
    pub location: String,
}

pub struct HolidaysResource {
    client: Arc<MarketplaceClient>,
}

impl HolidaysResource {
    pub fn new(client: Arc<MarketplaceClient>) -> Self {
        Self { client }
    }

    fn params(query: &QueryState<Self>) -> HolidayParams {
        HolidayParams {
            location: text_param(&query.filters.location),
            sort_by: query.sort.field,
            sort_order: query.sort.order,
        }
    }
}

#[async_trait]
impl ListingResource for HolidaysResource {
    type Record = HolidayPackage;
    type Filters = HolidayFilters;
    type SortField = HolidaySortField;

    fn default_sort() -> SortSpec<HolidaySortField> {
        SortSpec::asc(HolidaySortField::Cost)
    }

    async fn fetch(&self, query: &QueryState<Self>) -> Result<Vec<HolidayPackage>, FetchError> {
        self.client
            .holidays(&Self::params(query))
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_core::SortOrder;

    #[test]
    fn documented_defaults() {
        let events = QueryState::<EventsResource>::defaults();
        assert_eq!(events.sort, SortSpec::asc(EventSortField::EventDate));
        assert_eq!(events.filters, EventFilters::default());

        let guides = QueryState::<GuidesResource>::defaults();
        assert_eq!(guides.sort, SortSpec::asc(GuideSortField::PricePerHour));
        assert_eq!(guides.filters.status, StatusFilter::Free);

        let holidays = QueryState::<HolidaysResource>::defaults();
        assert_eq!(holidays.sort, SortSpec::asc(HolidaySortField::Cost));
    }

    #[test]
    fn empty_text_filters_are_omitted() {
        let query = QueryState::<EventsResource>::defaults();
        let params = EventsResource::params(&query);
        assert_eq!(params.location, None);
        assert_eq!(params.date, None);
    }

    #[test]
    fn set_text_filters_are_passed_through() {
        let mut query = QueryState::<EventsResource>::defaults();
        query.filters.location = "Tromso".into();
        query.sort = SortSpec::desc(EventSortField::Price);

        let params = EventsResource::params(&query);
        assert_eq!(params.location.as_deref(), Some("Tromso"));
        assert_eq!(params.sort_by, EventSortField::Price);
        assert_eq!(params.sort_order, SortOrder::Desc);
    }

    #[test]
    fn guide_status_tristate_maps_to_param() {
        let mut query = QueryState::<GuidesResource>::defaults();
        assert_eq!(
            GuidesResource::params(&query).status,
            Some(GuideStatus::Free)
        );

        query.filters.status = StatusFilter::Occupied;
        assert_eq!(
            GuidesResource::params(&query).status,
            Some(GuideStatus::Occupied)
        );

        query.filters.status = StatusFilter::All;
        assert_eq!(GuidesResource::params(&query).status, None);
    }
}
